//! The asset envelope and the per-kind configuration trait.
//!
//! Every registry stores the same envelope: `id`, `owner`, `orgName`,
//! `createdAt`, `updatedAt`, plus a kind-specific payload flattened beside
//! them. One generic repository serves all kinds; an [`AssetKind`]
//! implementation supplies the payload type and the kind's query and
//! update rules.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::filter::FilterSchema;
use crate::types::{AssetId, Timestamp};

/// A stored asset of payload type `P`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset<P> {
    #[serde(default)]
    pub id: AssetId,
    #[serde(default)]
    pub owner: String,
    #[serde(default)]
    pub org_name: String,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
    #[serde(flatten)]
    pub payload: P,
}

/// Creation input: the caller-assigned id and the kind's payload. Envelope
/// fields supplied by the caller are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewAsset<P> {
    #[serde(default)]
    pub id: AssetId,
    #[serde(flatten)]
    pub payload: P,
}

impl<P> NewAsset<P> {
    pub fn new(id: impl Into<AssetId>, payload: P) -> Self {
        Self {
            id: id.into(),
            payload,
        }
    }
}

/// Anything ordered by its last-update time.
pub trait Stamped {
    fn updated_at(&self) -> Timestamp;
}

impl<P> Stamped for Asset<P> {
    fn updated_at(&self) -> Timestamp {
        self.updated_at
    }
}

/// Per-kind configuration for the generic repository.
pub trait AssetKind: Send + Sync + 'static {
    /// Domain fields stored beside the envelope. Must be `#[serde(default)]`
    /// so that absent fields decode to zero values.
    type Payload: Serialize + DeserializeOwned + Default + Clone + Debug + Send + Sync + 'static;

    /// Registry tag, e.g. `"farmer"`. Also used in error messages.
    const TAG: &'static str;

    /// Label of the list envelope, e.g. `"All Farmer"`.
    const LIST_LABEL: &'static str;

    /// How list criteria map onto selector predicates.
    const FILTER: FilterSchema;

    /// Payload fields (JSON names) a generic update must not overwrite,
    /// typically references to a counterpart asset.
    const IMMUTABLE_ON_UPDATE: &'static [&'static str] = &[];

    /// Restrict listing to the caller's organization.
    const ORG_SCOPED_LIST: bool = false;

    /// Reorder a single version's multi-step collection for "latest history".
    fn order_steps(_payload: &mut Self::Payload) {}
}

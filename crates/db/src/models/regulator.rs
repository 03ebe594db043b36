//! Regulator registry.

use agritrace_core::asset::{Asset, AssetKind};
use agritrace_core::filter::FilterSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegulatorPayload {
    pub cert_id: String,
}

pub type Regulator = Asset<RegulatorPayload>;

pub struct RegulatorKind;

impl AssetKind for RegulatorKind {
    type Payload = RegulatorPayload;

    const TAG: &'static str = "regulator";
    const LIST_LABEL: &'static str = "All Regulator";
    const FILTER: FilterSchema = super::CERT_ID_ONLY;
}

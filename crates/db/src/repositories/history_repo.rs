//! Audit trail of a single asset, rebuilt from the ledger's version chain.

use std::marker::PhantomData;

use agritrace_core::asset::{Asset, AssetKind};
use agritrace_core::error::CoreError;
use agritrace_core::history::VersionRecord;

use super::asset_repo::require_id;
use crate::TxContext;

/// One version of an asset of kind `K`.
pub type AssetVersion<K> = VersionRecord<Asset<<K as AssetKind>::Payload>>;

pub struct HistoryRepo<K>(PhantomData<K>);

impl<K: AssetKind> HistoryRepo<K> {
    /// Every version of `id`, oldest first. Each record carries only the
    /// value written by that version; tombstones carry none.
    pub async fn history(ctx: &TxContext<'_>, id: &str) -> Result<Vec<AssetVersion<K>>, CoreError> {
        require_id(id)?;
        let versions = ctx
            .ledger
            .history(id)
            .await
            .map_err(|e| CoreError::ledger("history", Some(id), e))?;

        let mut trail = Vec::new();
        for version in versions {
            let version = version.map_err(|e| CoreError::ledger("history", Some(id), e))?;
            trail.push(VersionRecord::from_modification(version)?);
        }
        Ok(trail)
    }

    /// The most recent version of `id`, with the kind's multi-step
    /// collection ordered newest step first. `None` if the key was never
    /// written.
    pub async fn latest(ctx: &TxContext<'_>, id: &str) -> Result<Option<AssetVersion<K>>, CoreError> {
        let Some(mut latest) = Self::history(ctx, id).await?.pop() else {
            return Ok(None);
        };
        latest.map_values(|asset| K::order_steps(&mut asset.payload));
        Ok(Some(latest))
    }
}

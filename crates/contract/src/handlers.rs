//! Per-operation handlers, generic over the asset kind.
//!
//! Argument conventions:
//! - `Create`: one asset document. `CreateMany`: an array of them.
//! - `Read`, `Delete`, `Exists`, `History`, `LatestHistory`: the bare asset id.
//! - `Update`: the changed fields plus `id`.
//! - `Transfer`: `{"id": ..., "newOwner": ...}`.
//! - `List`: a filter document, or nothing for the first unbounded page.
//! - `FindByField`: `{"key": ..., "value": <scalar>}`.

use agritrace_core::asset::{AssetKind, NewAsset};
use agritrace_core::codec;
use agritrace_core::constants::FIELD_ID;
use agritrace_core::error::CoreError;
use agritrace_core::filter::FilterSpec;
use agritrace_core::page::clamp_limit;
use agritrace_db::repositories::{AssetRepo, HistoryRepo};
use agritrace_db::TxContext;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ContractConfig;
use crate::error::{ContractError, ContractResult};
use crate::response::{DataResponse, ListResponse};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransferArgs {
    id: String,
    new_owner: String,
}

#[derive(Debug, Deserialize)]
struct FindByFieldArgs {
    key: String,
    value: Value,
}

fn render<T: Serialize>(value: &T) -> ContractResult<String> {
    serde_json::to_string(value).map_err(|e| CoreError::Decode(e.to_string()).into())
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

pub async fn create<K: AssetKind>(ctx: &TxContext<'_>, args: &str) -> ContractResult<String> {
    let input: NewAsset<K::Payload> = codec::decode(args)?;
    let asset = AssetRepo::<K>::create(ctx, input).await?;
    tracing::info!(kind = K::TAG, id = %asset.id, owner = %asset.owner, "Asset created");
    render(&asset)
}

pub async fn create_many<K: AssetKind>(ctx: &TxContext<'_>, args: &str) -> ContractResult<String> {
    let inputs: Vec<NewAsset<K::Payload>> = codec::decode(args)?;
    let assets = AssetRepo::<K>::create_many(ctx, inputs).await?;
    tracing::info!(kind = K::TAG, count = assets.len(), "Assets created");
    render(&assets)
}

pub async fn update<K: AssetKind>(ctx: &TxContext<'_>, args: &str) -> ContractResult<String> {
    let mut changes = codec::decode_object(args)?;
    let id = match changes.remove(FIELD_ID) {
        Some(Value::String(id)) => id,
        _ => return Err(ContractError::BadRequest("update requires a string id".into())),
    };
    let asset = AssetRepo::<K>::update(ctx, &id, changes).await?;
    tracing::info!(kind = K::TAG, id = %asset.id, owner = %asset.owner, "Asset updated");
    render(&asset)
}

pub async fn transfer<K: AssetKind>(ctx: &TxContext<'_>, args: &str) -> ContractResult<String> {
    let input: TransferArgs = codec::decode(args)?;
    let asset = AssetRepo::<K>::transfer(ctx, &input.id, &input.new_owner).await?;
    tracing::info!(kind = K::TAG, id = %asset.id, owner = %asset.owner, "Asset transferred");
    render(&asset)
}

pub async fn delete<K: AssetKind>(ctx: &TxContext<'_>, id: &str) -> ContractResult<String> {
    AssetRepo::<K>::delete(ctx, id).await?;
    tracing::info!(kind = K::TAG, id = %id, "Asset deleted");
    render(&DataResponse { data: id })
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

pub async fn read<K: AssetKind>(ctx: &TxContext<'_>, id: &str) -> ContractResult<String> {
    let asset = AssetRepo::<K>::read(ctx, id).await?;
    tracing::debug!(kind = K::TAG, id = %id, owner = %asset.owner, "Asset read");
    render(&asset)
}

pub async fn exists<K: AssetKind>(ctx: &TxContext<'_>, id: &str) -> ContractResult<String> {
    let exists = AssetRepo::<K>::exists(ctx, id).await?;
    tracing::debug!(kind = K::TAG, id = %id, exists, "Asset existence checked");
    render(&exists)
}

/// Parse a list filter. Blank input means the default filter; anything else
/// must be a JSON object.
pub fn parse_filter(args: &str) -> ContractResult<FilterSpec> {
    if args.trim().is_empty() {
        return Ok(FilterSpec::new());
    }
    match codec::decode::<Value>(args)? {
        value @ Value::Object(_) => Ok(codec::decode_value(value)?),
        _ => Err(CoreError::Validation("filter must be a JSON object".into()).into()),
    }
}

pub async fn list<K: AssetKind>(
    ctx: &TxContext<'_>,
    args: &str,
    config: &ContractConfig,
) -> ContractResult<String> {
    let mut filter = parse_filter(args)?;
    filter.limit = clamp_limit(filter.limit, config.default_page_limit, config.max_page_limit);

    let page = AssetRepo::<K>::list(ctx, &filter).await?;
    tracing::debug!(
        kind = K::TAG,
        count = page.items.len(),
        total = page.total,
        "Assets listed"
    );
    render(&ListResponse {
        data: K::LIST_LABEL,
        obj: page.items,
        total: page.total,
    })
}

pub async fn find_by_field<K: AssetKind>(
    ctx: &TxContext<'_>,
    args: &str,
) -> ContractResult<String> {
    let input: FindByFieldArgs = codec::decode(args)?;
    let value = match input.value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => {
            return Err(ContractError::BadRequest(
                "find-by-field value must be a string, number or boolean".into(),
            ))
        }
    };

    let found = AssetRepo::<K>::find_by_field(ctx, &input.key, &value).await?;
    tracing::debug!(kind = K::TAG, key = %input.key, count = found.len(), "Assets found by field");
    render(&found)
}

pub async fn history<K: AssetKind>(ctx: &TxContext<'_>, id: &str) -> ContractResult<String> {
    let trail = HistoryRepo::<K>::history(ctx, id).await?;
    tracing::debug!(kind = K::TAG, id = %id, count = trail.len(), "History read");
    render(&trail)
}

pub async fn latest_history<K: AssetKind>(
    ctx: &TxContext<'_>,
    id: &str,
) -> ContractResult<String> {
    let latest = HistoryRepo::<K>::latest(ctx, id).await?;
    tracing::debug!(kind = K::TAG, id = %id, found = latest.is_some(), "Latest version read");
    render(&latest)
}

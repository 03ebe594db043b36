//! Generic repository for every asset registry.
//!
//! Each kind lives in its own ledger namespace, so keys are plain asset ids.
//! Every mutating method re-reads current state, checks ownership against
//! it, and finishes with exactly one ledger write per asset.

use std::marker::PhantomData;

use agritrace_core::asset::{Asset, AssetKind, NewAsset};
use agritrace_core::codec;
use agritrace_core::constants::{
    BASE_IMMUTABLE_FIELDS, FIELD_ORG_NAME, MSG_EMPTY_ID, MSG_NOT_OWNER,
};
use agritrace_core::error::CoreError;
use agritrace_core::filter::FilterSpec;
use agritrace_core::page::{Page, SortOrder};
use agritrace_core::selector;
use serde_json::{Map, Value};

use super::query_executor::{sort_by_updated, QueryExecutor};
use crate::TxContext;

/// Provides CRUD, listing and lookup for assets of kind `K`.
pub struct AssetRepo<K>(PhantomData<K>);

impl<K: AssetKind> AssetRepo<K> {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Whether a live asset with `id` exists.
    pub async fn exists(ctx: &TxContext<'_>, id: &str) -> Result<bool, CoreError> {
        require_id(id)?;
        let state = ctx
            .ledger
            .get_state(id)
            .await
            .map_err(|e| CoreError::ledger("get state", Some(id), e))?;
        Ok(state.is_some())
    }

    pub async fn read(ctx: &TxContext<'_>, id: &str) -> Result<Asset<K::Payload>, CoreError> {
        require_id(id)?;
        let raw = ctx
            .ledger
            .get_state(id)
            .await
            .map_err(|e| CoreError::ledger("get state", Some(id), e))?
            .ok_or_else(|| CoreError::NotFound {
                kind: K::TAG,
                id: id.to_owned(),
            })?;
        codec::decode(raw)
    }

    /// One page of assets matching `filter`, oldest update first.
    ///
    /// Org-scoped kinds only list assets of the caller's organization.
    pub async fn list(
        ctx: &TxContext<'_>,
        filter: &FilterSpec,
    ) -> Result<Page<Asset<K::Payload>>, CoreError> {
        let mut query = selector::build(&K::FILTER, filter)?;
        if K::ORG_SCOPED_LIST {
            let org = ctx.identity.caller_org()?;
            query = query.and_equals(FIELD_ORG_NAME, Value::String(org));
        }
        QueryExecutor::execute(ctx, &query, filter.skip, filter.limit, SortOrder::OldestFirst)
            .await
    }

    /// Every live asset whose top-level field `key` equals `value`, newest
    /// update first.
    ///
    /// Scans the full key range. String fields compare as-is, numbers compare
    /// numerically (`7` matches a stored `7.0`) and booleans by their text.
    /// Missing, null, array and object fields never match.
    pub async fn find_by_field(
        ctx: &TxContext<'_>,
        key: &str,
        value: &str,
    ) -> Result<Vec<Asset<K::Payload>>, CoreError> {
        let records = ctx
            .ledger
            .range("", "")
            .await
            .map_err(|e| CoreError::ledger("range scan", None, e))?;

        let mut found = Vec::new();
        for record in records {
            let record = record.map_err(|e| CoreError::ledger("range scan", None, e))?;
            let fields = codec::decode_object(&record.value)?;
            let asset: Asset<K::Payload> = codec::decode(&record.value)?;
            if field_equals(fields.get(key), value) {
                found.push(asset);
            }
        }

        sort_by_updated(&mut found, SortOrder::NewestFirst);
        Ok(found)
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Create an asset owned by the caller.
    pub async fn create(
        ctx: &TxContext<'_>,
        input: NewAsset<K::Payload>,
    ) -> Result<Asset<K::Payload>, CoreError> {
        if Self::exists(ctx, &input.id).await? {
            return Err(CoreError::AlreadyExists {
                kind: K::TAG,
                id: input.id,
            });
        }
        let asset = Self::stamp(ctx, input)?;
        Self::put(ctx, &asset).await?;
        Ok(asset)
    }

    /// Create several assets at once.
    ///
    /// Every entry is checked (non-empty id, unique within the batch, not
    /// already live) before the first write, so an invalid batch writes
    /// nothing.
    pub async fn create_many(
        ctx: &TxContext<'_>,
        inputs: Vec<NewAsset<K::Payload>>,
    ) -> Result<Vec<Asset<K::Payload>>, CoreError> {
        let mut seen = std::collections::HashSet::new();
        for input in &inputs {
            if !seen.insert(input.id.as_str()) {
                return Err(CoreError::Validation(format!(
                    "duplicate {} id {} in batch",
                    K::TAG,
                    input.id
                )));
            }
            if Self::exists(ctx, &input.id).await? {
                return Err(CoreError::AlreadyExists {
                    kind: K::TAG,
                    id: input.id.clone(),
                });
            }
        }

        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            let asset = Self::stamp(ctx, input)?;
            Self::put(ctx, &asset).await?;
            created.push(asset);
        }
        Ok(created)
    }

    /// Overlay `changes` onto the current record.
    ///
    /// Envelope fields and the kind's immutable fields are left untouched;
    /// keys the payload does not know are dropped.
    pub async fn update(
        ctx: &TxContext<'_>,
        id: &str,
        changes: Map<String, Value>,
    ) -> Result<Asset<K::Payload>, CoreError> {
        let current = Self::read(ctx, id).await?;
        require_owner(ctx, &current)?;

        let mut merged = codec::encode_object(&current)?;
        for (field, value) in changes {
            if BASE_IMMUTABLE_FIELDS.contains(&field.as_str())
                || K::IMMUTABLE_ON_UPDATE.contains(&field.as_str())
            {
                continue;
            }
            merged.insert(field, value);
        }

        let mut updated: Asset<K::Payload> = codec::decode_value(Value::Object(merged))?;
        updated.updated_at = ctx.now();
        Self::put(ctx, &updated).await?;
        Ok(updated)
    }

    /// Hand the asset over to `new_owner`. Only the owner changes, so the
    /// asset keeps its place in `updatedAt` ordering.
    pub async fn transfer(
        ctx: &TxContext<'_>,
        id: &str,
        new_owner: &str,
    ) -> Result<Asset<K::Payload>, CoreError> {
        if new_owner.is_empty() {
            return Err(CoreError::Validation("new owner must not be empty".into()));
        }
        let mut asset = Self::read(ctx, id).await?;
        require_owner(ctx, &asset)?;

        asset.owner = new_owner.to_owned();
        Self::put(ctx, &asset).await?;
        Ok(asset)
    }

    pub async fn delete(ctx: &TxContext<'_>, id: &str) -> Result<(), CoreError> {
        let asset = Self::read(ctx, id).await?;
        require_owner(ctx, &asset)?;
        ctx.ledger
            .del_state(id)
            .await
            .map_err(|e| CoreError::ledger("delete state", Some(id), e))
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn stamp(
        ctx: &TxContext<'_>,
        input: NewAsset<K::Payload>,
    ) -> Result<Asset<K::Payload>, CoreError> {
        require_id(&input.id)?;
        let now = ctx.now();
        Ok(Asset {
            id: input.id,
            owner: ctx.identity.caller_id()?,
            org_name: ctx.identity.caller_org()?,
            created_at: now,
            updated_at: now,
            payload: input.payload,
        })
    }

    async fn put(ctx: &TxContext<'_>, asset: &Asset<K::Payload>) -> Result<(), CoreError> {
        let bytes = codec::encode(asset)?;
        ctx.ledger
            .put_state(&asset.id, bytes)
            .await
            .map_err(|e| CoreError::ledger("put state", Some(&asset.id), e))
    }
}

pub(crate) fn require_id(id: &str) -> Result<(), CoreError> {
    if id.is_empty() {
        return Err(CoreError::Validation(MSG_EMPTY_ID.into()));
    }
    Ok(())
}

fn require_owner<P>(ctx: &TxContext<'_>, asset: &Asset<P>) -> Result<(), CoreError> {
    if ctx.identity.caller_id()? != asset.owner {
        return Err(CoreError::Unauthorized(MSG_NOT_OWNER.into()));
    }
    Ok(())
}

fn field_equals(field: Option<&Value>, expected: &str) -> bool {
    match field {
        Some(Value::String(s)) => s == expected,
        Some(Value::Number(n)) => match (n.as_f64(), expected.trim().parse::<f64>()) {
            (Some(stored), Ok(wanted)) => stored == wanted,
            _ => n.to_string() == expected,
        },
        Some(Value::Bool(b)) => b.to_string() == expected,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agritrace_core::identity::StaticIdentity;
    use agritrace_core::types::FixedClock;
    use assert_matches::assert_matches;
    use serde_json::json;

    use crate::ledger::MemoryLedger;
    use crate::models::gap::{GapKind, GapPayload};

    type Repo = AssetRepo<GapKind>;

    fn gap(cert_id: &str, area_rai: f64) -> GapPayload {
        GapPayload {
            cert_id: cert_id.into(),
            area_rai,
            farmer_id: "F-1".into(),
            ..GapPayload::default()
        }
    }

    // -- field_equals --------------------------------------------------------

    #[test]
    fn scalar_fields_compare_by_value() {
        assert!(field_equals(Some(&json!("Chiang Mai")), "Chiang Mai"));
        assert!(field_equals(Some(&json!(12.5)), "12.5"));
        assert!(field_equals(Some(&json!(7.0)), "7"));
        assert!(field_equals(Some(&json!(7)), "7.0"));
        assert!(!field_equals(Some(&json!(7.0)), "7.5"));
        assert!(!field_equals(Some(&json!(7.0)), "seven"));
        assert!(field_equals(Some(&json!(true)), "true"));
        assert!(!field_equals(Some(&json!(["x"])), "x"));
        assert!(!field_equals(Some(&Value::Null), "null"));
        assert!(!field_equals(None, ""));
    }

    // -- update --------------------------------------------------------------

    #[tokio::test]
    async fn update_keeps_envelope_and_immutable_fields() {
        let ledger = MemoryLedger::new();
        let owner = StaticIdentity::new("u1", "Org1MSP");
        let created_clock = FixedClock::at_unix(1_000);
        let ctx = TxContext::new(&ledger, &owner).with_clock(&created_clock);
        Repo::create(&ctx, NewAsset::new("G-1", gap("C-1", 4.0)))
            .await
            .unwrap();

        let later = FixedClock::at_unix(2_000);
        let ctx = ctx.with_clock(&later);
        let changes = json!({
            "areaRai": 9.5,
            "farmerId": "F-2",
            "owner": "mallory",
            "createdAt": "1999-01-01T00:00:00Z",
            "unknownField": 1
        });
        let Value::Object(changes) = changes else {
            unreachable!()
        };
        let updated = Repo::update(&ctx, "G-1", changes).await.unwrap();

        assert_eq!(updated.payload.area_rai, 9.5);
        assert_eq!(updated.payload.farmer_id, "F-1");
        assert_eq!(updated.owner, "u1");
        assert_eq!(updated.created_at.timestamp(), 1_000);
        assert_eq!(updated.updated_at.timestamp(), 2_000);
        assert_eq!(Repo::read(&ctx, "G-1").await.unwrap(), updated);
    }

    #[tokio::test]
    async fn update_with_wrong_type_is_decode_error() {
        let ledger = MemoryLedger::new();
        let owner = StaticIdentity::new("u1", "Org1MSP");
        let ctx = TxContext::new(&ledger, &owner);
        Repo::create(&ctx, NewAsset::new("G-1", gap("C-1", 4.0)))
            .await
            .unwrap();

        let mut changes = Map::new();
        changes.insert("areaRai".into(), json!("wide"));
        assert_matches!(
            Repo::update(&ctx, "G-1", changes).await,
            Err(CoreError::Decode(_))
        );
    }

    // -- create_many ---------------------------------------------------------

    #[tokio::test]
    async fn batch_with_duplicate_ids_writes_nothing() {
        let ledger = MemoryLedger::new();
        let owner = StaticIdentity::new("u1", "Org1MSP");
        let ctx = TxContext::new(&ledger, &owner);

        let result = Repo::create_many(
            &ctx,
            vec![
                NewAsset::new("G-1", gap("C-1", 1.0)),
                NewAsset::new("G-2", gap("C-2", 2.0)),
                NewAsset::new("G-1", gap("C-3", 3.0)),
            ],
        )
        .await;
        assert_matches!(result, Err(CoreError::Validation(_)));
        assert_eq!(ledger.live_keys(), 0);
    }

    #[tokio::test]
    async fn batch_with_empty_id_writes_nothing() {
        let ledger = MemoryLedger::new();
        let owner = StaticIdentity::new("u1", "Org1MSP");
        let ctx = TxContext::new(&ledger, &owner);

        let result = Repo::create_many(
            &ctx,
            vec![
                NewAsset::new("G-1", gap("C-1", 1.0)),
                NewAsset::new("", gap("C-2", 2.0)),
            ],
        )
        .await;
        assert_matches!(result, Err(CoreError::Validation(_)));
        assert_eq!(ledger.live_keys(), 0);
    }

    // -- find_by_field -------------------------------------------------------

    #[tokio::test]
    async fn find_by_numeric_field() {
        let ledger = MemoryLedger::new();
        let owner = StaticIdentity::new("u1", "Org1MSP");
        let ctx = TxContext::new(&ledger, &owner);
        Repo::create_many(
            &ctx,
            vec![
                NewAsset::new("G-1", gap("C-1", 2.5)),
                NewAsset::new("G-2", gap("C-2", 7.0)),
            ],
        )
        .await
        .unwrap();

        let found = Repo::find_by_field(&ctx, "areaRai", "2.5").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "G-1");
        let found = Repo::find_by_field(&ctx, "areaRai", "7").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "G-2");
        assert!(Repo::find_by_field(&ctx, "noSuchField", "2.5")
            .await
            .unwrap()
            .is_empty());
        assert_eq!(ledger.open_cursors(), 0);
    }
}

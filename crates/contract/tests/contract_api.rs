//! Integration tests for the JSON contract boundary.
//!
//! Drives `Contract::invoke` end to end over per-kind in-process ledgers:
//! - Envelope shapes for list, history and errors
//! - Argument conventions per operation
//! - Page limit clamping from configuration

use agritrace_contract::config::ContractConfig;
use agritrace_contract::{Contract, ContractError};
use agritrace_core::error::CoreError;
use agritrace_core::identity::StaticIdentity;
use agritrace_db::ledger::MemoryLedger;
use agritrace_db::TxContext;
use assert_matches::assert_matches;
use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_else(|e| panic!("invalid JSON {body}: {e}"))
}

async fn call(
    contract: &Contract,
    ledger: &MemoryLedger,
    identity: &StaticIdentity,
    kind: &str,
    operation: &str,
    args: &str,
) -> Result<Value, ContractError> {
    let ctx = TxContext::new(ledger, identity);
    contract
        .invoke(&ctx, kind, operation, args)
        .await
        .map(|body| parse(&body))
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[tokio::test]
async fn farmer_lifecycle_through_contract() {
    let contract = Contract::new(ContractConfig::default());
    let ledger = MemoryLedger::new();
    let u1 = StaticIdentity::new("u1", "Org1MSP");

    let created = call(&contract, &ledger, &u1, "farmer", "Create", r#"{"id":"F-1","certId":"C-1"}"#)
        .await
        .unwrap();
    assert_eq!(created["owner"], "u1");
    assert_eq!(created["orgName"], "Org1MSP");
    assert_eq!(created["createdAt"], created["updatedAt"]);

    let exists = call(&contract, &ledger, &u1, "farmer", "Exists", "F-1").await.unwrap();
    assert_eq!(exists, json!(true));

    let read = call(&contract, &ledger, &u1, "farmer", "Read", "F-1").await.unwrap();
    assert_eq!(read, created);

    let updated = call(&contract, &ledger, &u1, "farmer", "Update", r#"{"id":"F-1","certId":"C-2"}"#)
        .await
        .unwrap();
    assert_eq!(updated["certId"], "C-2");

    let moved = call(
        &contract,
        &ledger,
        &u1,
        "farmer",
        "Transfer",
        r#"{"id":"F-1","newOwner":"u2"}"#,
    )
    .await
    .unwrap();
    assert_eq!(moved["owner"], "u2");

    let u2 = StaticIdentity::new("u2", "Org2MSP");
    let deleted = call(&contract, &ledger, &u2, "farmer", "Delete", "F-1").await.unwrap();
    assert_eq!(deleted, json!({"data": "F-1"}));

    let trail = call(&contract, &ledger, &u1, "farmer", "History", "F-1").await.unwrap();
    let trail = trail.as_array().unwrap();
    assert_eq!(trail.len(), 4);
    assert_eq!(trail[3]["isDelete"], true);
    assert_eq!(trail[3]["value"], json!([]));
    assert!(trail[0]["tx_id"].is_string());
}

#[tokio::test]
async fn non_owner_update_maps_to_unauthorized_code() {
    let contract = Contract::new(ContractConfig::default());
    let ledger = MemoryLedger::new();
    let u1 = StaticIdentity::new("u1", "Org1MSP");
    let u2 = StaticIdentity::new("u2", "Org1MSP");

    call(&contract, &ledger, &u1, "gmp", "Create", r#"{"id":"M-1","name":"North House"}"#)
        .await
        .unwrap();
    let err = call(&contract, &ledger, &u2, "gmp", "Update", r#"{"id":"M-1","name":"Mine"}"#)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "UNAUTHORIZED");
    assert_eq!(
        parse(&err.to_envelope()),
        json!({
            "error": "client is not authorized this asset: submitting client does not own the asset",
            "code": "UNAUTHORIZED"
        })
    );
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_envelope_uses_kind_label() {
    let contract = Contract::new(ContractConfig::default());
    let ledger = MemoryLedger::new();
    let u1 = StaticIdentity::new("u1", "Org1MSP");

    let empty = call(&contract, &ledger, &u1, "staff", "List", "").await.unwrap();
    assert_eq!(empty, json!({"data": "All NstdaStaff", "obj": [], "total": 0}));

    call(
        &contract,
        &ledger,
        &u1,
        "staff",
        "CreateMany",
        r#"[{"id":"S-1","certId":"A"},{"id":"S-2","certId":"B"}]"#,
    )
    .await
    .unwrap();
    let page = call(&contract, &ledger, &u1, "staff", "List", r#"{"certId":"B"}"#)
        .await
        .unwrap();
    assert_eq!(page["total"], 1);
    assert_eq!(page["obj"][0]["id"], "S-2");
}

#[tokio::test]
async fn configured_max_limit_caps_page() {
    let config = ContractConfig {
        max_page_limit: 2,
        ..ContractConfig::default()
    };
    let contract = Contract::new(config);
    let ledger = MemoryLedger::new();
    let u1 = StaticIdentity::new("u1", "Org1MSP");

    let batch: Vec<Value> = (1..=5)
        .map(|i| json!({"id": format!("E-{i}"), "certId": format!("C-{i}")}))
        .collect();
    call(
        &contract,
        &ledger,
        &u1,
        "exporter",
        "CreateMany",
        &Value::Array(batch).to_string(),
    )
    .await
    .unwrap();

    let page = call(&contract, &ledger, &u1, "exporter", "List", r#"{"limit":50}"#)
        .await
        .unwrap();
    assert_eq!(page["total"], 5);
    assert_eq!(page["obj"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn skip_past_total_reports_code() {
    let contract = Contract::new(ContractConfig::default());
    let ledger = MemoryLedger::new();
    let u1 = StaticIdentity::new("u1", "Org1MSP");

    let err = call(&contract, &ledger, &u1, "regulator", "List", r#"{"skip":1}"#)
        .await
        .unwrap_err();
    assert_eq!(err.code(), "SKIP_EXCEEDS_TOTAL");
}

#[tokio::test]
async fn list_criteria_must_be_scalars() {
    let contract = Contract::new(ContractConfig::default());
    let ledger = MemoryLedger::new();
    let u1 = StaticIdentity::new("u1", "Org1MSP");

    call(
        &contract,
        &ledger,
        &u1,
        "farmer",
        "CreateMany",
        r#"[{"id":"F-1","certId":"C-1"},{"id":"F-2","certId":"C-2"}]"#,
    )
    .await
    .unwrap();

    for filter in [
        r#"{"certId":{"$ne":"nope"}}"#,
        r#"{"certId":{"$where":"1"}}"#,
        r#"{"certId":["C-1"]}"#,
        r#"{"search":5}"#,
    ] {
        let err = call(&contract, &ledger, &u1, "farmer", "List", filter)
            .await
            .unwrap_err();
        assert_eq!(err.code(), "DECODE_ERROR", "{filter}");
    }
    assert_eq!(ledger.open_cursors(), 0);

    let page = call(&contract, &ledger, &u1, "farmer", "List", r#"{"certId":"C-2"}"#)
        .await
        .unwrap();
    assert_eq!(page["total"], 1);
    assert_eq!(page["obj"][0]["id"], "F-2");
}

#[tokio::test]
async fn find_by_field_accepts_scalar_values() {
    let contract = Contract::new(ContractConfig::default());
    let ledger = MemoryLedger::new();
    let u1 = StaticIdentity::new("u1", "Org1MSP");

    call(
        &contract,
        &ledger,
        &u1,
        "gap",
        "CreateMany",
        r#"[{"id":"G-1","areaRai":3.5,"province":"Lamphun"},{"id":"G-2","areaRai":7,"province":"Lamphun"}]"#,
    )
    .await
    .unwrap();

    let found = call(
        &contract,
        &ledger,
        &u1,
        "gap",
        "FindByField",
        r#"{"key":"areaRai","value":3.5}"#,
    )
    .await
    .unwrap();
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["id"], "G-1");

    for whole in [r#"{"key":"areaRai","value":7}"#, r#"{"key":"areaRai","value":"7"}"#] {
        let found = call(&contract, &ledger, &u1, "gap", "FindByField", whole)
            .await
            .unwrap();
        assert_eq!(found.as_array().unwrap().len(), 1, "{whole}");
        assert_eq!(found[0]["id"], "G-2");
    }

    let err = call(
        &contract,
        &ledger,
        &u1,
        "gap",
        "FindByField",
        r#"{"key":"province","value":["Lamphun"]}"#,
    )
    .await
    .unwrap_err();
    assert_matches!(err, ContractError::BadRequest(_));
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[tokio::test]
async fn latest_history_orders_packing_steps() {
    let contract = Contract::new(ContractConfig::default());
    let ledger = MemoryLedger::new();
    let u1 = StaticIdentity::new("u1", "Org1MSP");

    call(
        &contract,
        &ledger,
        &u1,
        "packing",
        "Create",
        r#"{"id":"PK-1","processSteps":[{"step":1,"status":"received"},{"step":2,"status":"packed"}]}"#,
    )
    .await
    .unwrap();

    let latest = call(&contract, &ledger, &u1, "packing", "LatestHistory", "PK-1")
        .await
        .unwrap();
    assert_eq!(latest["value"][0]["processSteps"][0]["step"], 2);
    assert_eq!(latest["value"][0]["processSteps"][1]["step"], 1);

    let none = call(&contract, &ledger, &u1, "packing", "LatestHistory", "PK-404")
        .await
        .unwrap();
    assert_eq!(none, Value::Null);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dispatch_errors() {
    let contract = Contract::new(ContractConfig::default());
    let ledger = MemoryLedger::new();
    let u1 = StaticIdentity::new("u1", "Org1MSP");

    assert_matches!(
        call(&contract, &ledger, &u1, "cow", "Read", "X").await,
        Err(ContractError::UnknownKind(_))
    );
    assert_matches!(
        call(&contract, &ledger, &u1, "farmer", "Explode", "X").await,
        Err(ContractError::UnknownOperation(_))
    );
    assert_matches!(
        call(&contract, &ledger, &u1, "farmer", "Create", "{not json").await,
        Err(ContractError::Core(CoreError::Decode(_)))
    );
    assert_matches!(
        call(&contract, &ledger, &u1, "farmer", "Update", r#"{"certId":"C-1"}"#).await,
        Err(ContractError::BadRequest(_))
    );
}

#[tokio::test]
async fn ledger_outage_reports_code_and_releases_cursors() {
    let contract = Contract::new(ContractConfig::default());
    let ledger = MemoryLedger::new();
    let u1 = StaticIdentity::new("u1", "Org1MSP");

    ledger.set_available(false);
    let err = call(&contract, &ledger, &u1, "packer", "List", "{}")
        .await
        .unwrap_err();
    assert_eq!(err.code(), "LEDGER_UNAVAILABLE");
    assert_eq!(ledger.open_cursors(), 0);
}

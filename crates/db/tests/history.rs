//! Integration tests for audit-trail reconstruction.

use agritrace_core::asset::NewAsset;
use agritrace_core::identity::StaticIdentity;
use agritrace_core::types::FixedClock;
use agritrace_db::ledger::MemoryLedger;
use agritrace_db::models::packing::{PackingKind, PackingPayload, ProcessStep};
use agritrace_db::repositories::{AssetRepo, HistoryRepo};
use agritrace_db::TxContext;
use serde_json::json;
use std::sync::Arc;

fn step(step: u64, status: &str) -> ProcessStep {
    ProcessStep {
        step,
        status: status.to_string(),
        ..ProcessStep::default()
    }
}

#[tokio::test]
async fn trail_carries_each_version_once_with_ledger_timestamps() {
    let ledger = MemoryLedger::with_clock(Arc::new(FixedClock::at_unix(1_700_000_000)));
    let u1 = StaticIdentity::new("u1", "Org1MSP");
    let ctx = TxContext::new(&ledger, &u1);

    AssetRepo::<PackingKind>::create(
        &ctx,
        NewAsset::new(
            "PK-1",
            PackingPayload {
                process_steps: vec![step(1, "received")],
                ..PackingPayload::default()
            },
        ),
    )
    .await
    .unwrap();
    let serde_json::Value::Object(changes) = json!({"remark": "second"}) else {
        unreachable!()
    };
    AssetRepo::<PackingKind>::update(&ctx, "PK-1", changes)
        .await
        .unwrap();

    let trail = HistoryRepo::<PackingKind>::history(&ctx, "PK-1").await.unwrap();
    assert_eq!(trail.len(), 2);
    assert!(trail.iter().all(|v| v.value.len() == 1 && !v.is_delete));
    assert!(trail.iter().all(|v| v.timestamp == "2023-11-14T22:13:20Z"));
    assert_eq!(trail[0].value[0].payload.remark, "");
    assert_eq!(trail[1].value[0].payload.remark, "second");
    assert_ne!(trail[0].tx_id, trail[1].tx_id);
}

#[tokio::test]
async fn latest_orders_packing_steps_newest_first() {
    let ledger = MemoryLedger::new();
    let u1 = StaticIdentity::new("u1", "Org1MSP");
    let ctx = TxContext::new(&ledger, &u1);

    AssetRepo::<PackingKind>::create(
        &ctx,
        NewAsset::new(
            "PK-1",
            PackingPayload {
                process_steps: vec![step(1, "received")],
                ..PackingPayload::default()
            },
        ),
    )
    .await
    .unwrap();
    let serde_json::Value::Object(changes) = json!({
        "processSteps": [
            {"step": 1, "status": "received"},
            {"step": 2, "status": "packed"},
            {"step": 3, "status": "shipped"}
        ]
    }) else {
        unreachable!()
    };
    AssetRepo::<PackingKind>::update(&ctx, "PK-1", changes)
        .await
        .unwrap();

    let latest = HistoryRepo::<PackingKind>::latest(&ctx, "PK-1")
        .await
        .unwrap()
        .expect("packing has history");
    let steps: Vec<u64> = latest.value[0]
        .payload
        .process_steps
        .iter()
        .map(|s| s.step)
        .collect();
    assert_eq!(steps, vec![3, 2, 1]);

    // The stored record keeps its own order.
    let stored = AssetRepo::<PackingKind>::read(&ctx, "PK-1").await.unwrap();
    assert_eq!(stored.payload.process_steps[0].step, 1);
}

#[tokio::test]
async fn latest_after_delete_is_the_tombstone() {
    let ledger = MemoryLedger::new();
    let u1 = StaticIdentity::new("u1", "Org1MSP");
    let ctx = TxContext::new(&ledger, &u1);

    AssetRepo::<PackingKind>::create(&ctx, NewAsset::new("PK-1", PackingPayload::default()))
        .await
        .unwrap();
    AssetRepo::<PackingKind>::delete(&ctx, "PK-1").await.unwrap();

    let latest = HistoryRepo::<PackingKind>::latest(&ctx, "PK-1")
        .await
        .unwrap()
        .expect("deleted key keeps its history");
    assert!(latest.is_delete);
    assert!(latest.value.is_empty());
}

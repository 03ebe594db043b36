//! Local runner: reads one invocation per stdin line and writes one JSON
//! result per stdout line.
//!
//! Each asset kind gets its own in-process ledger namespace for the lifetime
//! of the process.

use std::collections::HashMap;

use agritrace_core::identity::StaticIdentity;
use agritrace_db::ledger::MemoryLedger;
use agritrace_db::TxContext;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agritrace_contract::config::ContractConfig;
use agritrace_contract::{Contract, ContractError, Invocation};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ContractConfig::from_env();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "agritrace_contract=debug,agritrace_db=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    if config.log_json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
    tracing::info!(
        caller = %config.caller_id,
        org = %config.caller_org,
        max_page_limit = config.max_page_limit,
        "Loaded contract configuration"
    );

    // --- Ledgers ---
    let contract = Contract::new(config.clone());
    let ledgers: HashMap<&'static str, MemoryLedger> = contract
        .registry()
        .tags()
        .map(|tag| (tag, MemoryLedger::new()))
        .collect();
    let identity = StaticIdentity::new(config.caller_id.clone(), config.caller_org.clone());
    tracing::info!(kinds = ledgers.len(), "Ledger namespaces ready");

    // --- Invocation loop ---
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let output = match run(&contract, &ledgers, &identity, &line).await {
            Ok(body) => body,
            Err(err) => err.to_envelope(),
        };
        stdout.write_all(output.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    tracing::info!("Input closed, exiting");
    Ok(())
}

async fn run(
    contract: &Contract,
    ledgers: &HashMap<&'static str, MemoryLedger>,
    identity: &StaticIdentity,
    line: &str,
) -> Result<String, ContractError> {
    let call: Invocation = serde_json::from_str(line)
        .map_err(|e| ContractError::BadRequest(format!("invalid invocation: {e}")))?;
    let ledger = ledgers
        .get(call.kind.as_str())
        .ok_or_else(|| ContractError::UnknownKind(call.kind.clone()))?;

    let ctx = TxContext::new(ledger, identity);
    contract
        .invoke(&ctx, &call.kind, &call.operation, &call.args_text())
        .await
}

use agritrace_core::error::CoreError;
use agritrace_db::TxContext;
use serde::Deserialize;
use serde_json::Value;

use crate::config::ContractConfig;
use crate::error::{ContractError, ContractResult};
use crate::operation::Operation;
use crate::registry::KindRegistry;

/// Entry point for every registry call.
pub struct Contract {
    registry: KindRegistry,
    config: ContractConfig,
}

impl Contract {
    /// Contract over every built-in kind.
    pub fn new(config: ContractConfig) -> Self {
        Self::with_registry(KindRegistry::default(), config)
    }

    pub fn with_registry(registry: KindRegistry, config: ContractConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &KindRegistry {
        &self.registry
    }

    /// Run `operation` on the `kind` registry.
    ///
    /// `ctx` must be bound to that kind's own ledger namespace.
    pub async fn invoke(
        &self,
        ctx: &TxContext<'_>,
        kind: &str,
        operation: &str,
        args: &str,
    ) -> ContractResult<String> {
        let handler = self.registry.get(kind)?;
        let operation: Operation = operation.parse()?;

        let result = handler.handle(ctx, operation, args, &self.config).await;
        if let Err(err) = &result {
            log_failure(kind, operation, err);
        }
        result
    }
}

fn log_failure(kind: &str, operation: Operation, err: &ContractError) {
    match err {
        ContractError::Core(CoreError::Unauthorized(msg)) => {
            tracing::warn!(kind, %operation, error = %msg, "Authorization denied");
        }
        ContractError::Core(CoreError::LedgerUnavailable { .. }) => {
            tracing::error!(kind, %operation, error = %err, "Ledger failure");
        }
        _ => {
            tracing::debug!(kind, %operation, code = err.code(), error = %err, "Invocation failed");
        }
    }
}

// ---------------------------------------------------------------------------
// Invocation
// ---------------------------------------------------------------------------

/// One call as read by the binary: `{"kind", "operation", "args"}`.
///
/// `args` may be a JSON string (passed through verbatim) or any other JSON
/// value (passed as its serialized text). Absent args mean the empty string.
#[derive(Debug, Clone, Deserialize)]
pub struct Invocation {
    pub kind: String,
    pub operation: String,
    #[serde(default)]
    pub args: Value,
}

impl Invocation {
    pub fn args_text(&self) -> String {
        match &self.args {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

use agritrace_core::error::CoreError;
use serde_json::json;

/// Error type for contract invocations.
///
/// Wraps [`CoreError`] for domain errors and adds dispatch-level variants.
#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    /// A domain-level error from `agritrace_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("unknown asset kind: {0}")]
    UnknownKind(String),

    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// Malformed invocation arguments.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type ContractResult<T> = Result<T, ContractError>;

impl ContractError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ContractError::Core(core) => match core {
                CoreError::Decode(_) => "DECODE_ERROR",
                CoreError::NotFound { .. } => "NOT_FOUND",
                CoreError::AlreadyExists { .. } => "ALREADY_EXISTS",
                CoreError::Unauthorized(_) => "UNAUTHORIZED",
                CoreError::SkipExceedsTotal { .. } => "SKIP_EXCEEDS_TOTAL",
                CoreError::LedgerUnavailable { .. } => "LEDGER_UNAVAILABLE",
                CoreError::InvalidQuery { .. } => "INVALID_QUERY",
                CoreError::Validation(_) => "VALIDATION_ERROR",
            },
            ContractError::UnknownKind(_)
            | ContractError::UnknownOperation(_)
            | ContractError::BadRequest(_) => "BAD_REQUEST",
        }
    }

    /// `{"error": message, "code": code}`.
    pub fn to_envelope(&self) -> String {
        json!({
            "error": self.to_string(),
            "code": self.code(),
        })
        .to_string()
    }
}

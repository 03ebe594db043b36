use crate::ledger::LedgerError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("unmarshal json string: {0}")]
    Decode(String),

    #[error("the {kind} {id} does not exist")]
    NotFound { kind: &'static str, id: String },

    #[error("the {kind} {id} already exists")]
    AlreadyExists { kind: &'static str, id: String },

    #[error("client is not authorized this asset: {0}")]
    Unauthorized(String),

    #[error("skip over total data: skip {skip} exceeds total {total}")]
    SkipExceedsTotal { skip: u64, total: u64 },

    #[error("ledger unavailable during {operation}{}: {source}", key_suffix(.key))]
    LedgerUnavailable {
        operation: &'static str,
        key: Option<String>,
        #[source]
        source: LedgerError,
    },

    #[error("invalid query during {operation}: {source}")]
    InvalidQuery {
        operation: &'static str,
        #[source]
        source: LedgerError,
    },

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl CoreError {
    /// Wrap a ledger failure with the operation (and key, if any) it interrupted.
    ///
    /// A rejected query document is the caller's fault, not an outage.
    pub fn ledger(operation: &'static str, key: Option<&str>, source: LedgerError) -> Self {
        match source {
            LedgerError::Query(_) => CoreError::InvalidQuery { operation, source },
            LedgerError::Io(_) => CoreError::LedgerUnavailable {
                operation,
                key: key.map(str::to_owned),
                source,
            },
        }
    }
}

fn key_suffix(key: &Option<String>) -> String {
    match key {
        Some(k) => format!(" of {k}"),
        None => String::new(),
    }
}

//! Identity port: who is calling, and for which organization.

use crate::error::CoreError;

pub trait Identity: Send + Sync {
    /// Stable identifier of the calling principal.
    fn caller_id(&self) -> Result<String, CoreError>;

    /// Organization (MSP) tag of the calling principal.
    fn caller_org(&self) -> Result<String, CoreError>;
}

/// Fixed caller, for local runs and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticIdentity {
    pub id: String,
    pub org: String,
}

impl StaticIdentity {
    pub fn new(id: impl Into<String>, org: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            org: org.into(),
        }
    }
}

impl Identity for StaticIdentity {
    fn caller_id(&self) -> Result<String, CoreError> {
        if self.id.is_empty() {
            return Err(CoreError::Unauthorized(
                "failed to read client identity".into(),
            ));
        }
        Ok(self.id.clone())
    }

    fn caller_org(&self) -> Result<String, CoreError> {
        if self.org.is_empty() {
            return Err(CoreError::Unauthorized(
                "failed to read client organization".into(),
            ));
        }
        Ok(self.org.clone())
    }
}

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid expiry: {0}")]
    InvalidExpiry(String),

    #[error("Rule store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Rule not found: {0}")]
    RuleNotFound(i64),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Pattern '{0}' is already blocked")]
    RuleAlreadyExists(String),

    #[error("Block check timed out after {0} ms")]
    CheckTimeout(u64),
}

impl DomainError {
    /// Validation failures are the caller's fault and are not logged as system errors.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidPattern(_)
                | DomainError::InvalidExpiry(_)
                | DomainError::RuleAlreadyExists(_)
        )
    }
}

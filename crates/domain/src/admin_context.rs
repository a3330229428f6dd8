use crate::errors::DomainError;
use std::sync::Arc;

/// An already-authorized administrative principal.
///
/// The core never authenticates; whoever builds an `AdminContext` vouches that
/// the principal holds block-management rights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminContext {
    principal: Arc<str>,
}

impl AdminContext {
    pub fn new(principal: &str) -> Result<Self, DomainError> {
        let principal = principal.trim();
        if principal.is_empty() {
            return Err(DomainError::PermissionDenied(
                "an administrative principal is required".to_string(),
            ));
        }
        Ok(Self {
            principal: Arc::from(principal),
        })
    }

    pub fn principal(&self) -> &Arc<str> {
        &self.principal
    }
}

use crate::errors::ApiError;
use axum::{extract::FromRequestParts, http::request::Parts};
use regexblock_domain::{AdminContext, DomainError};

/// Header through which the fronting host passes the already authorized
/// principal.
pub const PRINCIPAL_HEADER: &str = "X-Regexblock-Principal";

pub struct Principal(pub AdminContext);

impl<S: Send + Sync> FromRequestParts<S> for Principal {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(PRINCIPAL_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ApiError(DomainError::PermissionDenied(format!(
                    "missing {} header",
                    PRINCIPAL_HEADER
                )))
            })?;

        Ok(Principal(AdminContext::new(value)?))
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use regexblock_domain::DomainError;
use serde_json::json;

pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            DomainError::InvalidPattern(_) | DomainError::InvalidExpiry(_) => {
                (StatusCode::BAD_REQUEST, self.0.to_string())
            }

            DomainError::RuleAlreadyExists(_) => (StatusCode::CONFLICT, self.0.to_string()),

            DomainError::NotFound(_) | DomainError::RuleNotFound(_) => {
                (StatusCode::NOT_FOUND, self.0.to_string())
            }

            DomainError::PermissionDenied(_) => (StatusCode::FORBIDDEN, self.0.to_string()),

            DomainError::StoreUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "rule store unavailable".to_string(),
            ),

            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error".to_string(),
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

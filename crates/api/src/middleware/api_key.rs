use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::{Method, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::warn;

pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Guards every non-GET route when an API key is configured, the host's
/// `POST /check` included.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if is_safe_method(request.method()) {
        return Ok(next.run(request).await);
    }
    match state.api_key.as_deref() {
        None => Ok(next.run(request).await),
        Some(expected) => {
            let provided = request
                .headers()
                .get(API_KEY_HEADER)
                .and_then(|v| v.to_str().ok())
                .ok_or(StatusCode::UNAUTHORIZED)?;
            if !timing_safe_eq(provided.as_bytes(), expected.as_bytes()) {
                warn!(path = %request.uri().path(), "Rejected request with wrong API key");
                return Err(StatusCode::UNAUTHORIZED);
            }
            Ok(next.run(request).await)
        }
    }
}

pub fn is_safe_method(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

pub fn timing_safe_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

use axum::{extract::State, response::Json, routing::post, Router};

use crate::{
    dto::{UnblockRequest, UnblockResponse},
    errors::ApiError,
    middleware::Principal,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/unblock", post(unblock))
}

/// An absent pattern is reported as `fail`, not as an error.
async fn unblock(
    State(state): State<AppState>,
    Principal(ctx): Principal,
    Json(req): Json<UnblockRequest>,
) -> Result<Json<UnblockResponse>, ApiError> {
    let removed = state.rules.delete_rule.execute(&ctx, &req.pattern).await?;
    Ok(Json(UnblockResponse::from_removed(removed)))
}

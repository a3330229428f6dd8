use axum::{extract::State, response::Json, routing::get, Router};
use tracing::info;

use crate::{
    dto::{ReadOnlyRequest, ReadOnlyResponse},
    middleware::Principal,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/read-only", get(get_read_only).put(set_read_only))
}

async fn get_read_only(State(state): State<AppState>) -> Json<ReadOnlyResponse> {
    Json(ReadOnlyResponse {
        read_only: state.check_block.is_read_only(),
    })
}

async fn set_read_only(
    State(state): State<AppState>,
    Principal(ctx): Principal,
    Json(req): Json<ReadOnlyRequest>,
) -> Json<ReadOnlyResponse> {
    state.check_block.set_read_only(req.enabled);
    info!(principal = %ctx.principal(), read_only = req.enabled, "Read-only mode toggled");
    Json(ReadOnlyResponse {
        read_only: state.check_block.is_read_only(),
    })
}

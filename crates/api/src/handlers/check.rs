use axum::{extract::State, response::Json, routing::post, Router};
use tracing::instrument;

use crate::{
    dto::{CheckRequest, DecisionResponse},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/check", post(check_block))
}

/// Always answers 200: the evaluator fails open on its own.
#[instrument(skip(state, req), name = "api_check_block")]
async fn check_block(
    State(state): State<AppState>,
    Json(req): Json<CheckRequest>,
) -> Json<DecisionResponse> {
    let decision = state
        .check_block
        .execute(&req.name, &req.address, req.exempt)
        .await;
    Json(DecisionResponse::from_domain(decision))
}

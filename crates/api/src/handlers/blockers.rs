use axum::{extract::State, response::Json, routing::get, Router};

use crate::{errors::ApiError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/blockers", get(list_blockers))
}

async fn list_blockers(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let creators = state.rules.get_rules.blockers().await?;
    Ok(Json(creators.iter().map(|c| c.to_string()).collect()))
}

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;

use crate::presentation::state::AppState;

pub async fn stats_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.scheduler.stats())
}

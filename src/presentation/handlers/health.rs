use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::domain::Phase;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub processing_active: bool,
    pub current_phase: Phase,
}

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let stats = state.scheduler.stats();
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy",
            processing_active: stats.processing_active,
            current_phase: stats.current_phase,
        }),
    )
}

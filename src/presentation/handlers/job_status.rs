use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

use crate::domain::JobId;
use crate::presentation::state::AppState;

use super::ApiError;

#[tracing::instrument(skip(state))]
pub async fn job_status_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state
        .scheduler
        .status(&JobId::from_raw(job_id.as_str()))
        .ok_or_else(|| ApiError::NotFound(format!("Job not found: {}", job_id)))?;
    Ok(Json(report))
}

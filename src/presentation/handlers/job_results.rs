use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::services::JobResults;
use crate::domain::JobId;
use crate::presentation::state::AppState;

use super::ApiError;

/// 200 with the bundle once complete, 202 while the job is still running or
/// when it failed.
#[tracing::instrument(skip(state))]
pub async fn job_results_handler(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let results = state
        .scheduler
        .results(&JobId::from_raw(job_id.as_str()))
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Job not found: {}", job_id)))?;

    let status = match &results {
        JobResults::Complete(_) => StatusCode::OK,
        JobResults::NotReady { .. } => StatusCode::ACCEPTED,
    };
    Ok((status, Json(results)))
}

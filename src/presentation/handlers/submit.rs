use std::path::{Path, PathBuf};

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::domain::JobId;
use crate::presentation::state::AppState;

use super::ApiError;

#[derive(Debug, Deserialize)]
pub struct SubmitJobRequest {
    pub user_id: String,
    #[serde(default)]
    pub group_key: Option<String>,
    pub media_path: String,
}

#[derive(Serialize)]
pub struct SubmitJobResponse {
    pub job_id: JobId,
    pub status: &'static str,
    pub message: &'static str,
}

/// A missing or blank group key falls back to the user id.
pub(crate) fn resolve_group_key(user_id: &str, group_key: Option<&str>) -> String {
    match group_key.map(str::trim) {
        Some(key) if !key.is_empty() => key.to_string(),
        _ => user_id.trim().to_string(),
    }
}

#[tracing::instrument(skip(state, request), fields(user_id = %request.user_id))]
pub async fn submit_job_handler(
    State(state): State<AppState>,
    Json(request): Json<SubmitJobRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let group_key = resolve_group_key(&request.user_id, request.group_key.as_deref());
    let media_path = if request.media_path.trim().is_empty() {
        PathBuf::new()
    } else {
        resolve_media_path(&state.media_root, &request.media_path).await?
    };
    let job_id = state
        .scheduler
        .submit(&request.user_id, &group_key, media_path)
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(SubmitJobResponse {
            job_id,
            status: "pending",
            message: "Job queued for transcription",
        }),
    ))
}

/// Resolves a submitted media path against the media root and refuses
/// anything that lands outside it. Relative paths are taken from the root.
/// The file may still be in flight, but its directory must exist.
async fn resolve_media_path(root: &Path, requested: &str) -> Result<PathBuf, ApiError> {
    let outside = || ApiError::BadRequest("media_path must be inside the media root".to_string());
    let joined = root.join(requested.trim());

    let resolved = match tokio::fs::canonicalize(&joined).await {
        Ok(path) => path,
        Err(_) => {
            let (Some(dir), Some(name)) = (joined.parent(), joined.file_name()) else {
                return Err(outside());
            };
            tokio::fs::canonicalize(dir)
                .await
                .map_err(|_| outside())?
                .join(name)
        }
    };

    if resolved.starts_with(root) {
        Ok(resolved)
    } else {
        tracing::warn!(media_path = %requested, "Rejected media path outside the media root");
        Err(outside())
    }
}

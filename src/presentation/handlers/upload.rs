use std::io;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use futures::{StreamExt, TryStreamExt};

use crate::presentation::state::AppState;

use super::ApiError;
use super::submit::{SubmitJobResponse, resolve_group_key};

/// Accepts `user_id`, optional `group_key` and `file` parts, in that order.
/// The media is streamed to the media store before the job is submitted.
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_job_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut user_id: Option<String> = None;
    let mut group_key: Option<String> = None;
    let mut stored = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart: {}", e)))?
    {
        match field.name().unwrap_or_default() {
            "user_id" => user_id = Some(read_text(field).await?),
            "group_key" => group_key = Some(read_text(field).await?),
            "file" => {
                let user = user_id
                    .as_deref()
                    .filter(|u| !u.trim().is_empty())
                    .ok_or_else(|| {
                        ApiError::BadRequest("user_id must be sent before file".to_string())
                    })?;
                let group = resolve_group_key(user, group_key.as_deref());
                let file_name = field.file_name().unwrap_or("upload").to_string();
                tracing::debug!(file_name = %file_name, group_key = %group, "Receiving media upload");

                let stream = field
                    .map_err(|e| io::Error::other(e.to_string()))
                    .boxed();
                let path = state
                    .media_store
                    .store(&group, &file_name, stream)
                    .await
                    .map_err(|e| ApiError::Internal(format!("Failed to store media: {}", e)))?;
                stored = Some((group, path));
            }
            other => tracing::debug!(field = other, "Ignoring unknown multipart field"),
        }
    }

    let user_id = user_id.unwrap_or_default();
    let (group_key, media_path) =
        stored.ok_or_else(|| ApiError::BadRequest("No file uploaded".to_string()))?;
    let job_id = state
        .scheduler
        .submit(&user_id, &group_key, media_path)
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(SubmitJobResponse {
            job_id,
            status: "pending",
            message: "Media stored and job queued for transcription",
        }),
    ))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map(|text| text.trim().to_string())
        .map_err(|e| ApiError::BadRequest(format!("Failed to read field: {}", e)))
}

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::services::JobStatusReport;
use crate::presentation::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UserJobsQuery {
    pub group_key: Option<String>,
}

#[derive(Serialize)]
pub struct UserJobsResponse {
    pub user_id: String,
    pub total: usize,
    pub jobs: Vec<JobStatusReport>,
}

#[tracing::instrument(skip(state))]
pub async fn user_jobs_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<UserJobsQuery>,
) -> impl IntoResponse {
    let jobs = state
        .scheduler
        .user_jobs(&user_id, query.group_key.as_deref().filter(|k| !k.is_empty()));
    Json(UserJobsResponse {
        total: jobs.len(),
        user_id,
        jobs,
    })
}

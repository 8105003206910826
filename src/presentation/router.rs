use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    health_handler, job_results_handler, job_status_handler, stats_handler, submit_job_handler,
    upload_job_handler, user_jobs_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/jobs", post(submit_job_handler))
        .route("/api/v1/jobs/upload", post(upload_job_handler))
        .route("/api/v1/jobs/{job_id}", get(job_status_handler))
        .route("/api/v1/jobs/{job_id}/results", get(job_results_handler))
        .route("/api/v1/users/{user_id}/jobs", get(user_jobs_handler))
        .route("/api/v1/stats", get(stats_handler))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}

mod error;
mod health;
mod job_results;
mod job_status;
mod stats;
mod submit;
mod upload;
mod user_jobs;

pub use error::{ApiError, ErrorResponse};
pub use health::health_handler;
pub use job_results::job_results_handler;
pub use job_status::job_status_handler;
pub use stats::stats_handler;
pub use submit::{SubmitJobRequest, SubmitJobResponse, submit_job_handler};
pub use upload::upload_job_handler;
pub use user_jobs::user_jobs_handler;

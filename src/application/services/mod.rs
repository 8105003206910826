mod collaborators;
mod evaluation_worker;
mod job_failure;
mod job_registry;
mod phase_controller;
mod phase_monitor;
mod phase_queue;
mod scheduler;
mod stats_recorder;
mod status_reporter;
mod transcription_worker;
mod worker_loop;

pub use collaborators::Collaborators;
pub use job_failure::{JobFailure, StepError};
pub use job_registry::JobRegistry;
pub use phase_queue::PhaseQueue;
pub use scheduler::{Scheduler, SchedulerConfig, SchedulerError};
pub use stats_recorder::StatsRecorder;
pub use status_reporter::{
    JobResults, JobStatusReport, ProcessingTimesReport, ResultBundle, SchedulerStats,
};

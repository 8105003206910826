use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use serde::Deserialize;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::phase_controller::PhaseController;
use super::phase_monitor::PhaseMonitor;
use super::status_reporter::StatusReporter;
use super::{
    Collaborators, JobFailure, JobRegistry, JobResults, JobStatusReport, PhaseQueue,
    SchedulerStats, StatsRecorder,
};
use crate::domain::{Job, JobId, JobTransitionError, Phase, Stage};

/// Timing knobs of the scheduler. Defaults are the production values.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Start processing on the first submission instead of waiting for `start`.
    pub autostart: bool,
    #[serde(with = "secs_f64")]
    pub dequeue_timeout: Duration,
    #[serde(with = "secs_f64")]
    pub monitor_interval: Duration,
    #[serde(with = "secs_f64")]
    pub monitor_backoff: Duration,
    #[serde(with = "secs_f64")]
    pub switch_wait: Duration,
    #[serde(with = "secs_f64")]
    pub shutdown_wait: Duration,
    #[serde(with = "secs_f64")]
    pub media_wait: Duration,
    #[serde(with = "secs_f64")]
    pub media_poll: Duration,
    pub stats_window: usize,
    #[serde(with = "secs_f64")]
    pub default_processing_time: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            autostart: true,
            dequeue_timeout: Duration::from_secs(5),
            monitor_interval: Duration::from_secs(2),
            monitor_backoff: Duration::from_secs(5),
            switch_wait: Duration::from_secs(5),
            shutdown_wait: Duration::from_secs(10),
            media_wait: Duration::from_secs(10),
            media_poll: Duration::from_millis(500),
            stats_window: 20,
            default_processing_time: Duration::from_secs(45),
        }
    }
}

mod secs_f64 {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("invalid {field}: must not be empty")]
    InvalidInput { field: &'static str },
    #[error("scheduler is shut down")]
    ShutDown,
}

/// State shared by the facade, the monitor and both workers.
pub(crate) struct SchedulerCore {
    pub(crate) config: SchedulerConfig,
    pub(crate) registry: JobRegistry,
    pub(crate) transcription_queue: PhaseQueue,
    pub(crate) evaluation_queue: PhaseQueue,
    pub(crate) controller: PhaseController,
    pub(crate) stats: StatsRecorder,
    pub(crate) collaborators: Collaborators,
    /// Single permit: at most one job talks to the shared model endpoint.
    pub(crate) endpoint: Semaphore,
    pub(crate) shutdown: CancellationToken,
    pub(crate) processing_active: AtomicBool,
    monitor: Mutex<Option<JoinHandle<()>>>,
}

impl SchedulerCore {
    pub(crate) fn queue(&self, stage: Stage) -> &PhaseQueue {
        match stage {
            Stage::Transcription => &self.transcription_queue,
            Stage::Evaluation => &self.evaluation_queue,
        }
    }

    /// Applies a state transition to a registered job.
    pub(crate) fn transition<R>(
        &self,
        id: &JobId,
        mutation: impl FnOnce(&mut Job) -> Result<R, JobTransitionError>,
    ) -> Result<R, JobFailure> {
        self.registry
            .update(id, mutation)
            .ok_or_else(|| JobFailure::Missing(id.clone()))?
            .map_err(JobFailure::from)
    }

    pub(crate) fn is_processing(&self) -> bool {
        self.processing_active.load(Ordering::SeqCst)
    }
}

/// Two-phase job scheduler: transcription and evaluation share one model
/// endpoint, so only one of them runs at a time and the system flips between
/// them based on queued work.
#[derive(Clone)]
pub struct Scheduler {
    core: Arc<SchedulerCore>,
}

impl Scheduler {
    pub fn new(collaborators: Collaborators, config: SchedulerConfig) -> Self {
        let stats = StatsRecorder::new(config.stats_window, config.default_processing_time);
        let core = SchedulerCore {
            config,
            registry: JobRegistry::new(),
            transcription_queue: PhaseQueue::new(),
            evaluation_queue: PhaseQueue::new(),
            controller: PhaseController::new(),
            stats,
            collaborators,
            endpoint: Semaphore::new(1),
            shutdown: CancellationToken::new(),
            processing_active: AtomicBool::new(false),
            monitor: Mutex::new(None),
        };
        Self {
            core: Arc::new(core),
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.core.config
    }

    pub fn is_running(&self) -> bool {
        self.core.is_processing()
    }

    /// Starts the phase monitor and, if work is waiting, the transcription
    /// worker. Calling it again while running does nothing.
    pub async fn start(&self) {
        let core = &self.core;
        if core.shutdown.is_cancelled() {
            tracing::warn!("Scheduler is shut down; not starting");
            return;
        }
        if core.processing_active.swap(true, Ordering::SeqCst) {
            tracing::debug!("Processing already active");
            return;
        }

        tracing::info!("Starting two-phase processing");
        let monitor = tokio::spawn(PhaseMonitor::new(Arc::clone(core)).run());
        *core.monitor.lock() = Some(monitor);

        if !core.transcription_queue.is_empty() {
            let mut phase = core.controller.lock(core).await;
            phase.switch_to(Stage::Transcription).await;
        }
    }

    /// Registers a job and queues it for transcription.
    pub async fn submit(
        &self,
        user_id: &str,
        group_key: &str,
        media_path: impl Into<PathBuf>,
    ) -> Result<JobId, SchedulerError> {
        let media_path = media_path.into();
        require("user_id", user_id)?;
        require("group_key", group_key)?;
        if media_path.as_os_str().is_empty() {
            return Err(SchedulerError::InvalidInput {
                field: "media_path",
            });
        }
        if self.core.shutdown.is_cancelled() {
            return Err(SchedulerError::ShutDown);
        }

        if !tokio::fs::try_exists(&media_path).await.unwrap_or(false) {
            tracing::warn!(
                media = %media_path.display(),
                "Media file does not exist yet; the transcription worker will wait for it"
            );
        }

        let core = &self.core;
        let job_id = core.registry.insert_new(user_id, group_key, media_path);
        core.transcription_queue.push(job_id.clone());
        core.stats.record_submission();

        tracing::info!(
            job_id = %job_id,
            user_id,
            group_key,
            queue_size = core.transcription_queue.len(),
            "Job submitted to transcription queue"
        );

        if core.config.autostart && !core.is_processing() {
            self.start().await;
        } else if core.is_processing() && core.controller.current() == Phase::Idle {
            let mut phase = core.controller.lock(core).await;
            if phase.phase() == Phase::Idle {
                phase.switch_to(Stage::Transcription).await;
            }
        }
        Ok(job_id)
    }

    /// Stops the monitor and both workers. Jobs still queued stay queued and
    /// the scheduler does not accept new submissions afterwards.
    pub async fn shutdown(&self) {
        let core = &self.core;
        tracing::info!("Stopping two-phase processing");
        core.processing_active.store(false, Ordering::SeqCst);
        core.shutdown.cancel();

        let wait = core.config.shutdown_wait;
        let monitor = core.monitor.lock().take();
        join_bounded("phase monitor", monitor, wait).await;
        for stage in [Stage::Transcription, Stage::Evaluation] {
            join_bounded(stage.as_str(), core.controller.take_worker(stage), wait).await;
        }
        tracing::info!("Two-phase processing stopped");
    }

    pub fn status(&self, job_id: &JobId) -> Option<JobStatusReport> {
        StatusReporter::new(&self.core).status(job_id)
    }

    pub async fn results(&self, job_id: &JobId) -> Option<JobResults> {
        StatusReporter::new(&self.core).results(job_id).await
    }

    pub fn stats(&self) -> SchedulerStats {
        StatusReporter::new(&self.core).stats()
    }

    pub fn user_jobs(&self, user_id: &str, group_key: Option<&str>) -> Vec<JobStatusReport> {
        StatusReporter::new(&self.core).user_jobs(user_id, group_key)
    }

    /// 1-based position across both queues, 0 when the job is not queued.
    pub fn queue_position(&self, job_id: &JobId) -> usize {
        StatusReporter::new(&self.core).queue_position(job_id)
    }
}

fn require(field: &'static str, value: &str) -> Result<(), SchedulerError> {
    if value.trim().is_empty() {
        return Err(SchedulerError::InvalidInput { field });
    }
    Ok(())
}

async fn join_bounded(name: &str, handle: Option<JoinHandle<()>>, wait: Duration) {
    let Some(mut handle) = handle else {
        return;
    };
    match tokio::time::timeout(wait, &mut handle).await {
        Ok(Ok(())) => tracing::debug!(task = name, "Task stopped"),
        Ok(Err(e)) => tracing::warn!(task = name, error = %e, "Task ended abnormally"),
        Err(_) => {
            tracing::warn!(
                task = name,
                waited_secs = wait.as_secs_f32(),
                "Task did not stop in time; aborting"
            );
            handle.abort();
        }
    }
}

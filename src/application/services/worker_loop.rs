use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use tokio::sync::watch;
use tracing::Instrument;

use super::JobFailure;
use super::phase_controller::PhaseSnapshot;
use super::scheduler::SchedulerCore;
use crate::domain::{Job, JobId, Phase, Stage};

/// The work one stage performs on a single job.
#[async_trait]
pub(crate) trait StageProcessor: Send + Sync + 'static {
    fn stage(&self) -> Stage;

    async fn process(&self, core: &SchedulerCore, job: &Job) -> Result<(), JobFailure>;
}

/// Consumer loop shared by both stages: drains the stage's queue while the
/// system is in the stage's phase and asks for a switch once the queue runs
/// dry with work waiting on the other side.
pub(crate) struct WorkerLoop<P> {
    core: Arc<SchedulerCore>,
    processor: P,
}

impl<P: StageProcessor> WorkerLoop<P> {
    pub(crate) fn new(core: Arc<SchedulerCore>, processor: P) -> Self {
        Self { core, processor }
    }

    pub(crate) async fn run(self) {
        let stage = self.processor.stage();
        tracing::info!(stage = %stage, "Worker running");
        let mut phase_rx = self.core.controller.subscribe();

        loop {
            self.drain(&mut phase_rx).await;
            if self.core.shutdown.is_cancelled() {
                break;
            }
            let guard = self.core.controller.lock(&self.core).await;
            if guard.release_worker(stage) {
                break;
            }
            tracing::debug!(stage = %stage, "Phase returned before exit; resuming");
        }

        tracing::info!(stage = %stage, "Worker stopped");
    }

    async fn drain(&self, phase_rx: &mut watch::Receiver<PhaseSnapshot>) {
        let stage = self.processor.stage();
        let own_phase = Phase::active(stage);
        let queue = self.core.queue(stage);
        let other = self.core.queue(stage.other());

        loop {
            if self.core.shutdown.is_cancelled() {
                return;
            }
            let phase = phase_rx.borrow_and_update().phase;
            if phase != own_phase {
                tracing::info!(stage = %stage, phase = %phase, "Phase changed; worker leaving");
                return;
            }

            let next = tokio::select! {
                _ = self.core.shutdown.cancelled() => return,
                changed = phase_rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                    continue;
                }
                next = queue.pop_timeout(self.core.config.dequeue_timeout) => next,
            };

            match next {
                Some(job_id) => self.handle(job_id).await,
                None if queue.is_empty() && !other.is_empty() => {
                    tracing::info!(
                        stage = %stage,
                        waiting = other.len(),
                        "Queue drained; requesting switch"
                    );
                    let mut guard = self.core.controller.lock(&self.core).await;
                    if guard.phase() == own_phase && queue.is_empty() && !other.is_empty() {
                        guard.switch_to(stage.other()).await;
                    }
                }
                None => tracing::trace!(stage = %stage, "No work; waiting"),
            }
        }
    }

    async fn handle(&self, job_id: JobId) {
        let stage = self.processor.stage();
        let queue = self.core.queue(stage);

        match self.core.registry.get(&job_id) {
            Some(job) => {
                let span = tracing::info_span!(
                    "job",
                    stage = %stage,
                    job_id = %job_id,
                    group_key = %job.group_key,
                );
                self.run_job(job).instrument(span).await;
            }
            None => tracing::warn!(job_id = %job_id, "Queued job missing from registry"),
        }

        queue.task_done();
        if queue.is_empty() {
            tracing::info!(stage = %stage, "Last queued job handled");
        }
    }

    async fn run_job(&self, job: Job) {
        let stage = self.processor.stage();
        let controller = &self.core.controller;
        controller.set_busy(stage, true);

        let failure = match self.core.endpoint.acquire().await {
            Ok(_permit) => {
                let outcome = AssertUnwindSafe(self.processor.process(&self.core, &job))
                    .catch_unwind()
                    .await;
                match outcome {
                    Ok(Ok(())) => None,
                    Ok(Err(failure)) => Some(failure),
                    Err(panic) => Some(JobFailure::Panicked(panic_message(panic.as_ref()))),
                }
            }
            Err(_) => Some(JobFailure::EndpointClosed),
        };

        if let Some(failure) = failure {
            self.fail_job(&job.id, &failure);
        }
        controller.set_busy(stage, false);
    }

    fn fail_job(&self, job_id: &JobId, failure: &JobFailure) {
        let message = failure.to_string();
        tracing::error!(error = %message, "Job failed");
        match self.core.registry.update(job_id, |job| job.fail(message)) {
            Some(Ok(())) => self.core.stats.record_failure(),
            Some(Err(e)) => tracing::warn!(error = %e, "Could not mark job as failed"),
            None => tracing::warn!("Job vanished before it could be marked as failed"),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;

use super::scheduler::SchedulerCore;
use crate::domain::{Phase, Stage};

const STATUS_LOG_EVERY: Duration = Duration::from_secs(10);

/// Periodic safety net: restarts dead workers that still have queued jobs and
/// moves the system out of phases that have run out of work.
pub(crate) struct PhaseMonitor {
    core: Arc<SchedulerCore>,
}

impl PhaseMonitor {
    pub(crate) fn new(core: Arc<SchedulerCore>) -> Self {
        Self { core }
    }

    pub(crate) async fn run(self) {
        let config = &self.core.config;
        let status_every = (STATUS_LOG_EVERY.as_millis()
            / config.monitor_interval.as_millis().max(1))
        .max(1) as u64;
        let mut ticks: u64 = 0;
        tracing::info!(
            interval_ms = config.monitor_interval.as_millis() as u64,
            "Phase monitor started"
        );

        while self.core.is_processing() {
            let delay = match AssertUnwindSafe(self.tick()).catch_unwind().await {
                Ok(()) => config.monitor_interval,
                Err(_) => {
                    tracing::error!("Phase monitor tick panicked; backing off");
                    config.monitor_backoff
                }
            };

            ticks += 1;
            if ticks % status_every == 0 {
                self.log_status();
            }

            tokio::select! {
                _ = self.core.shutdown.cancelled() => break,
                _ = tokio::time::sleep(delay) => {}
            }
        }

        tracing::info!("Phase monitor stopped");
    }

    async fn tick(&self) {
        let core = &self.core;
        let mut guard = core.controller.lock(core).await;

        match guard.phase().stage() {
            None => {
                for stage in [Stage::Transcription, Stage::Evaluation] {
                    if !core.queue(stage).is_empty() {
                        tracing::info!(stage = %stage, "Work waiting while idle");
                        guard.switch_to(stage).await;
                        break;
                    }
                }
            }
            Some(stage) => {
                let own = core.queue(stage);
                if core.controller.worker_alive(stage) {
                    return;
                }
                if !own.is_empty() {
                    tracing::warn!(
                        stage = %stage,
                        queued = own.len(),
                        "Worker not running with jobs queued; restarting"
                    );
                    guard.switch_to(stage).await;
                } else if !core.queue(stage.other()).is_empty() {
                    guard.switch_to(stage.other()).await;
                } else {
                    guard.switch_to_idle().await;
                }
            }
        }
    }

    fn log_status(&self) {
        let core = &self.core;
        let phase = core.controller.current();
        tracing::debug!(
            phase = %phase,
            transcription_queue = core.transcription_queue.len(),
            evaluation_queue = core.evaluation_queue.len(),
            transcription_worker = core.controller.worker_alive(Stage::Transcription),
            evaluation_worker = core.controller.worker_alive(Stage::Evaluation),
            idle = phase == Phase::Idle,
            "Scheduler status"
        );
    }
}

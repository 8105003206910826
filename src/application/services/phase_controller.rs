use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tokio::sync::{MutexGuard, watch};
use tokio::task::JoinHandle;

use super::evaluation_worker::EvaluationWorker;
use super::scheduler::SchedulerCore;
use super::transcription_worker::TranscriptionWorker;
use super::worker_loop::WorkerLoop;
use crate::domain::{Phase, Stage};

const BUSY_POLL: Duration = Duration::from_millis(25);

/// Phase as published to readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseSnapshot {
    pub phase: Phase,
    pub since: DateTime<Utc>,
}

#[derive(Default)]
struct WorkerSlot {
    handle: Mutex<Option<JoinHandle<()>>>,
    busy: AtomicBool,
}

/// Owns the current phase and the worker task of each stage.
///
/// Every decision that changes the phase or starts a worker goes through
/// [`PhaseController::lock`]; readers use [`PhaseController::current`] and
/// never block on it.
pub(crate) struct PhaseController {
    transitions: tokio::sync::Mutex<()>,
    published: watch::Sender<PhaseSnapshot>,
    transcription: WorkerSlot,
    evaluation: WorkerSlot,
}

impl PhaseController {
    pub(crate) fn new() -> Self {
        let (published, _) = watch::channel(PhaseSnapshot {
            phase: Phase::Idle,
            since: Utc::now(),
        });
        Self {
            transitions: tokio::sync::Mutex::new(()),
            published,
            transcription: WorkerSlot::default(),
            evaluation: WorkerSlot::default(),
        }
    }

    pub(crate) fn current(&self) -> Phase {
        self.published.borrow().phase
    }

    pub(crate) fn snapshot(&self) -> PhaseSnapshot {
        *self.published.borrow()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<PhaseSnapshot> {
        self.published.subscribe()
    }

    pub(crate) fn worker_alive(&self, stage: Stage) -> bool {
        self.slot(stage)
            .handle
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    pub(crate) fn is_busy(&self, stage: Stage) -> bool {
        self.slot(stage).busy.load(Ordering::SeqCst)
    }

    pub(crate) fn set_busy(&self, stage: Stage, busy: bool) {
        self.slot(stage).busy.store(busy, Ordering::SeqCst);
    }

    pub(crate) fn take_worker(&self, stage: Stage) -> Option<JoinHandle<()>> {
        self.slot(stage).handle.lock().take()
    }

    /// Serialises phase decisions. The guard may be held across the bounded
    /// wait for a busy worker.
    pub(crate) async fn lock<'a>(&'a self, core: &'a Arc<SchedulerCore>) -> PhaseGuard<'a> {
        PhaseGuard {
            controller: self,
            core,
            _held: self.transitions.lock().await,
        }
    }

    fn slot(&self, stage: Stage) -> &WorkerSlot {
        match stage {
            Stage::Transcription => &self.transcription,
            Stage::Evaluation => &self.evaluation,
        }
    }

    async fn wait_until_idle(&self, stage: Stage, wait: Duration) -> bool {
        if !self.is_busy(stage) {
            return true;
        }
        tracing::info!(stage = %stage, "Waiting for worker to finish its current job");
        let finished = tokio::time::timeout(wait, async {
            while self.is_busy(stage) {
                tokio::time::sleep(BUSY_POLL).await;
            }
        })
        .await
        .is_ok();

        if !finished {
            tracing::warn!(
                stage = %stage,
                waited_secs = wait.as_secs_f32(),
                "Worker still busy after bounded wait; continuing with the switch"
            );
        }
        finished
    }
}

/// Exclusive right to change the phase.
pub(crate) struct PhaseGuard<'a> {
    controller: &'a PhaseController,
    core: &'a Arc<SchedulerCore>,
    _held: MutexGuard<'a, ()>,
}

impl PhaseGuard<'_> {
    pub(crate) fn phase(&self) -> Phase {
        self.controller.current()
    }

    /// Moves the system into `stage`'s phase and makes sure its worker runs.
    ///
    /// The phase is published before waiting on the other worker so that
    /// worker stops taking new jobs while its current one finishes.
    pub(crate) async fn switch_to(&mut self, stage: Stage) {
        let target = Phase::active(stage);
        let queue = self.core.queue(stage);

        if self.phase() == target {
            if !self.controller.worker_alive(stage) && !queue.is_empty() {
                tracing::info!(
                    stage = %stage,
                    queued = queue.len(),
                    "Restarting worker for the current phase"
                );
                self.spawn_worker(stage);
            }
            return;
        }

        tracing::info!(
            from = %self.phase(),
            to = %target,
            queued = queue.len(),
            "Switching phase"
        );
        self.publish(target);
        self.core.stats.record_phase_switch();

        self.controller
            .wait_until_idle(stage.other(), self.core.config.switch_wait)
            .await;

        if !self.controller.worker_alive(stage) {
            self.spawn_worker(stage);
        }
    }

    /// Enters `Idle` when no worker runs and both queues are empty. Work that
    /// shows up during the switch moves the system straight back into the
    /// matching active phase. Returns whether the system ended up idle.
    pub(crate) async fn switch_to_idle(&mut self) -> bool {
        if self.phase() == Phase::Idle {
            return true;
        }
        let transcription = &self.core.transcription_queue;
        let evaluation = &self.core.evaluation_queue;
        let workers_alive = self.controller.worker_alive(Stage::Transcription)
            || self.controller.worker_alive(Stage::Evaluation);

        if workers_alive || !transcription.is_empty() || !evaluation.is_empty() {
            tracing::debug!(
                workers_alive,
                transcription_queue = transcription.len(),
                evaluation_queue = evaluation.len(),
                "Not switching to idle"
            );
            return false;
        }

        tracing::info!(from = %self.phase(), "Switching to idle");
        self.publish(Phase::Idle);

        for stage in [Stage::Transcription, Stage::Evaluation] {
            if !self.core.queue(stage).is_empty() {
                tracing::warn!(stage = %stage, "Work arrived during idle switch; reverting");
                self.switch_to(stage).await;
                return false;
            }
        }
        true
    }

    /// Called by a worker on its way out. Clears its slot if the phase no
    /// longer belongs to it; returns `false` when the phase came back and
    /// the worker should keep running.
    pub(crate) fn release_worker(&self, stage: Stage) -> bool {
        if self.phase() == Phase::active(stage) {
            return false;
        }
        drop(self.controller.take_worker(stage));
        true
    }

    fn publish(&self, phase: Phase) {
        self.controller.published.send_replace(PhaseSnapshot {
            phase,
            since: Utc::now(),
        });
    }

    fn spawn_worker(&self, stage: Stage) {
        if self.core.shutdown.is_cancelled() {
            tracing::debug!(stage = %stage, "Shutting down; not starting worker");
            return;
        }
        let core = Arc::clone(self.core);
        let handle = match stage {
            Stage::Transcription => {
                tokio::spawn(WorkerLoop::new(core, TranscriptionWorker).run())
            }
            Stage::Evaluation => tokio::spawn(WorkerLoop::new(core, EvaluationWorker).run()),
        };
        *self.controller.slot(stage).handle.lock() = Some(handle);
        tracing::info!(stage = %stage, "Worker started");
    }
}

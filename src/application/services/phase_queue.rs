use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::time::Instant;

use crate::domain::JobId;

/// FIFO of job ids waiting for one processing stage.
///
/// Besides the ids themselves the queue counts unfinished work: a push adds
/// one, and the consumer acknowledges every dequeued id with [`task_done`],
/// whether the job succeeded or failed.
///
/// [`task_done`]: PhaseQueue::task_done
#[derive(Default)]
pub struct PhaseQueue {
    items: Mutex<VecDeque<JobId>>,
    unfinished: AtomicUsize,
    notify: Notify,
}

impl PhaseQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, id: JobId) {
        self.items.lock().push_back(id);
        self.unfinished.fetch_add(1, Ordering::SeqCst);
        self.notify.notify_one();
    }

    pub fn try_pop(&self) -> Option<JobId> {
        self.items.lock().pop_front()
    }

    /// Waits up to `timeout` for an id. Cancel-safe: an id is only removed
    /// in the same poll that returns it.
    pub async fn pop_timeout(&self, timeout: Duration) -> Option<JobId> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(id) = self.try_pop() {
                return Some(id);
            }
            if tokio::time::timeout_at(deadline, self.notify.notified())
                .await
                .is_err()
            {
                return self.try_pop();
            }
        }
    }

    pub fn task_done(&self) {
        let _ = self
            .unfinished
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
    }

    /// Ids pushed but not yet acknowledged, including the one in progress.
    pub fn unfinished(&self) -> usize {
        self.unfinished.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// 1-based position of `id`, or `None` when it is not waiting here.
    pub fn position(&self, id: &JobId) -> Option<usize> {
        self.items
            .lock()
            .iter()
            .position(|queued| queued == id)
            .map(|index| index + 1)
    }

    pub fn snapshot(&self) -> Vec<JobId> {
        self.items.lock().iter().cloned().collect()
    }
}

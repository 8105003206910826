use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

/// Counters and the rolling processing-time window behind the stats report.
pub struct StatsRecorder {
    total: AtomicU64,
    completed: AtomicU64,
    failed: AtomicU64,
    phase_switches: AtomicU64,
    durations: Mutex<VecDeque<Duration>>,
    window: usize,
    default_average: Duration,
}

impl StatsRecorder {
    pub fn new(window: usize, default_average: Duration) -> Self {
        Self {
            total: AtomicU64::new(0),
            completed: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            phase_switches: AtomicU64::new(0),
            durations: Mutex::new(VecDeque::with_capacity(window)),
            window: window.max(1),
            default_average,
        }
    }

    pub fn record_submission(&self) {
        self.total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_phase_switch(&self) {
        self.phase_switches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_completion(&self, processing_time: Duration) {
        let mut durations = self.durations.lock();
        durations.push_back(processing_time);
        while durations.len() > self.window {
            durations.pop_front();
        }
        drop(durations);
        self.completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    pub fn completed(&self) -> u64 {
        self.completed.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed.load(Ordering::Relaxed)
    }

    pub fn phase_switches(&self) -> u64 {
        self.phase_switches.load(Ordering::Relaxed)
    }

    pub fn samples(&self) -> usize {
        self.durations.lock().len()
    }

    /// Mean of the window, or the configured default before any completion.
    pub fn average_processing_time(&self) -> Duration {
        let durations = self.durations.lock();
        if durations.is_empty() {
            return self.default_average;
        }
        let sum: Duration = durations.iter().sum();
        sum / durations.len() as u32
    }
}

use std::time::Duration;

use introeval::application::services::StatsRecorder;

#[test]
fn given_no_completions_when_averaging_then_default_is_returned() {
    let stats = StatsRecorder::new(20, Duration::from_secs(45));
    assert_eq!(stats.average_processing_time(), Duration::from_secs(45));
}

#[test]
fn given_completions_when_averaging_then_mean_of_window_is_returned() {
    let stats = StatsRecorder::new(20, Duration::from_secs(45));
    stats.record_completion(Duration::from_secs(10));
    stats.record_completion(Duration::from_secs(30));

    assert_eq!(stats.average_processing_time(), Duration::from_secs(20));
    assert_eq!(stats.completed(), 2);
}

#[test]
fn given_more_completions_than_window_when_averaging_then_oldest_are_dropped() {
    let stats = StatsRecorder::new(2, Duration::from_secs(45));
    stats.record_completion(Duration::from_secs(100));
    stats.record_completion(Duration::from_secs(10));
    stats.record_completion(Duration::from_secs(20));

    assert_eq!(stats.samples(), 2);
    assert_eq!(stats.average_processing_time(), Duration::from_secs(15));
    assert_eq!(stats.completed(), 3);
}

#[test]
fn given_events_when_recorded_then_counters_follow() {
    let stats = StatsRecorder::new(20, Duration::from_secs(45));
    stats.record_submission();
    stats.record_submission();
    stats.record_failure();
    stats.record_phase_switch();

    assert_eq!(stats.total(), 2);
    assert_eq!(stats.failed(), 1);
    assert_eq!(stats.phase_switches(), 1);
}

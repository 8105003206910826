use introeval::domain::JobState;

#[test]
fn given_each_state_when_advancing_then_only_the_successor_or_failed_is_allowed() {
    assert!(JobState::Pending.can_transition_to(JobState::Processing));
    assert!(JobState::Processing.can_transition_to(JobState::TranscriptionComplete));
    assert!(JobState::TranscriptionComplete.can_transition_to(JobState::ExtractionComplete));
    assert!(JobState::ExtractionComplete.can_transition_to(JobState::Complete));

    assert!(!JobState::Pending.can_transition_to(JobState::Complete));
    assert!(!JobState::ExtractionComplete.can_transition_to(JobState::Processing));
    assert!(JobState::Processing.can_transition_to(JobState::Failed));
}

#[test]
fn given_terminal_state_when_transitioning_then_nothing_is_allowed() {
    for terminal in [JobState::Complete, JobState::Failed] {
        assert!(terminal.is_terminal());
        assert!(!terminal.can_transition_to(JobState::Failed));
        assert!(!terminal.can_transition_to(JobState::Pending));
    }
}

#[test]
fn given_state_when_reporting_progress_then_percent_follows_the_pipeline() {
    let percents: Vec<u8> = [
        JobState::Pending,
        JobState::Processing,
        JobState::TranscriptionComplete,
        JobState::ExtractionComplete,
        JobState::Complete,
        JobState::Failed,
    ]
    .iter()
    .map(|s| s.progress().percent)
    .collect();
    assert_eq!(percents, vec![0, 25, 50, 75, 100, 100]);
    assert_eq!(JobState::Failed.progress().message, "Processing failed");
}

#[test]
fn given_state_name_when_parsing_then_it_matches_the_serialized_form() {
    let state: JobState = "transcription_complete".parse().unwrap();
    assert_eq!(state, JobState::TranscriptionComplete);
    assert_eq!(
        serde_json::to_string(&state).unwrap(),
        r#""transcription_complete""#
    );
    assert!("done".parse::<JobState>().is_err());
}

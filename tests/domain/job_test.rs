use std::path::PathBuf;

use chrono::Utc;

use introeval::domain::{ArtifactPath, Job, JobId, JobState, PhaseMark};

fn new_job() -> Job {
    Job::new(
        JobId::from_raw("alice_cs101_1_000000"),
        "alice".to_string(),
        "cs101".to_string(),
        PathBuf::from("/media/intro.wav"),
        Utc::now(),
    )
}

fn path(raw: &str) -> ArtifactPath {
    ArtifactPath::from_raw(raw)
}

#[test]
fn given_new_job_when_running_every_step_then_it_completes_with_all_artifacts() {
    let mut job = new_job();
    assert_eq!(job.state(), JobState::Pending);

    job.start_transcription().unwrap();
    job.complete_transcription(path("transcription/t.txt")).unwrap();
    job.start_evaluation().unwrap();
    job.complete_extraction(path("filled_forms/f.json")).unwrap();
    job.complete(path("ratings/p.json"), path("ratings/i.json"))
        .unwrap();

    assert_eq!(job.state(), JobState::Complete);
    assert_eq!(job.transcript_path().unwrap().as_str(), "transcription/t.txt");
    assert_eq!(job.form_path().unwrap().as_str(), "filled_forms/f.json");
    assert!(job.profile_rating_path().is_some());
    assert!(job.intro_rating_path().is_some());
    for mark in [
        PhaseMark::TranscriptionStart,
        PhaseMark::TranscriptionComplete,
        PhaseMark::EvaluationStart,
        PhaseMark::ExtractionComplete,
        PhaseMark::RatingComplete,
    ] {
        assert!(job.timestamp(mark).is_some(), "missing {:?}", mark);
    }
}

#[test]
fn given_pending_job_when_completing_extraction_then_transition_is_rejected() {
    let mut job = new_job();
    let err = job
        .complete_extraction(path("filled_forms/f.json"))
        .unwrap_err();
    assert_eq!(err.from, JobState::Pending);
    assert_eq!(err.to, JobState::ExtractionComplete);
    assert!(job.form_path().is_none());
}

#[test]
fn given_job_still_transcribing_when_starting_evaluation_then_it_is_rejected() {
    let mut job = new_job();
    job.start_transcription().unwrap();
    assert!(job.start_evaluation().is_err());
    assert!(job.timestamp(PhaseMark::EvaluationStart).is_none());
}

#[test]
fn given_processing_job_when_failing_then_message_and_mark_are_recorded() {
    let mut job = new_job();
    job.start_transcription().unwrap();
    job.fail("transcription failed: boom").unwrap();

    assert_eq!(job.state(), JobState::Failed);
    assert_eq!(job.error_message(), Some("transcription failed: boom"));
    assert!(job.timestamp(PhaseMark::Failed).is_some());
}

#[test]
fn given_failed_job_when_failing_again_then_first_error_is_kept() {
    let mut job = new_job();
    job.fail("first").unwrap();
    assert!(job.fail("second").is_err());
    assert_eq!(job.error_message(), Some("first"));
}

#[test]
fn given_transcribed_job_when_reading_processing_times_then_evaluation_is_unknown() {
    let mut job = new_job();
    job.start_transcription().unwrap();
    job.complete_transcription(path("transcription/t.txt")).unwrap();

    let times = job.processing_times(Utc::now());
    assert!(times.transcription.is_some());
    assert!(times.evaluation.is_none());
}

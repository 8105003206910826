use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::{ArtifactPath, JobId, JobState, PhaseMark};

/// One submitted introduction travelling through transcription and evaluation.
///
/// State and artifact paths are only changed through the transition methods,
/// which keep two rules: states never move backwards, and the artifact of a
/// step is recorded in the same call that moves the job past that step.
#[derive(Debug, Clone)]
pub struct Job {
    pub id: JobId,
    pub user_id: String,
    pub group_key: String,
    pub media_path: PathBuf,
    pub created_at: DateTime<Utc>,
    state: JobState,
    transcript_path: Option<ArtifactPath>,
    form_path: Option<ArtifactPath>,
    profile_rating_path: Option<ArtifactPath>,
    intro_rating_path: Option<ArtifactPath>,
    phase_timestamps: BTreeMap<PhaseMark, DateTime<Utc>>,
    error_message: Option<String>,
}

/// Wall-clock durations derived from the recorded phase timestamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessingTimes {
    pub total: Duration,
    pub transcription: Option<Duration>,
    pub evaluation: Option<Duration>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("illegal job transition from {from} to {to}")]
pub struct JobTransitionError {
    pub from: JobState,
    pub to: JobState,
}

impl Job {
    pub fn new(
        id: JobId,
        user_id: String,
        group_key: String,
        media_path: PathBuf,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            group_key,
            media_path,
            created_at,
            state: JobState::Pending,
            transcript_path: None,
            form_path: None,
            profile_rating_path: None,
            intro_rating_path: None,
            phase_timestamps: BTreeMap::new(),
            error_message: None,
        }
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    pub fn transcript_path(&self) -> Option<&ArtifactPath> {
        self.transcript_path.as_ref()
    }

    pub fn form_path(&self) -> Option<&ArtifactPath> {
        self.form_path.as_ref()
    }

    pub fn profile_rating_path(&self) -> Option<&ArtifactPath> {
        self.profile_rating_path.as_ref()
    }

    pub fn intro_rating_path(&self) -> Option<&ArtifactPath> {
        self.intro_rating_path.as_ref()
    }

    pub fn phase_timestamps(&self) -> &BTreeMap<PhaseMark, DateTime<Utc>> {
        &self.phase_timestamps
    }

    pub fn timestamp(&self, mark: PhaseMark) -> Option<DateTime<Utc>> {
        self.phase_timestamps.get(&mark).copied()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn start_transcription(&mut self) -> Result<(), JobTransitionError> {
        self.advance(JobState::Processing)?;
        self.mark(PhaseMark::TranscriptionStart);
        Ok(())
    }

    pub fn complete_transcription(
        &mut self,
        transcript: ArtifactPath,
    ) -> Result<(), JobTransitionError> {
        self.advance(JobState::TranscriptionComplete)?;
        self.transcript_path = Some(transcript);
        self.mark(PhaseMark::TranscriptionComplete);
        Ok(())
    }

    /// Stamps the start of evaluation; the state itself does not change.
    pub fn start_evaluation(&mut self) -> Result<(), JobTransitionError> {
        if self.state != JobState::TranscriptionComplete {
            return Err(JobTransitionError {
                from: self.state,
                to: JobState::ExtractionComplete,
            });
        }
        self.mark(PhaseMark::EvaluationStart);
        Ok(())
    }

    pub fn complete_extraction(&mut self, form: ArtifactPath) -> Result<(), JobTransitionError> {
        self.advance(JobState::ExtractionComplete)?;
        self.form_path = Some(form);
        self.mark(PhaseMark::ExtractionComplete);
        Ok(())
    }

    /// Finishes the job and returns its end-to-end processing time.
    pub fn complete(
        &mut self,
        profile_rating: ArtifactPath,
        intro_rating: ArtifactPath,
    ) -> Result<Duration, JobTransitionError> {
        self.advance(JobState::Complete)?;
        self.profile_rating_path = Some(profile_rating);
        self.intro_rating_path = Some(intro_rating);
        let finished_at = self.mark(PhaseMark::RatingComplete);
        Ok(elapsed(self.created_at, finished_at))
    }

    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), JobTransitionError> {
        self.advance(JobState::Failed)?;
        self.error_message = Some(message.into());
        self.mark(PhaseMark::Failed);
        Ok(())
    }

    pub fn processing_times(&self, now: DateTime<Utc>) -> ProcessingTimes {
        let end = self.timestamp(PhaseMark::RatingComplete).unwrap_or(now);
        let transcription = match (
            self.timestamp(PhaseMark::TranscriptionStart),
            self.timestamp(PhaseMark::TranscriptionComplete),
        ) {
            (Some(start), Some(done)) => Some(elapsed(start, done)),
            _ => None,
        };
        let evaluation = match (
            self.timestamp(PhaseMark::EvaluationStart),
            self.timestamp(PhaseMark::RatingComplete),
        ) {
            (Some(start), Some(done)) => Some(elapsed(start, done)),
            _ => None,
        };

        ProcessingTimes {
            total: elapsed(self.created_at, end),
            transcription,
            evaluation,
        }
    }

    fn advance(&mut self, next: JobState) -> Result<(), JobTransitionError> {
        if !self.state.can_transition_to(next) {
            return Err(JobTransitionError {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }

    fn mark(&mut self, mark: PhaseMark) -> DateTime<Utc> {
        let now = Utc::now();
        self.phase_timestamps.insert(mark, now);
        now
    }
}

fn elapsed(from: DateTime<Utc>, to: DateTime<Utc>) -> Duration {
    (to - from).to_std().unwrap_or_default()
}

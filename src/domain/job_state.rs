use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle of a job. States only move forward; `Failed` is reachable from
/// any non-terminal state and nothing leaves `Complete` or `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobState {
    Pending,
    Processing,
    TranscriptionComplete,
    ExtractionComplete,
    Complete,
    Failed,
}

/// Caller-facing progress derived from a state alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub percent: u8,
    pub message: &'static str,
}

impl JobState {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobState::Pending => "pending",
            JobState::Processing => "processing",
            JobState::TranscriptionComplete => "transcription_complete",
            JobState::ExtractionComplete => "extraction_complete",
            JobState::Complete => "complete",
            JobState::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Complete | JobState::Failed)
    }

    /// The only non-failure state that may follow this one.
    pub fn successor(&self) -> Option<JobState> {
        match self {
            JobState::Pending => Some(JobState::Processing),
            JobState::Processing => Some(JobState::TranscriptionComplete),
            JobState::TranscriptionComplete => Some(JobState::ExtractionComplete),
            JobState::ExtractionComplete => Some(JobState::Complete),
            JobState::Complete | JobState::Failed => None,
        }
    }

    pub fn can_transition_to(&self, next: JobState) -> bool {
        if self.is_terminal() {
            return false;
        }
        next == JobState::Failed || self.successor() == Some(next)
    }

    pub fn progress(&self) -> Progress {
        let (percent, message) = match self {
            JobState::Pending => (0, "Waiting in queue"),
            JobState::Processing => (25, "Transcribing audio"),
            JobState::TranscriptionComplete => {
                (50, "Transcription complete, waiting for evaluation")
            }
            JobState::ExtractionComplete => (75, "Information extracted, generating ratings"),
            JobState::Complete => (100, "Evaluation complete"),
            JobState::Failed => (100, "Processing failed"),
        };
        Progress { percent, message }
    }
}

impl FromStr for JobState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(JobState::Pending),
            "processing" => Ok(JobState::Processing),
            "transcription_complete" => Ok(JobState::TranscriptionComplete),
            "extraction_complete" => Ok(JobState::ExtractionComplete),
            "complete" => Ok(JobState::Complete),
            "failed" => Ok(JobState::Failed),
            _ => Err(format!("Invalid job state: {}", s)),
        }
    }
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

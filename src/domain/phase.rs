use std::fmt;

use serde::Serialize;

/// System-wide processing mode. Exactly one holds at any instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    TranscriptionActive,
    EvaluationActive,
}

/// One of the two mutually exclusive processing stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Transcription,
    Evaluation,
}

impl Phase {
    pub fn active(stage: Stage) -> Self {
        match stage {
            Stage::Transcription => Phase::TranscriptionActive,
            Stage::Evaluation => Phase::EvaluationActive,
        }
    }

    pub fn stage(&self) -> Option<Stage> {
        match self {
            Phase::Idle => None,
            Phase::TranscriptionActive => Some(Stage::Transcription),
            Phase::EvaluationActive => Some(Stage::Evaluation),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::TranscriptionActive => "transcription_active",
            Phase::EvaluationActive => "evaluation_active",
        }
    }
}

impl Stage {
    pub fn other(&self) -> Stage {
        match self {
            Stage::Transcription => Stage::Evaluation,
            Stage::Evaluation => Stage::Transcription,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Transcription => "transcription",
            Stage::Evaluation => "evaluation",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

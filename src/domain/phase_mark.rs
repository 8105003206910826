use serde::Serialize;

/// Named points in a job's life whose wall-clock time is recorded on the job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseMark {
    TranscriptionStart,
    TranscriptionComplete,
    EvaluationStart,
    ExtractionComplete,
    RatingComplete,
    Failed,
}

impl PhaseMark {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseMark::TranscriptionStart => "transcription_start",
            PhaseMark::TranscriptionComplete => "transcription_complete",
            PhaseMark::EvaluationStart => "evaluation_start",
            PhaseMark::ExtractionComplete => "extraction_complete",
            PhaseMark::RatingComplete => "rating_complete",
            PhaseMark::Failed => "failed",
        }
    }
}

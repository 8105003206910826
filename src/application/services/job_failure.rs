use std::path::PathBuf;
use std::time::Duration;

use crate::application::ports::{
    ArtifactStoreError, ExtractionError, RatingError, TranscriptionError,
};
use crate::domain::{JobId, JobTransitionError};

/// Why a job ended in `Failed`. The display text is stored on the job.
#[derive(Debug, thiserror::Error)]
pub enum JobFailure {
    #[error("media file not found after waiting {}s: {}", .waited.as_secs_f32(), .path.display())]
    MediaUnavailable { path: PathBuf, waited: Duration },
    #[error("transcription failed: {0}")]
    Transcription(#[source] StepError),
    #[error("form extraction failed: {0}")]
    Extraction(#[source] StepError),
    #[error("rating generation failed: {0}")]
    Rating(#[source] StepError),
    #[error("job {0} is not in the registry")]
    Missing(JobId),
    #[error(transparent)]
    Transition(#[from] JobTransitionError),
    #[error("model endpoint is closed")]
    EndpointClosed,
    #[error("worker panicked: {0}")]
    Panicked(String),
}

/// Error raised inside one step of the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Rating(#[from] RatingError),
    #[error("artifact store: {0}")]
    Artifact(#[from] ArtifactStoreError),
    #[error("missing {0} artifact")]
    MissingArtifact(&'static str),
}

mod artifact_store;
mod field_extractor;
mod llm_client;
mod media_store;
mod rater;
mod transcription_engine;

pub use artifact_store::{ArtifactStore, ArtifactStoreError};
pub use field_extractor::{ExtractionError, FieldExtractor};
pub use llm_client::{LlmClient, LlmClientError};
pub use media_store::{MediaStore, MediaStoreError};
pub use rater::{IntroRater, ProfileRater, RatingError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};

use async_trait::async_trait;
use serde_json::Value;

use super::{ArtifactStoreError, LlmClientError};
use crate::domain::ArtifactPath;

/// Rates the extracted form of a candidate.
#[async_trait]
pub trait ProfileRater: Send + Sync {
    async fn rate_profile(&self, form: &ArtifactPath) -> Result<Value, RatingError>;
}

/// Rates the spoken introduction itself from its transcript.
#[async_trait]
pub trait IntroRater: Send + Sync {
    async fn rate_intro(&self, transcript: &ArtifactPath) -> Result<Value, RatingError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RatingError {
    #[error("artifact unavailable: {0}")]
    ArtifactUnavailable(#[from] ArtifactStoreError),
    #[error("llm: {0}")]
    Llm(#[from] LlmClientError),
    #[error("unparseable response: {0}")]
    UnparseableResponse(String),
}

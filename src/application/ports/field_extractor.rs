use async_trait::async_trait;
use serde_json::Value;

use super::LlmClientError;

/// Turns a transcript into the structured introduction form.
#[async_trait]
pub trait FieldExtractor: Send + Sync {
    async fn extract_fields(&self, transcript: &str, group_key: &str)
    -> Result<Value, ExtractionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("transcript is empty")]
    EmptyTranscript,
    #[error("llm: {0}")]
    Llm(#[from] LlmClientError),
    #[error("unparseable response: {0}")]
    UnparseableResponse(String),
}

use std::path::Path;

use async_trait::async_trait;

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(&self, media_path: &Path) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("media unreadable: {0}")]
    MediaUnreadable(String),
    #[error("unsupported media format: {0}")]
    UnsupportedFormat(String),
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}

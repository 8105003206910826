use std::path::Path;

use async_trait::async_trait;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

/// Deterministic engine for test mode: confirms the media is readable and
/// returns a canned transcript naming the file.
pub struct MockTranscriptionEngine;

#[async_trait]
impl TranscriptionEngine for MockTranscriptionEngine {
    async fn transcribe(&self, media_path: &Path) -> Result<String, TranscriptionError> {
        tokio::fs::metadata(media_path)
            .await
            .map_err(|e| TranscriptionError::MediaUnreadable(e.to_string()))?;

        let name = media_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown");
        tracing::debug!(media = %media_path.display(), "Mock transcription");
        Ok(format!(
            "Mock transcript for {}. This is a test introduction.",
            name
        ))
    }
}

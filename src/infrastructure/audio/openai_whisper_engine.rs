use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

pub struct OpenAiWhisperEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiWhisperEngine {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            model: model.unwrap_or_else(|| "whisper-1".to_string()),
        }
    }
}

#[async_trait]
impl TranscriptionEngine for OpenAiWhisperEngine {
    async fn transcribe(&self, media_path: &Path) -> Result<String, TranscriptionError> {
        let mime = mime_for(media_path)?;
        let file_name = media_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("media")
            .to_string();
        let media = tokio::fs::read(media_path).await.map_err(|e| {
            TranscriptionError::MediaUnreadable(format!("{}: {}", media_path.display(), e))
        })?;

        let url = format!("{}/audio/transcriptions", self.base_url);
        let file_part = multipart::Part::bytes(media)
            .file_name(file_name)
            .mime_str(mime)
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {}", e)))?;

        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "text")
            .part("file", file_part);

        tracing::debug!(model = %self.model, mime, "Sending media to Whisper API");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let transcript = response
            .text()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("body: {}", e)))?;
        let transcript = transcript.trim();
        if transcript.is_empty() {
            return Err(TranscriptionError::TranscriptionFailed(
                "empty transcript".to_string(),
            ));
        }

        tracing::info!(chars = transcript.len(), "Whisper transcription completed");
        Ok(transcript.to_string())
    }
}

fn mime_for(path: &Path) -> Result<&'static str, TranscriptionError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "wav" => Ok("audio/wav"),
        "mp3" => Ok("audio/mpeg"),
        "m4a" => Ok("audio/mp4"),
        "ogg" => Ok("audio/ogg"),
        "flac" => Ok("audio/flac"),
        "webm" => Ok("video/webm"),
        "mp4" => Ok("video/mp4"),
        other => Err(TranscriptionError::UnsupportedFormat(other.to_string())),
    }
}

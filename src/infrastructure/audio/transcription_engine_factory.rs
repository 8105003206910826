use std::sync::Arc;

use serde::Deserialize;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

use super::mock_transcription_engine::MockTranscriptionEngine;
use super::openai_whisper_engine::OpenAiWhisperEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptionProvider {
    #[default]
    Mock,
    #[serde(rename = "openai")]
    OpenAi,
}

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    pub fn create(
        provider: TranscriptionProvider,
        model: &str,
        api_key: Option<String>,
        base_url: Option<String>,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        match provider {
            TranscriptionProvider::Mock => Ok(Arc::new(MockTranscriptionEngine)),
            TranscriptionProvider::OpenAi => {
                let key = api_key.filter(|k| !k.is_empty()).ok_or_else(|| {
                    TranscriptionError::ApiRequestFailed(
                        "API key required for OpenAI Whisper".to_string(),
                    )
                })?;
                let engine = OpenAiWhisperEngine::new(key, base_url, Some(model.to_string()));
                Ok(Arc::new(engine))
            }
        }
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Value, json};

use crate::application::ports::{ExtractionError, FieldExtractor, LlmClient};

use super::json_response::parse_json_object;
use super::prompts::EXTRACTION_INSTRUCTIONS;

pub struct LlmFieldExtractor {
    client: Arc<dyn LlmClient>,
}

impl LlmFieldExtractor {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FieldExtractor for LlmFieldExtractor {
    async fn extract_fields(
        &self,
        transcript: &str,
        group_key: &str,
    ) -> Result<Value, ExtractionError> {
        let transcript = transcript.trim();
        if transcript.is_empty() {
            return Err(ExtractionError::EmptyTranscript);
        }

        let prompt = format!("Transcript:\n{}", transcript);
        let raw = self.client.complete(EXTRACTION_INSTRUCTIONS, &prompt).await?;
        let fields = parse_json_object(&raw).map_err(ExtractionError::UnparseableResponse)?;
        tracing::debug!(response_chars = raw.len(), "Form fields extracted");

        Ok(json!({
            "group_key": group_key,
            "extracted_at": Utc::now().to_rfc3339(),
            "fields": fields,
        }))
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::application::ports::{ArtifactStore, IntroRater, LlmClient, ProfileRater, RatingError};
use crate::domain::ArtifactPath;

use super::json_response::{normalize_score, parse_json_object};
use super::prompts::{INTRO_RATING_INSTRUCTIONS, PROFILE_RATING_INSTRUCTIONS};

/// Rates the extracted form. Reads the form back through the artifact store.
pub struct LlmProfileRater {
    client: Arc<dyn LlmClient>,
    artifacts: Arc<dyn ArtifactStore>,
}

impl LlmProfileRater {
    pub fn new(client: Arc<dyn LlmClient>, artifacts: Arc<dyn ArtifactStore>) -> Self {
        Self { client, artifacts }
    }
}

#[async_trait]
impl ProfileRater for LlmProfileRater {
    async fn rate_profile(&self, form: &ArtifactPath) -> Result<Value, RatingError> {
        let form = self.artifacts.read_json(form).await?;
        let form = serde_json::to_string_pretty(&form)
            .map_err(|e| RatingError::UnparseableResponse(e.to_string()))?;
        let prompt = format!("Introduction form:\n{}", form);

        let raw = self.client.complete(PROFILE_RATING_INSTRUCTIONS, &prompt).await?;
        parse_rating(&raw, "profile_rating")
    }
}

/// Rates the spoken introduction from its transcript.
pub struct LlmIntroRater {
    client: Arc<dyn LlmClient>,
    artifacts: Arc<dyn ArtifactStore>,
}

impl LlmIntroRater {
    pub fn new(client: Arc<dyn LlmClient>, artifacts: Arc<dyn ArtifactStore>) -> Self {
        Self { client, artifacts }
    }
}

#[async_trait]
impl IntroRater for LlmIntroRater {
    async fn rate_intro(&self, transcript: &ArtifactPath) -> Result<Value, RatingError> {
        let transcript = self.artifacts.read_text(transcript).await?;
        let prompt = format!("Transcript:\n{}", transcript.trim());

        let raw = self.client.complete(INTRO_RATING_INSTRUCTIONS, &prompt).await?;
        parse_rating(&raw, "intro_rating")
    }
}

fn parse_rating(raw: &str, score_key: &str) -> Result<Value, RatingError> {
    let mut rating = parse_json_object(raw).map_err(RatingError::UnparseableResponse)?;
    normalize_score(&mut rating, score_key);
    if !rating.get(score_key).is_some_and(Value::is_number) {
        return Err(RatingError::UnparseableResponse(format!(
            "missing numeric {}",
            score_key
        )));
    }
    tracing::debug!(score_key, score = %rating[score_key], "Rating parsed");
    Ok(rating)
}

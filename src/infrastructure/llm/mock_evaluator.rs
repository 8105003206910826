use async_trait::async_trait;
use serde_json::{Value, json};

use crate::application::ports::{
    ExtractionError, FieldExtractor, IntroRater, ProfileRater, RatingError,
};
use crate::domain::ArtifactPath;

/// Test-mode form extraction: a fixed form tagged with the group key.
pub struct MockFieldExtractor;

#[async_trait]
impl FieldExtractor for MockFieldExtractor {
    async fn extract_fields(
        &self,
        transcript: &str,
        group_key: &str,
    ) -> Result<Value, ExtractionError> {
        if transcript.trim().is_empty() {
            return Err(ExtractionError::EmptyTranscript);
        }
        Ok(json!({
            "group_key": group_key,
            "fields": {
                "name": format!("Test Student {}", group_key),
                "branch": "Computer Science",
                "year": "3rd Year",
                "skills": ["Programming", "Communication"],
                "interests": ["Technology", "Innovation"],
            },
            "test_mode": true,
        }))
    }
}

pub struct MockProfileRater;

#[async_trait]
impl ProfileRater for MockProfileRater {
    async fn rate_profile(&self, form: &ArtifactPath) -> Result<Value, RatingError> {
        Ok(json!({
            "profile_rating": 7.5,
            "grading_explanation": {
                "technical_skills": "8.0",
                "communication": "7.0",
                "experience": "7.5",
            },
            "feedback": [format!("Mock profile evaluation of {}", form)],
            "test_mode": true,
        }))
    }
}

pub struct MockIntroRater;

#[async_trait]
impl IntroRater for MockIntroRater {
    async fn rate_intro(&self, transcript: &ArtifactPath) -> Result<Value, RatingError> {
        Ok(json!({
            "intro_rating": 8.0,
            "grading_explanation": {
                "content_rating": "8.0",
                "delivery_rating": "8.0",
            },
            "feedback": [format!("Mock intro evaluation of {}", transcript)],
            "test_mode": true,
        }))
    }
}

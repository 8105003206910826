use std::sync::Arc;

use introeval::application::ports::{
    ArtifactStore, ExtractionError, FieldExtractor, IntroRater, ProfileRater, RatingError,
};
use introeval::domain::Artifact;
use introeval::infrastructure::llm::{
    LlmFieldExtractor, LlmIntroRater, LlmProfileRater, MockLlmClient,
};
use introeval::infrastructure::storage::ObjectArtifactStore;
use serde_json::json;

#[tokio::test]
async fn given_fenced_response_when_extracting_then_fields_are_wrapped_with_group_key() {
    let client = Arc::new(MockLlmClient::new(
        "Here you go:\n```json\n{\"name\": \"Ada\", \"skills\": [\"rust\",],}\n```",
    ));
    let extractor = LlmFieldExtractor::new(client.clone());

    let form = extractor
        .extract_fields("I am Ada and I like Rust.", "cs101")
        .await
        .unwrap();

    assert_eq!(form["group_key"], "cs101");
    assert_eq!(form["fields"]["name"], "Ada");
    assert_eq!(form["fields"]["skills"][0], "rust");
    assert!(client.last_prompt().unwrap().contains("I am Ada"));
}

#[tokio::test]
async fn given_blank_transcript_when_extracting_then_llm_is_not_called() {
    let client = Arc::new(MockLlmClient::new("{}"));
    let extractor = LlmFieldExtractor::new(client.clone());

    let err = extractor.extract_fields("  \n", "cs101").await.unwrap_err();
    assert!(matches!(err, ExtractionError::EmptyTranscript));
    assert!(client.last_prompt().is_none());
}

#[tokio::test]
async fn given_textual_score_when_rating_intro_then_it_is_normalized() {
    let artifacts: Arc<dyn ArtifactStore> = Arc::new(ObjectArtifactStore::in_memory());
    let transcript = artifacts
        .persist(&Artifact::Transcript("Hi, I am Ada.".to_string()), "cs101")
        .await
        .unwrap();
    let client = Arc::new(MockLlmClient::new(
        r#"{"intro_rating": "7.5/10", "feedback": ["clear"]}"#,
    ));
    let rater = LlmIntroRater::new(client.clone(), artifacts);

    let rating = rater.rate_intro(&transcript).await.unwrap();

    assert_eq!(rating["intro_rating"], 7.5);
    assert!(client.last_prompt().unwrap().contains("Hi, I am Ada."));
}

#[tokio::test]
async fn given_response_without_score_when_rating_profile_then_it_is_rejected() {
    let artifacts: Arc<dyn ArtifactStore> = Arc::new(ObjectArtifactStore::in_memory());
    let form = artifacts
        .persist(&Artifact::Form(json!({ "fields": { "name": "Ada" } })), "cs101")
        .await
        .unwrap();
    let client = Arc::new(MockLlmClient::new(r#"{"feedback": ["no score"]}"#));
    let rater = LlmProfileRater::new(client, artifacts);

    let err = rater.rate_profile(&form).await.unwrap_err();
    assert!(matches!(err, RatingError::UnparseableResponse(_)));
}

#[tokio::test]
async fn given_missing_form_when_rating_profile_then_artifact_error_is_reported() {
    let artifacts: Arc<dyn ArtifactStore> = Arc::new(ObjectArtifactStore::in_memory());
    let client = Arc::new(MockLlmClient::new(r#"{"profile_rating": 7}"#));
    let rater = LlmProfileRater::new(client, artifacts);

    let err = rater
        .rate_profile(&introeval::domain::ArtifactPath::from_raw("filled_forms/x.json"))
        .await
        .unwrap_err();
    assert!(matches!(err, RatingError::ArtifactUnavailable(_)));
}

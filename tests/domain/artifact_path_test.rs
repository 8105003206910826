use chrono::DateTime;

use introeval::domain::{Artifact, ArtifactCategory, ArtifactPath, sanitize_segment};

fn at() -> chrono::DateTime<chrono::Utc> {
    // 2023-11-14 22:13:20.123456 UTC
    DateTime::from_timestamp(1_700_000_000, 123_456_000).unwrap()
}

#[test]
fn given_transcript_when_building_path_then_layout_is_category_group_prefix_timestamp() {
    let path = ArtifactPath::new(ArtifactCategory::Transcript, "cs101", at());
    assert_eq!(
        path.as_str(),
        "transcription/cs101/transcript_20231114_221320_123456.txt"
    );
}

#[test]
fn given_ratings_when_building_paths_then_both_share_the_ratings_directory() {
    let profile = ArtifactPath::new(ArtifactCategory::ProfileRating, "cs101", at());
    let intro = ArtifactPath::new(ArtifactCategory::IntroRating, "cs101", at());
    assert_eq!(
        profile.as_str(),
        "ratings/cs101/profile_rating_20231114_221320_123456.json"
    );
    assert_eq!(
        intro.as_str(),
        "ratings/cs101/intro_rating_20231114_221320_123456.json"
    );
}

#[test]
fn given_group_key_with_separators_when_building_path_then_it_stays_one_segment() {
    let path = ArtifactPath::new(ArtifactCategory::Form, "../cs 101", at());
    assert_eq!(
        path.as_str(),
        "filled_forms/___cs_101/filled_form_20231114_221320_123456.json"
    );
}

#[test]
fn given_blank_segment_when_sanitizing_then_placeholder_is_used() {
    assert_eq!(sanitize_segment("   "), "unassigned");
    assert_eq!(sanitize_segment("team-7_a"), "team-7_a");
}

#[test]
fn given_json_artifact_when_encoding_then_bytes_are_pretty_json() {
    let artifact = Artifact::Form(serde_json::json!({ "name": "Ada" }));
    let bytes = artifact.to_bytes().unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains("\n"));
    assert_eq!(
        serde_json::from_str::<serde_json::Value>(&text).unwrap()["name"],
        "Ada"
    );
    assert_eq!(artifact.category(), ArtifactCategory::Form);
}

use serde_json::Value;

/// Kind of persisted output a pipeline step produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactCategory {
    Transcript,
    Form,
    ProfileRating,
    IntroRating,
}

impl ArtifactCategory {
    pub fn directory(&self) -> &'static str {
        match self {
            Self::Transcript => "transcription",
            Self::Form => "filled_forms",
            Self::ProfileRating | Self::IntroRating => "ratings",
        }
    }

    pub fn file_prefix(&self) -> &'static str {
        match self {
            Self::Transcript => "transcript",
            Self::Form => "filled_form",
            Self::ProfileRating => "profile_rating",
            Self::IntroRating => "intro_rating",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Transcript => "txt",
            Self::Form | Self::ProfileRating | Self::IntroRating => "json",
        }
    }
}

/// Content of one artifact, ready to be handed to an artifact store.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    Transcript(String),
    Form(Value),
    ProfileRating(Value),
    IntroRating(Value),
}

impl Artifact {
    pub fn category(&self) -> ArtifactCategory {
        match self {
            Artifact::Transcript(_) => ArtifactCategory::Transcript,
            Artifact::Form(_) => ArtifactCategory::Form,
            Artifact::ProfileRating(_) => ArtifactCategory::ProfileRating,
            Artifact::IntroRating(_) => ArtifactCategory::IntroRating,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        match self {
            Artifact::Transcript(text) => Ok(text.as_bytes().to_vec()),
            Artifact::Form(value) | Artifact::ProfileRating(value) | Artifact::IntroRating(value) => {
                serde_json::to_vec_pretty(value)
            }
        }
    }
}

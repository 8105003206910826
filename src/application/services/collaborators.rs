use std::sync::Arc;

use crate::application::ports::{
    ArtifactStore, FieldExtractor, IntroRater, ProfileRater, TranscriptionEngine,
};

/// External services the pipeline calls into. Shared by both workers.
#[derive(Clone)]
pub struct Collaborators {
    pub transcription: Arc<dyn TranscriptionEngine>,
    pub extractor: Arc<dyn FieldExtractor>,
    pub profile_rater: Arc<dyn ProfileRater>,
    pub intro_rater: Arc<dyn IntroRater>,
    pub artifacts: Arc<dyn ArtifactStore>,
}

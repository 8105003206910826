use std::sync::Arc;

use crate::application::ports::{
    ArtifactStore, ArtifactStoreError, LlmClient, MediaStoreError, TranscriptionError,
};
use crate::application::services::Collaborators;
use crate::presentation::config::{CollaboratorProvider, Settings};

use super::audio::{TranscriptionEngineFactory, TranscriptionProvider};
use super::llm::{
    LlmFieldExtractor, LlmIntroRater, LlmProfileRater, MockFieldExtractor, MockIntroRater,
    MockProfileRater, OpenAiClient,
};
use super::storage::{LocalMediaStore, ObjectArtifactStore};

#[derive(Debug, thiserror::Error)]
pub enum CollaboratorFactoryError {
    #[error("transcription engine: {0}")]
    Transcription(#[from] TranscriptionError),
    #[error("artifact store: {0}")]
    ArtifactStore(#[from] ArtifactStoreError),
    #[error("media store: {0}")]
    MediaStore(#[from] MediaStoreError),
}

pub struct CollaboratorFactory;

impl CollaboratorFactory {
    /// Wires the pipeline collaborators selected by `collaborators.provider`.
    /// The transcription provider can be overridden on its own.
    pub fn create(settings: &Settings) -> Result<Collaborators, CollaboratorFactoryError> {
        let artifacts: Arc<dyn ArtifactStore> = Arc::new(ObjectArtifactStore::local(
            settings.storage.artifact_root.clone(),
        )?);
        let provider = settings.collaborators.provider;

        let transcription_provider = settings.transcription.provider.unwrap_or(match provider {
            CollaboratorProvider::Mock => TranscriptionProvider::Mock,
            CollaboratorProvider::OpenAi => TranscriptionProvider::OpenAi,
        });
        let transcription = TranscriptionEngineFactory::create(
            transcription_provider,
            &settings.transcription.model,
            settings
                .transcription
                .api_key
                .clone()
                .or_else(|| Some(settings.llm.api_key.clone())),
            settings.transcription.base_url.clone(),
        )?;

        tracing::info!(
            provider = ?provider,
            transcription = ?transcription_provider,
            artifact_root = %settings.storage.artifact_root.display(),
            "Collaborators configured"
        );

        Ok(match provider {
            CollaboratorProvider::Mock => Collaborators {
                transcription,
                extractor: Arc::new(MockFieldExtractor),
                profile_rater: Arc::new(MockProfileRater),
                intro_rater: Arc::new(MockIntroRater),
                artifacts,
            },
            CollaboratorProvider::OpenAi => {
                let client: Arc<dyn LlmClient> =
                    Arc::new(OpenAiClient::from_settings(&settings.llm));
                Collaborators {
                    transcription,
                    extractor: Arc::new(LlmFieldExtractor::new(Arc::clone(&client))),
                    profile_rater: Arc::new(LlmProfileRater::new(
                        Arc::clone(&client),
                        Arc::clone(&artifacts),
                    )),
                    intro_rater: Arc::new(LlmIntroRater::new(client, Arc::clone(&artifacts))),
                    artifacts,
                }
            }
        })
    }

    pub fn media_store(
        settings: &Settings,
    ) -> Result<Arc<LocalMediaStore>, CollaboratorFactoryError> {
        Ok(Arc::new(LocalMediaStore::new(
            settings.storage.media_root.clone(),
        )?))
    }
}

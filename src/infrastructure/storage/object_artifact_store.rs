use std::path::PathBuf;
use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutMode, PutOptions, PutPayload};

use crate::application::ports::{ArtifactStore, ArtifactStoreError};
use crate::domain::{Artifact, ArtifactPath};

const MAX_NAME_ATTEMPTS: u32 = 16;

/// Artifact store over any `object_store` backend. Files are never
/// overwritten: a name already taken is retried one microsecond later.
pub struct ObjectArtifactStore {
    inner: Arc<dyn ObjectStore>,
}

impl ObjectArtifactStore {
    pub fn new(inner: Arc<dyn ObjectStore>) -> Self {
        Self { inner }
    }

    pub fn local(root: PathBuf) -> Result<Self, ArtifactStoreError> {
        std::fs::create_dir_all(&root)?;
        let fs = LocalFileSystem::new_with_prefix(root)
            .map_err(|e| ArtifactStoreError::WriteFailed(e.to_string()))?;
        Ok(Self::new(Arc::new(fs)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemory::new()))
    }
}

#[async_trait::async_trait]
impl ArtifactStore for ObjectArtifactStore {
    async fn persist(
        &self,
        artifact: &Artifact,
        group_key: &str,
    ) -> Result<ArtifactPath, ArtifactStoreError> {
        let bytes = artifact
            .to_bytes()
            .map_err(|e| ArtifactStoreError::Encoding(e.to_string()))?;
        let mut at = Utc::now();

        for _ in 0..MAX_NAME_ATTEMPTS {
            let path = ArtifactPath::new(artifact.category(), group_key, at);
            let location = StorePath::from(path.as_str());
            let options = PutOptions::from(PutMode::Create);

            match self
                .inner
                .put_opts(&location, PutPayload::from(bytes.clone()), options)
                .await
            {
                Ok(_) => {
                    tracing::debug!(path = %path, bytes = bytes.len(), "Artifact persisted");
                    return Ok(path);
                }
                Err(object_store::Error::AlreadyExists { .. }) => {
                    at += TimeDelta::microseconds(1);
                }
                Err(e) => return Err(ArtifactStoreError::WriteFailed(e.to_string())),
            }
        }

        Err(ArtifactStoreError::WriteFailed(format!(
            "no free name for {} artifact after {} attempts",
            artifact.category().file_prefix(),
            MAX_NAME_ATTEMPTS
        )))
    }

    async fn read(&self, path: &ArtifactPath) -> Result<Vec<u8>, ArtifactStoreError> {
        let location = StorePath::from(path.as_str());
        let result = self.inner.get(&location).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => ArtifactStoreError::NotFound(path.to_string()),
            other => ArtifactStoreError::ReadFailed(other.to_string()),
        })?;
        let bytes = result
            .bytes()
            .await
            .map_err(|e| ArtifactStoreError::ReadFailed(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{Artifact, ArtifactPath};

/// Owns the on-disk layout of pipeline outputs. Paths it returns are stored
/// on jobs verbatim and handed back to it for reading.
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    async fn persist(
        &self,
        artifact: &Artifact,
        group_key: &str,
    ) -> Result<ArtifactPath, ArtifactStoreError>;

    async fn read(&self, path: &ArtifactPath) -> Result<Vec<u8>, ArtifactStoreError>;

    async fn read_text(&self, path: &ArtifactPath) -> Result<String, ArtifactStoreError> {
        let bytes = self.read(path).await?;
        String::from_utf8(bytes).map_err(|e| ArtifactStoreError::Encoding(e.to_string()))
    }

    async fn read_json(&self, path: &ArtifactPath) -> Result<Value, ArtifactStoreError> {
        let bytes = self.read(path).await?;
        serde_json::from_slice(&bytes).map_err(|e| ArtifactStoreError::Encoding(e.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ArtifactStoreError {
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("artifact not found: {0}")]
    NotFound(String),
    #[error("read failed: {0}")]
    ReadFailed(String),
    #[error("encoding: {0}")]
    Encoding(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

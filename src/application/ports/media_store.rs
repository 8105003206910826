use std::io;
use std::path::PathBuf;

use bytes::Bytes;
use futures::stream::BoxStream;

/// Receives uploaded media before a job is submitted for it.
#[async_trait::async_trait]
pub trait MediaStore: Send + Sync {
    /// Streams the upload to storage and returns the filesystem path the
    /// transcription worker will read it from.
    async fn store(
        &self,
        group_key: &str,
        file_name: &str,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<PathBuf, MediaStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("invalid file name: {0}")]
    InvalidFileName(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use futures::StreamExt;
use futures::stream::BoxStream;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{MultipartUpload, ObjectStore, PutPayload};

use crate::application::ports::{MediaStore, MediaStoreError};
use crate::domain::sanitize_segment;

/// Writes uploads under `<root>/<group key>/<timestamp>_<file name>`.
pub struct LocalMediaStore {
    root: PathBuf,
    inner: Arc<LocalFileSystem>,
}

impl LocalMediaStore {
    pub fn new(root: PathBuf) -> Result<Self, MediaStoreError> {
        std::fs::create_dir_all(&root)?;
        let root = std::fs::canonicalize(&root)?;
        let fs = LocalFileSystem::new_with_prefix(&root)
            .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?;
        Ok(Self {
            root,
            inner: Arc::new(fs),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait::async_trait]
impl MediaStore for LocalMediaStore {
    async fn store(
        &self,
        group_key: &str,
        file_name: &str,
        mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<PathBuf, MediaStoreError> {
        let name = stored_file_name(file_name)?;
        let key = format!(
            "{}/{}_{}",
            sanitize_segment(group_key),
            Utc::now().format("%Y%m%d_%H%M%S_%6f"),
            name
        );
        let location = StorePath::from(key.as_str());
        let mut upload = self
            .inner
            .put_multipart(&location)
            .await
            .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?;

        let mut total_bytes: u64 = 0;
        while let Some(chunk) = stream.next().await {
            let bytes = match chunk {
                Ok(b) => b,
                Err(e) => {
                    let _ = upload.abort().await;
                    return Err(MediaStoreError::Io(e));
                }
            };
            total_bytes += bytes.len() as u64;
            if let Err(e) = upload.put_part(PutPayload::from(bytes)).await {
                let _ = upload.abort().await;
                return Err(MediaStoreError::UploadFailed(e.to_string()));
            }
        }

        upload
            .complete()
            .await
            .map_err(|e| MediaStoreError::UploadFailed(e.to_string()))?;

        let path = self.root.join(&key);
        tracing::info!(path = %path.display(), bytes = total_bytes, "Media stored");
        Ok(path)
    }
}

fn stored_file_name(file_name: &str) -> Result<String, MediaStoreError> {
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| MediaStoreError::InvalidFileName(file_name.to_string()))?;

    let stem = sanitize_segment(stem);
    Ok(match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}.{}", stem, sanitize_segment(ext)),
        None => stem,
    })
}

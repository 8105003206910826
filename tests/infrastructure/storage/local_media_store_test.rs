use std::io;

use bytes::Bytes;
use futures::StreamExt;
use futures::stream;

use introeval::application::ports::{MediaStore, MediaStoreError};
use introeval::infrastructure::storage::LocalMediaStore;

fn create_test_store() -> (tempfile::TempDir, LocalMediaStore) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = LocalMediaStore::new(dir.path().to_path_buf()).unwrap();
    (dir, store)
}

#[tokio::test]
async fn given_chunked_upload_when_storing_then_file_holds_all_bytes() {
    let (_dir, store) = create_test_store();
    let chunks = vec![Ok(Bytes::from("RIFF")), Ok(Bytes::from("WAVE"))];

    let path = store
        .store("cs101", "intro.wav", stream::iter(chunks).boxed())
        .await
        .unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), b"RIFFWAVE");
    assert!(path.starts_with(store.root().join("cs101")));
    assert!(path.to_string_lossy().ends_with("_intro.wav"));
}

#[tokio::test]
async fn given_failing_stream_when_storing_then_error_is_returned() {
    let (_dir, store) = create_test_store();
    let chunks = vec![
        Ok(Bytes::from("RIFF")),
        Err(io::Error::other("connection reset")),
    ];

    let err = store
        .store("cs101", "intro.wav", stream::iter(chunks).boxed())
        .await
        .unwrap_err();
    assert!(matches!(err, MediaStoreError::Io(_)));
}

#[tokio::test]
async fn given_blank_file_name_when_storing_then_it_is_rejected() {
    let (_dir, store) = create_test_store();
    let chunks: Vec<Result<Bytes, io::Error>> = vec![Ok(Bytes::from("x"))];

    let err = store
        .store("cs101", "", stream::iter(chunks).boxed())
        .await
        .unwrap_err();
    assert!(matches!(err, MediaStoreError::InvalidFileName(_)));
}

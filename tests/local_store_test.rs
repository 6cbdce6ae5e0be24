use std::io;

use bytes::Bytes;
use futures::stream::{self, BoxStream};

use midi_bridge::application::ports::StagingStore;
use midi_bridge::domain::{ConversionId, StoragePath};
use midi_bridge::infrastructure::storage::LocalStagingStore;

fn create_test_store() -> (tempfile::TempDir, LocalStagingStore) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = LocalStagingStore::new(dir.path().to_path_buf()).unwrap();
    (dir, store)
}

fn byte_stream(chunks: Vec<Result<Bytes, io::Error>>) -> BoxStream<'static, Result<Bytes, io::Error>> {
    Box::pin(stream::iter(chunks))
}

fn upload_path() -> StoragePath {
    StoragePath::new("uploads", &ConversionId::new(), Some("wav"))
}

#[tokio::test]
async fn given_valid_stream_when_storing_then_file_is_on_disk_at_host_path() {
    let (_dir, store) = create_test_store();
    let path = upload_path();

    let chunks = vec![Ok(Bytes::from("hello ")), Ok(Bytes::from("world"))];
    let size = store
        .store(&path, byte_stream(chunks))
        .await
        .unwrap();

    assert_eq!(size, 11);
    assert_eq!(std::fs::read(store.host_path(&path)).unwrap(), b"hello world");
}

#[tokio::test]
async fn given_stream_error_when_storing_then_returns_error_and_leaves_nothing() {
    let (_dir, store) = create_test_store();
    let path = upload_path();

    let chunks: Vec<Result<Bytes, io::Error>> = vec![
        Ok(Bytes::from("partial")),
        Err(io::Error::new(
            io::ErrorKind::ConnectionReset,
            "network drop",
        )),
    ];
    let result = store.store(&path, byte_stream(chunks)).await;

    assert!(result.is_err());
    assert!(!store.host_path(&path).exists());
}

#[tokio::test]
async fn given_stored_file_when_deleting_then_it_no_longer_exists() {
    let (_dir, store) = create_test_store();
    let path = upload_path();
    store
        .store(&path, byte_stream(vec![Ok(Bytes::from("data"))]))
        .await
        .unwrap();

    store.delete(&path).await.unwrap();

    assert!(!store.host_path(&path).exists());
}

#[tokio::test]
async fn given_missing_file_when_deleting_then_succeeds() {
    let (_dir, store) = create_test_store();

    let result = store.delete(&upload_path()).await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn given_directory_when_ensuring_twice_then_both_calls_succeed() {
    let (dir, store) = create_test_store();

    store.ensure_directory("outputs").await.unwrap();
    store.ensure_directory("outputs").await.unwrap();

    assert!(dir.path().join("outputs").is_dir());
}

#[tokio::test]
async fn given_storage_path_when_resolving_host_path_then_it_is_absolute_under_root() {
    let (_dir, store) = create_test_store();
    let path = StoragePath::from_raw("outputs/x.mid");

    let host = store.host_path(&path);

    assert!(host.is_absolute());
    assert_eq!(host, store.root().join("outputs").join("x.mid"));
}

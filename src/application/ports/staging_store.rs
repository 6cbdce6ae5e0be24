use std::io;
use std::path::PathBuf;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::domain::StoragePath;

#[async_trait::async_trait]
pub trait StagingStore: Send + Sync {
    /// Creates a directory under the staging root. Succeeds when it already exists.
    async fn ensure_directory(&self, directory: &str) -> Result<(), StagingStoreError>;

    /// Writes the whole stream; the file only becomes visible once every chunk is on disk.
    async fn store(
        &self,
        path: &StoragePath,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, StagingStoreError>;

    /// Removes a staged file. Deleting a file that is already gone is not an error.
    async fn delete(&self, path: &StoragePath) -> Result<(), StagingStoreError>;

    /// Absolute host filesystem location of a staged path.
    fn host_path(&self, path: &StoragePath) -> PathBuf;
}

#[derive(Debug, thiserror::Error)]
pub enum StagingStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

use std::io;
use std::path::{Component, Path, PathBuf};

use crate::domain::MediaType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredFile {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("file not found: {0}")]
    NotFound(String),
    #[error("read failed: {0}")]
    ReadFailed(#[from] io::Error),
}

/// Serves generated artifacts that live under the staging root.
#[derive(Debug, Clone)]
pub struct FileDelivery {
    root: PathBuf,
}

impl FileDelivery {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reads the artifact and resolves its media type from the extension.
    ///
    /// `download_name` overrides the suggested filename, which otherwise is the artifact's own.
    pub async fn deliver(
        &self,
        path: &Path,
        download_name: Option<&str>,
    ) -> Result<DeliveredFile, DeliveryError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(DeliveryError::NotFound(path.display().to_string()));
            }
            Err(e) => return Err(DeliveryError::ReadFailed(e)),
        };

        let content_type = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(MediaType::from_extension)
            .unwrap_or(MediaType::Binary)
            .as_mime();

        let filename = match download_name {
            Some(name) => name.to_string(),
            None => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "download".to_string()),
        };

        Ok(DeliveredFile {
            bytes,
            content_type,
            filename,
        })
    }

    pub fn public_url(&self, absolute: &Path) -> Option<String> {
        public_url(&self.root, absolute)
    }
}

/// Turns `<root>/outputs/x.mid` into `/outputs/x.mid`. Paths outside `root` yield `None`.
pub fn public_url(root: &Path, absolute: &Path) -> Option<String> {
    let relative = absolute.strip_prefix(root).ok()?;
    let mut url = String::new();
    for component in relative.components() {
        match component {
            Component::Normal(segment) => {
                url.push('/');
                url.push_str(&segment.to_string_lossy().replace('\\', "/"));
            }
            Component::CurDir => {}
            _ => return None,
        }
    }
    if url.is_empty() {
        url.push('/');
    }
    Some(url)
}

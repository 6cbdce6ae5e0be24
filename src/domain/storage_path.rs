use std::fmt;

use super::ConversionId;

/// Location of a file relative to the staging root, always `/`-separated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath(String);

impl StoragePath {
    pub fn new(directory: &str, conversion_id: &ConversionId, extension: Option<&str>) -> Self {
        let directory = directory.trim_matches('/');
        let file_name = match extension {
            Some(ext) => format!("{}.{}", conversion_id.as_uuid(), ext),
            None => conversion_id.as_uuid().to_string(),
        };
        if directory.is_empty() {
            Self(file_name)
        } else {
            Self(format!("{}/{}", directory, file_name))
        }
    }

    pub fn from_raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for StoragePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

use std::fmt;

/// A host path expressed in the Linux subsystem's addressing scheme, e.g. `/mnt/c/data/in.wav`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignPath(String);

impl ForeignPath {
    pub fn from_raw(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ForeignPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPathError {
    #[error("path has no drive root: {0}")]
    MissingDriveRoot(String),
    #[error("path is outside the mount root {mount_root}: {path}")]
    OutsideMountRoot { mount_root: String, path: String },
}

use std::path::Path;

use crate::domain::{ForeignPath, InvalidPathError};

pub trait PathTranslator: Send + Sync {
    fn translate(&self, host_path: &Path) -> Result<ForeignPath, InvalidPathError>;
}

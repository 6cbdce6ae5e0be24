use std::path::Path;

use crate::application::ports::PathTranslator;
use crate::domain::{ForeignPath, InvalidPathError};

pub const DEFAULT_MOUNT_ROOT: &str = "/mnt";

/// Maps drive-rooted host paths (`C:\data\in.wav`) onto the subsystem's drive mounts
/// (`/mnt/c/data/in.wav`).
#[derive(Debug, Clone)]
pub struct WslPathTranslator {
    mount_root: String,
}

impl WslPathTranslator {
    pub fn new(mount_root: impl Into<String>) -> Self {
        let mount_root = mount_root.into();
        let trimmed = mount_root.trim_end_matches('/');
        Self {
            mount_root: trimmed.to_string(),
        }
    }

    pub fn mount_root(&self) -> &str {
        if self.mount_root.is_empty() {
            "/"
        } else {
            &self.mount_root
        }
    }

    /// Inverse of [`PathTranslator::translate`]: `/mnt/c/data/in.wav` becomes `C:\data\in.wav`.
    pub fn to_host(&self, foreign: &ForeignPath) -> Result<String, InvalidPathError> {
        let outside = || InvalidPathError::OutsideMountRoot {
            mount_root: self.mount_root().to_string(),
            path: foreign.to_string(),
        };

        let rest = foreign
            .as_str()
            .strip_prefix(&self.mount_root)
            .and_then(|rest| rest.strip_prefix('/'))
            .ok_or_else(outside)?;
        let (drive, remainder) = match rest.split_once('/') {
            Some((drive, remainder)) => (drive, remainder),
            None => (rest, ""),
        };

        let mut chars = drive.chars();
        let letter = match (chars.next(), chars.next()) {
            (Some(letter), None) if letter.is_ascii_alphabetic() => letter,
            _ => return Err(outside()),
        };

        Ok(format!(
            "{}:\\{}",
            letter.to_ascii_uppercase(),
            remainder.replace('/', "\\")
        ))
    }
}

impl Default for WslPathTranslator {
    fn default() -> Self {
        Self::new(DEFAULT_MOUNT_ROOT)
    }
}

impl PathTranslator for WslPathTranslator {
    fn translate(&self, host_path: &Path) -> Result<ForeignPath, InvalidPathError> {
        let raw = host_path.to_string_lossy();
        let absolute = if split_drive(&raw).is_some() {
            raw.into_owned()
        } else {
            // Relative paths resolve against the current directory; on a non-Windows host
            // this never yields a drive root and is rejected below.
            std::path::absolute(host_path)
                .map(|p| p.to_string_lossy().into_owned())
                .map_err(|_| InvalidPathError::MissingDriveRoot(raw.to_string()))?
        };

        let (drive, remainder) = split_drive(&absolute)
            .ok_or_else(|| InvalidPathError::MissingDriveRoot(absolute.clone()))?;
        let segments = normalize_segments(remainder);

        let mut foreign = format!("{}/{}", self.mount_root, drive.to_ascii_lowercase());
        for segment in segments {
            foreign.push('/');
            foreign.push_str(segment);
        }
        Ok(ForeignPath::from_raw(foreign))
    }
}

/// Splits `C:\rest` or `C:/rest` into the drive letter and the remainder after the colon.
fn split_drive(path: &str) -> Option<(char, &str)> {
    let mut chars = path.chars();
    let letter = chars.next().filter(char::is_ascii_alphabetic)?;
    if chars.next() != Some(':') {
        return None;
    }
    let remainder = &path[2..];
    match remainder.chars().next() {
        None | Some('\\') | Some('/') => Some((letter, remainder)),
        _ => None,
    }
}

fn normalize_segments(remainder: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in remainder.split(['\\', '/']) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments
}

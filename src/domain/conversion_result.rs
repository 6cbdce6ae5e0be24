use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    InvalidPath,
    Launch,
    TimedOut,
    MissingArtifact,
    ProgramError,
    ExitStatus,
    System,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::InvalidPath => "invalid_path",
            FailureKind::Launch => "launch_failed",
            FailureKind::TimedOut => "timed_out",
            FailureKind::MissingArtifact => "missing_artifact",
            FailureKind::ProgramError => "program_error",
            FailureKind::ExitStatus => "exit_status",
            FailureKind::System => "system_error",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Terminal value of one conversion. `Success` is only built once the artifact was seen on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionResult {
    Success { output_path: PathBuf },
    Failure { kind: FailureKind, message: String },
}

impl ConversionResult {
    pub fn success(output_path: impl Into<PathBuf>) -> Self {
        Self::Success {
            output_path: output_path.into(),
        }
    }

    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Success { .. } => "conversion completed",
            Self::Failure { message, .. } => message,
        }
    }

    pub fn output_path(&self) -> Option<&Path> {
        match self {
            Self::Success { output_path } => Some(output_path),
            Self::Failure { .. } => None,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { kind, .. } => Some(*kind),
        }
    }
}

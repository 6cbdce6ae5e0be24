use std::io;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::ProcessOutcome;

/// Runs one shell command inside the foreign environment.
///
/// A non-zero exit code or a timeout is a normal [`ProcessOutcome`]; only a failure to start
/// or supervise the process is an error.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, command: &str, timeout: Duration) -> Result<ProcessOutcome, LaunchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("failed to spawn `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("supervisor task failed: {0}")]
    Supervisor(String),
}

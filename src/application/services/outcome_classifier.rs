use std::path::Path;

use crate::domain::{ConversionResult, FailureKind, ProcessOutcome};

/// Printed by the converter once it has written the output file.
pub const SUCCESS_MARKER: &str = "SUCCESS:";
/// Printed by the converter in front of its error description.
pub const ERROR_MARKER: &str = "ERROR:";

pub const TIMED_OUT_MESSAGE: &str = "processing timed out";
pub const NO_OUTPUT_MESSAGE: &str = "completed but no output produced";

/// Decides the result of a finished invocation.
///
/// `artifact` is the host-side location of the output file; its presence is checked
/// independently of what the converter claims.
pub fn classify(outcome: &ProcessOutcome, artifact: &Path) -> ConversionResult {
    if outcome.timed_out {
        return ConversionResult::failure(FailureKind::TimedOut, TIMED_OUT_MESSAGE);
    }

    let exited_cleanly = outcome.exit_code == Some(0);
    if exited_cleanly && outcome.stdout.contains(SUCCESS_MARKER) {
        if artifact.is_file() {
            return ConversionResult::success(artifact);
        }
        return ConversionResult::failure(FailureKind::MissingArtifact, NO_OUTPUT_MESSAGE);
    }

    if let Some(message) = reported_error(&outcome.stdout) {
        return ConversionResult::failure(FailureKind::ProgramError, message);
    }

    let message = match outcome.exit_code {
        Some(code) => format!("conversion failed with exit code {}", code),
        None => "conversion failed: process exited without an exit code".to_string(),
    };
    ConversionResult::failure(FailureKind::ExitStatus, message)
}

fn reported_error(stdout: &str) -> Option<String> {
    let (_, detail) = stdout.split_once(ERROR_MARKER)?;
    let detail = detail.trim();
    if detail.is_empty() {
        tracing::warn!("Conversion program reported an error without details");
    }
    Some(detail.to_string())
}


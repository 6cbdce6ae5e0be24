use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;

use crate::application::ports::{
    ConversionEvents, LaunchError, PathTranslator, ProcessRunner, StagingStore, StagingStoreError,
};
use crate::domain::{
    ConversionId, ConversionRequest, ConversionResult, ConversionStage, FailureKind, ForeignPath,
    InvalidPathError, StageEvent, StoragePath,
};

use super::outcome_classifier::classify;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);
pub const OUTPUT_EXTENSION: &str = "mid";

const SYSTEM_ERROR_MESSAGE: &str = "system error while processing audio";

#[derive(Debug, Clone)]
pub struct ConversionOptions {
    /// Converter invocation inside the foreign environment, without the `--input`/`--output` flags.
    pub converter: String,
    pub uploads_dir: String,
    pub outputs_dir: String,
    pub timeout: Duration,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            converter: "python3 /opt/transcriber/convert.py".to_string(),
            uploads_dir: "uploads".to_string(),
            outputs_dir: "outputs".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Drives one upload through staging, path translation, the bridge invocation and
/// classification. Every failure ends up in the returned [`ConversionResult`].
pub struct ConversionService<R: ?Sized>
where
    R: ProcessRunner,
{
    runner: Arc<R>,
    translator: Arc<dyn PathTranslator>,
    staging_store: Arc<dyn StagingStore>,
    events: Arc<dyn ConversionEvents>,
    options: ConversionOptions,
}

impl<R: ?Sized> ConversionService<R>
where
    R: ProcessRunner,
{
    pub fn new(
        runner: Arc<R>,
        translator: Arc<dyn PathTranslator>,
        staging_store: Arc<dyn StagingStore>,
        events: Arc<dyn ConversionEvents>,
        options: ConversionOptions,
    ) -> Self {
        Self {
            runner,
            translator,
            staging_store,
            events,
            options,
        }
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    pub async fn process(&self, request: ConversionRequest<'_>) -> ConversionResult {
        let conversion_id = ConversionId::new();
        let input = StoragePath::new(&self.options.uploads_dir, &conversion_id, request.extension());
        let output = StoragePath::new(
            &self.options.outputs_dir,
            &conversion_id,
            Some(OUTPUT_EXTENSION),
        );

        let mut guard = StagedInput::new(Arc::clone(&self.staging_store), input.clone());

        let stages = AssertUnwindSafe(self.run_stages(conversion_id, request, &input, &output));
        let result = match stages.catch_unwind().await {
            Ok(Ok(result)) => result,
            Ok(Err(fault)) => {
                self.emit(conversion_id, ConversionStage::Fault, fault.to_string());
                fault.into_result()
            }
            Err(_) => {
                self.emit(conversion_id, ConversionStage::Fault, "conversion stage panicked");
                ConversionResult::failure(FailureKind::System, SYSTEM_ERROR_MESSAGE)
            }
        };

        match guard.release().await {
            Ok(()) => self.emit(conversion_id, ConversionStage::CleanedUp, input.as_str()),
            Err(e) => self.emit(
                conversion_id,
                ConversionStage::CleanupFailed,
                format!("{}: {}", input, e),
            ),
        }

        result
    }

    async fn run_stages(
        &self,
        conversion_id: ConversionId,
        request: ConversionRequest<'_>,
        input: &StoragePath,
        output: &StoragePath,
    ) -> Result<ConversionResult, StageFault> {
        self.staging_store
            .ensure_directory(&self.options.uploads_dir)
            .await?;
        self.staging_store
            .ensure_directory(&self.options.outputs_dir)
            .await?;

        let written = self.staging_store.store(input, request.stream).await?;
        self.emit(
            conversion_id,
            ConversionStage::Staged,
            format!("{} ({} bytes from {})", input, written, request.filename),
        );

        let host_input = self.staging_store.host_path(input);
        let host_output = self.staging_store.host_path(output);
        let foreign_input = self.translator.translate(&host_input)?;
        let foreign_output = self.translator.translate(&host_output)?;
        self.emit(
            conversion_id,
            ConversionStage::Translated,
            format!("{} -> {}", foreign_input, foreign_output),
        );

        let command = build_command(&self.options.converter, &foreign_input, &foreign_output);
        self.emit(conversion_id, ConversionStage::Launched, command.as_str());

        let outcome = self.runner.run(&command, self.options.timeout).await?;
        self.emit(
            conversion_id,
            ConversionStage::Completed,
            format!(
                "exit_code={:?} timed_out={} stdout={} stderr={}",
                outcome.exit_code, outcome.timed_out, outcome.stdout, outcome.stderr
            ),
        );

        // The artifact check stats the filesystem.
        let result =
            tokio::task::spawn_blocking(move || classify(&outcome, &host_output)).await?;
        self.emit(conversion_id, ConversionStage::Classified, result.message());

        Ok(result)
    }

    fn emit(&self, conversion_id: ConversionId, stage: ConversionStage, detail: impl Into<String>) {
        self.events
            .record(&StageEvent::new(conversion_id, stage, detail));
    }
}

/// `<converter> --input '<in>' --output '<out>'`, with both paths single-quoted for the shell.
pub fn build_command(converter: &str, input: &ForeignPath, output: &ForeignPath) -> String {
    format!(
        "{} --input {} --output {}",
        converter,
        shell_quote(input.as_str()),
        shell_quote(output.as_str())
    )
}

fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

#[derive(Debug, thiserror::Error)]
enum StageFault {
    #[error("staging: {0}")]
    Staging(#[from] StagingStoreError),
    #[error("path translation: {0}")]
    InvalidPath(#[from] InvalidPathError),
    #[error("launch: {0}")]
    Launch(#[from] LaunchError),
    #[error("classification: {0}")]
    Classification(#[from] tokio::task::JoinError),
}

impl StageFault {
    fn into_result(self) -> ConversionResult {
        match self {
            StageFault::InvalidPath(e) => {
                ConversionResult::failure(FailureKind::InvalidPath, format!("invalid path: {}", e))
            }
            StageFault::Launch(LaunchError::Spawn { .. }) => ConversionResult::failure(
                FailureKind::Launch,
                "system error: could not start the conversion program",
            ),
            StageFault::Launch(LaunchError::Supervisor(_))
            | StageFault::Staging(_)
            | StageFault::Classification(_) => {
                ConversionResult::failure(FailureKind::System, SYSTEM_ERROR_MESSAGE)
            }
        }
    }
}

/// Owns the transient input file until it is released.
///
/// If the owning future is dropped before `release` runs, the file is removed on a detached task.
struct StagedInput {
    store: Arc<dyn StagingStore>,
    path: Option<StoragePath>,
}

impl StagedInput {
    fn new(store: Arc<dyn StagingStore>, path: StoragePath) -> Self {
        Self {
            store,
            path: Some(path),
        }
    }

    async fn release(&mut self) -> Result<(), StagingStoreError> {
        match self.path.take() {
            Some(path) => self.store.delete(&path).await,
            None => Ok(()),
        }
    }
}

impl Drop for StagedInput {
    fn drop(&mut self) {
        let Some(path) = self.path.take() else {
            return;
        };
        let store = Arc::clone(&self.store);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = store.delete(&path).await {
                        tracing::warn!(error = %e, path = %path, "Failed to delete abandoned upload");
                    }
                });
            }
            Err(_) => {
                let host_path = store.host_path(&path);
                if let Err(e) = std::fs::remove_file(&host_path) {
                    if e.kind() != std::io::ErrorKind::NotFound {
                        tracing::warn!(error = %e, path = %host_path.display(), "Failed to delete abandoned upload");
                    }
                }
            }
        }
    }
}

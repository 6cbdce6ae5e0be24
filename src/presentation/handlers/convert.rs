use std::io;
use std::path::Path;

use axum::Extension;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Response;
use futures::{StreamExt, TryStreamExt};

use crate::application::ports::ProcessRunner;
use crate::application::services::OUTPUT_EXTENSION;
use crate::domain::{ConversionRequest, ConversionResult};
use crate::infrastructure::observability::RequestId;
use crate::presentation::state::AppState;

use super::responses::{error_response, failure_response, file_response};

#[tracing::instrument(skip_all, fields(request_id = %request_id))]
pub async fn convert_handler<R>(
    State(state): State<AppState<R>>,
    Extension(request_id): Extension<RequestId>,
    mut multipart: Multipart,
) -> Response
where
    R: ProcessRunner + 'static + ?Sized,
{
    let field = match multipart.next_field().await {
        Ok(Some(f)) => f,
        Ok(None) => {
            tracing::warn!("Convert request with no file");
            return error_response(StatusCode::BAD_REQUEST, "No file uploaded");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read multipart");
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Failed to read multipart: {}", e),
            );
        }
    };

    let filename = match field.file_name() {
        Some(name) if !name.trim().is_empty() => name.to_string(),
        _ => {
            tracing::warn!("Uploaded part has no filename");
            return error_response(StatusCode::BAD_REQUEST, "Uploaded file has no filename");
        }
    };

    if Path::new(&filename).extension().is_none() {
        tracing::warn!(filename = %filename, "Uploaded file has no extension");
        return error_response(StatusCode::BAD_REQUEST, "Uploaded file has no extension");
    }

    tracing::debug!(filename = %filename, "Processing audio upload");

    let stream = field
        .map_err(|e| io::Error::other(e.to_string()))
        .boxed();
    let request = ConversionRequest::new(filename.clone(), stream);

    match state.conversion_service.process(request).await {
        ConversionResult::Success { output_path } => {
            let download_name = download_name(&filename);
            match state
                .file_delivery
                .deliver(&output_path, Some(&download_name))
                .await
            {
                Ok(file) => {
                    tracing::info!(filename = %filename, bytes = file.bytes.len(), "Conversion delivered");
                    file_response(file, state.file_delivery.public_url(&output_path))
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read conversion output");
                    error_response(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Conversion output could not be read",
                    )
                }
            }
        }
        ConversionResult::Failure { kind, message } => {
            tracing::warn!(filename = %filename, kind = %kind, message = %message, "Conversion failed");
            failure_response(kind, &message)
        }
    }
}

/// `<original stem>.mid`, restricted to characters that are safe inside a quoted header value.
fn download_name(filename: &str) -> String {
    let stem: String = Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ' '))
        .collect();
    let stem = stem.trim();
    if stem.is_empty() {
        format!("transcription.{}", OUTPUT_EXTENSION)
    } else {
        format!("{}.{}", stem, OUTPUT_EXTENSION)
    }
}

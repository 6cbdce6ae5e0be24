use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;

use crate::application::ports::ProcessRunner;
use crate::domain::StoragePath;
use crate::infrastructure::delivery::DeliveryError;
use crate::presentation::state::AppState;

use super::responses::{error_response, file_response};

#[tracing::instrument(skip(state))]
pub async fn download_output_handler<R>(
    State(state): State<AppState<R>>,
    Path(filename): Path<String>,
) -> Response
where
    R: ProcessRunner + 'static + ?Sized,
{
    if !is_plain_file_name(&filename) {
        tracing::warn!(filename = %filename, "Rejected output file name");
        return error_response(StatusCode::BAD_REQUEST, "Invalid file name");
    }

    let outputs_dir = state.conversion_service.options().outputs_dir.trim_matches('/');
    let storage_path = StoragePath::from_raw(format!("{}/{}", outputs_dir, filename));
    let host_path = state.staging_store.host_path(&storage_path);

    match state.file_delivery.deliver(&host_path, None).await {
        Ok(file) => file_response(file, state.file_delivery.public_url(&host_path)),
        Err(DeliveryError::NotFound(_)) => {
            error_response(StatusCode::NOT_FOUND, format!("Output not found: {}", filename))
        }
        Err(e) => {
            tracing::error!(error = %e, path = %storage_path, "Failed to read output");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Output could not be read")
        }
    }
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains("..")
}

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::ProcessRunner;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub converter: String,
    pub timeout_secs: u64,
    pub max_upload_bytes: usize,
}

pub async fn health_handler<R>(State(state): State<AppState<R>>) -> impl IntoResponse
where
    R: ProcessRunner + ?Sized,
{
    let options = state.conversion_service.options();
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy",
            converter: options.converter.clone(),
            timeout_secs: options.timeout.as_secs(),
            max_upload_bytes: state.max_upload_bytes,
        }),
    )
}

use axum::Json;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LOCATION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::FailureKind;
use crate::infrastructure::delivery::DeliveredFile;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
}

pub fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
            kind: None,
        }),
    )
        .into_response()
}

pub fn failure_response(kind: FailureKind, message: &str) -> Response {
    (
        status_for(kind),
        Json(ErrorResponse {
            error: message.to_string(),
            kind: Some(kind.as_str()),
        }),
    )
        .into_response()
}

pub fn status_for(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::InvalidPath => StatusCode::BAD_REQUEST,
        FailureKind::ProgramError => StatusCode::UNPROCESSABLE_ENTITY,
        FailureKind::MissingArtifact | FailureKind::ExitStatus => StatusCode::BAD_GATEWAY,
        FailureKind::TimedOut => StatusCode::GATEWAY_TIMEOUT,
        FailureKind::Launch | FailureKind::System => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub fn file_response(file: DeliveredFile, public_url: Option<String>) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(file.content_type));
    if let Ok(value) = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file.filename)) {
        headers.insert(CONTENT_DISPOSITION, value);
    }
    if let Some(value) = public_url.and_then(|url| HeaderValue::from_str(&url).ok()) {
        headers.insert(CONTENT_LOCATION, value);
    }
    (StatusCode::OK, headers, file.bytes).into_response()
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::SourceError;

/// The only error body clients ever see.
pub const GENERIC_ERROR: &str = "An error has occurred";

#[derive(Debug)]
pub struct AppError {
    pub message: String,
    pub code: Option<String>,
}

impl AppError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), code: None }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(code = ?self.code, "request failed: {}", self.message);
        // same status as a successful response; detail stays in the logs
        (StatusCode::OK, Json(GENERIC_ERROR)).into_response()
    }
}

impl From<SourceError> for AppError {
    fn from(e: SourceError) -> Self {
        let code = format!("{}_unavailable", e.origin());
        AppError::new(e.to_string()).with_code(code)
    }
}

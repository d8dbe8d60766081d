use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Request-terminating errors and their HTTP mapping.
#[derive(Debug, Error)]
pub enum AppError {
    /// An upstream CLI call failed, timed out, or its output could not be
    /// parsed.
    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Validation(String),

    #[error("method not allowed")]
    MethodNotAllowed,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %message, "Request failed");
        }

        let body = json!({ "error": message });
        (status, Json(body)).into_response()
    }
}

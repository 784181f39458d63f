//! Error handling for the bookshelf HTTP layer

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// Header carrying the machine-readable error code.
pub const ERROR_CODE_HEADER: &str = "x-error-code";
/// Header carrying the id logged alongside the error.
pub const TRACE_ID_HEADER: &str = "x-trace-id";

/// Application error types that map to HTTP responses.
///
/// Responses are plain text holding exactly the message.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("bad request: {message}")]
    BadRequest { message: String, code: String },

    #[error("not found: {message}")]
    NotFound { message: String, code: String },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            code: "bad_request".to_string(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            code: "not_found".to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let trace_id = Uuid::new_v4();
        let timestamp = OffsetDateTime::now_utc().to_string();
        let status = self.status();

        let (error_code, message) = match self {
            AppError::BadRequest { message, code } | AppError::NotFound { message, code } => {
                (code, message)
            }
            AppError::Internal(e) => ("internal_error".to_string(), format!("{e:#}")),
        };

        tracing::error!(
            trace_id = %trace_id,
            error_code = %error_code,
            status_code = %status.as_u16(),
            timestamp = %timestamp,
            message = %message,
            "Request error"
        );

        // Hide internal details outside debug builds
        let message = if cfg!(not(debug_assertions)) && status == StatusCode::INTERNAL_SERVER_ERROR
        {
            "An internal server error occurred".to_string()
        } else {
            message
        };

        let mut response = (status, message).into_response();
        let headers = response.headers_mut();
        if let Ok(value) = HeaderValue::from_str(&error_code) {
            headers.insert(ERROR_CODE_HEADER, value);
        }
        if let Ok(value) = HeaderValue::from_str(&trace_id.to_string()) {
            headers.insert(TRACE_ID_HEADER, value);
        }
        response
    }
}

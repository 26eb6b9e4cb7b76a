use std::any::Any;

use crate::app_error::{AppError, ErrorCode};
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error before it gets converted into a status response.
        match &self {
            AppError::Validation(_) | AppError::Duplicate => {
                tracing::warn!(error = %self, "Request rejected")
            }
            AppError::Storage(_) | AppError::Internal(_) => {
                tracing::error!(error = ?self, "Request failed")
            }
        }

        match self {
            AppError::Validation(msg) => {
                error_resp(StatusCode::BAD_REQUEST, ErrorCode::ValidationError, &msg)
            }
            AppError::Duplicate => error_resp(
                StatusCode::BAD_REQUEST,
                ErrorCode::DuplicateEmail,
                "This email is already on our waitlist!",
            ),
            AppError::Storage(_) => error_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::StorageError,
                "Failed to save your information. Please try again.",
            ),
            AppError::Internal(_) => error_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalError,
                "An error occurred. Please try again.",
            ),
        }
    }
}

fn error_resp(status: StatusCode, code: ErrorCode, message: &str) -> Response {
    let body = serde_json::json!({
        "success": false,
        "code": code.as_str(),
        "message": message,
    });
    (status, Json(body)).into_response()
}

/// Response for a handler that panicked. The panic payload is logged, never
/// sent to the client.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");

    error_resp(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorCode::InternalError,
        "An error occurred. Please try again.",
    )
}

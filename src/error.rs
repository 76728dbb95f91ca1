//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::BackendError;
use crate::booking::responses::ErrorResponse;
use crate::booking::validation::FieldErrors;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Booking has invalid fields")]
    Validation(FieldErrors),

    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Status code and JSON body sent to the browser
    fn to_response_parts(&self) -> (StatusCode, ErrorResponse) {
        let (status, error_type, details) = match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", None),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request", None),
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation",
                serde_json::to_value(errors).ok(),
            ),
            AppError::Backend(BackendError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "not_found", None)
            }
            AppError::Backend(BackendError::Validation(body)) => {
                tracing::warn!("Backend rejected booking: {}", body);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "backend_validation",
                    serde_json::from_str(body).ok(),
                )
            }
            AppError::Backend(e) => {
                tracing::error!("Backend error: {}", e);
                (StatusCode::BAD_GATEWAY, "backend", None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal", None)
            }
        };

        let message = match self {
            AppError::Backend(BackendError::NotFound(_)) => {
                "Not found in booking service".to_string()
            }
            AppError::Backend(BackendError::Validation(_)) => {
                "Booking service rejected the request".to_string()
            }
            AppError::Backend(_) => "Booking service unavailable".to_string(),
            AppError::Internal(_) => "Internal error".to_string(),
            other => other.to_string(),
        };

        let body = ErrorResponse {
            error_type: error_type.to_string(),
            message,
            details,
        };

        (status, body)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.to_response_parts();
        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

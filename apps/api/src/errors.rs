#![allow(dead_code)]

//! Application error type and the backend-failure classifier.
//!
//! The Gemini adapter raises raw failures; `classify` is the single point
//! that converts them into the user-facing taxonomy. Orchestrators only
//! propagate with `?` — the `From<GeminiError>` impl below runs the
//! classifier exactly once on the way out. Handlers render every failure
//! as `{"success": false, "error": message}` with the classified status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::gemini::GeminiError;

/// A backend failure reduced to a status code and a human-readable message.
/// Never carries backend-internal detail beyond the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    pub status: StatusCode,
    pub message: String,
}

impl ClassifiedError {
    /// Fallback for failures that are not backend errors at all.
    pub fn unexpected() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "An unexpected error occurred".to_string(),
        }
    }
}

/// Maps a raw adapter failure onto the error taxonomy.
///
/// The missing-image condition is typed and checked first; everything else
/// is best-effort substring matching over the failure's display message, in
/// precedence order. The backend offers no structured error category worth
/// preferring over this.
pub fn classify(err: &GeminiError) -> ClassifiedError {
    if matches!(err, GeminiError::MissingImagePayload) {
        return ClassifiedError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        };
    }

    let raw = err.to_string();
    if raw.contains("API key") {
        ClassifiedError {
            status: StatusCode::UNAUTHORIZED,
            message: "Invalid API key".to_string(),
        }
    } else if raw.contains("quota") || raw.contains("RESOURCE_EXHAUSTED") {
        ClassifiedError {
            status: StatusCode::TOO_MANY_REQUESTS,
            message: "API quota exceeded".to_string(),
        }
    } else if raw.contains("Thinking is not enabled") {
        ClassifiedError {
            status: StatusCode::BAD_REQUEST,
            message: "This model does not support thinking configuration".to_string(),
        }
    } else {
        ClassifiedError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: raw,
        }
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{}", .0.message)]
    Backend(ClassifiedError),
}

impl From<GeminiError> for AppError {
    fn from(err: GeminiError) -> Self {
        AppError::Backend(classify(&err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Backend(classified) => {
                if classified.status.is_server_error() {
                    tracing::error!("backend error: {}", classified.message);
                }
                (classified.status, classified.message)
            }
        };

        let body = Json(json!({
            "success": false,
            "error": message
        }));

        (status, body).into_response()
    }
}

// SPDX-License-Identifier: MIT

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::OnceLock;

use crate::envelope::Envelope;

/// Whether internal error messages may appear in response bodies.
/// Set once at startup from the configured environment; defaults to
/// development (messages visible) when never set, which is what tests want.
static DEVELOPMENT_MODE: OnceLock<bool> = OnceLock::new();

/// Record the deployment mode for error rendering. Later calls are ignored.
pub fn set_development_mode(enabled: bool) {
    let _ = DEVELOPMENT_MODE.set(enabled);
}

fn development_mode() -> bool {
    *DEVELOPMENT_MODE.get().unwrap_or(&true)
}

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Auth(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                let message = if development_mode() {
                    err.to_string()
                } else {
                    "Internal server error".to_string()
                };
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(Envelope::<()>::failure(message))).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;

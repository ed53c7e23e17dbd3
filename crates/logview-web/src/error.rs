//! HTTP error type and mappings from the domain errors.
//!
//! Handlers return [`HttpError`]; its `IntoResponse` impl produces a status
//! code plus a small JSON body, so scripts and humans both get something
//! legible.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use logview_core::{ConfigError, RegistryError};
use serde::Serialize;
use thiserror::Error;

/// HTTP-facing error for the logview routes.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request (invalid mapping or body).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            HttpError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            HttpError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            HttpError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<RegistryError> for HttpError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::UnknownProject(name) => {
                HttpError::NotFound(format!("project '{name}' not found"))
            }
        }
    }
}

impl From<ConfigError> for HttpError {
    fn from(err: ConfigError) -> Self {
        match &err {
            // Mapping validation failures are the submitter's problem.
            // Read/parse failures of the startup file never reach a handler,
            // so anything else here is our fault.
            ConfigError::MissingFile(_) | ConfigError::NotARegularFile(_) => {
                HttpError::BadRequest(err.to_string())
            }
            ConfigError::Read { .. } | ConfigError::Parse { .. } => {
                HttpError::Internal(err.to_string())
            }
        }
    }
}

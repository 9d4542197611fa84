//! Centralized error handling.
//!
//! `AppError` is the typed error every backend operation resolves to. It
//! carries the HTTP status it is reported with and converts straight into
//! an axum response of the form `{"error": kind, "message": message}`.

use std::net::SocketAddr;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::config::{MSG_INVALID_CREDENTIALS, MSG_USER_EXISTS};

/// Typed failure of a backend operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Backend unreachable or transport-level failure
    #[error("{message}")]
    Db { status: StatusCode, message: String },

    /// Backend reached but rejected the operation or answered unexpectedly
    #[error("{message}")]
    Authentication { status: StatusCode, message: String },
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse<'a> {
    error: &'static str,
    message: &'a str,
}

impl AppError {
    /// Kind tag reported to callers
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Db { .. } => "db",
            AppError::Authentication { .. } => "authentication",
        }
    }

    /// HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Db { status, .. } | AppError::Authentication { status, .. } => *status,
        }
    }

    /// Message reported to callers
    pub fn message(&self) -> &str {
        match self {
            AppError::Db { message, .. } | AppError::Authentication { message, .. } => message,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.kind(),
            message: self.message(),
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    /// Transport failure talking to the backend (502)
    pub fn db(msg: impl Into<String>) -> Self {
        AppError::Db {
            status: StatusCode::BAD_GATEWAY,
            message: msg.into(),
        }
    }

    pub fn authentication(status: StatusCode, msg: impl Into<String>) -> Self {
        AppError::Authentication {
            status,
            message: msg.into(),
        }
    }

    /// Backend refused the supplied credentials (401)
    pub fn invalid_credentials() -> Self {
        Self::authentication(StatusCode::UNAUTHORIZED, MSG_INVALID_CREDENTIALS)
    }

    /// User document already exists (409)
    pub fn user_exists() -> Self {
        Self::authentication(StatusCode::CONFLICT, MSG_USER_EXISTS)
    }

    /// Backend answered with a status we do not map (500)
    pub fn unexpected(reason: impl Into<String>) -> Self {
        Self::authentication(StatusCode::INTERNAL_SERVER_ERROR, reason)
    }
}

/// Listener lifecycle failures.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server already running on {0}")]
    AlreadyRunning(SocketAddr),

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),

    #[error("Server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Failed to build backend client: {0}")]
    Backend(#[from] reqwest::Error),
}

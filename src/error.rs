//! Error taxonomy for the store boundary and the HTTP boundary.
//!
//! - [`StoreError`] is returned by every [`crate::domain::repositories::UrlStore`]
//!   implementation. Absence of a mapping is a structured [`StoreError::NotFound`]
//!   for all backends.
//! - [`AppError`] is returned by services and handlers and renders as a JSON
//!   error envelope `{ "error": "..." }`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// User-facing message for a short code with no stored mapping.
pub const NOT_FOUND_MESSAGE: &str = "no long url associated to this short url";

/// Message returned to clients for any storage fault.
const INTERNAL_MESSAGE: &str = "internal server error";

/// Failures raised by a URL store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No mapping exists for the requested code.
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,

    /// A mapping for this code is already stored. Never overwritten.
    #[error("short code `{code}` is already stored")]
    Conflict { code: String },

    /// The store was closed and no longer serves requests.
    #[error("store is closed")]
    Closed,

    /// The operation did not complete before its deadline.
    #[error("store operation `{operation}` timed out")]
    Timeout { operation: &'static str },

    /// The database rejected or failed the operation.
    #[error("store operation `{operation}` failed for code `{code}`: {source}")]
    Database {
        operation: &'static str,
        code: String,
        #[source]
        source: sqlx::Error,
    },

    /// The connection pool could not be created.
    #[error("unable to create connection pool: {0}")]
    Connect(#[source] sqlx::Error),

    /// Schema migrations failed to apply.
    #[error("failed to apply migrations: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Application error returned by services and HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed client input, such as an unparsable request body.
    #[error("{0}")]
    Validation(String),

    /// The short code has no associated long URL.
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,

    /// Any failure reaching or using the store.
    #[error("storage failure: {0}")]
    Storage(#[source] StoreError),

    /// The stored target cannot be sent back as a redirect location.
    #[error("invalid redirect target: {0}")]
    InvalidTarget(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::NotFound,
            other => AppError::Storage(other),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("invalid request body: {err}"))
    }
}

/// JSON error envelope.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE.to_string()),
            AppError::Storage(err) => {
                tracing::error!(error = %err, "storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
            AppError::InvalidTarget(reason) => {
                tracing::error!(%reason, "stored long url is not a valid location header");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

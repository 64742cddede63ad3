//! Error types and HTTP response handling.
//!
//! `AppError` is the single error type returned across the service boundary. Its variants
//! form a closed set of tagged outcomes (not found, conflict, validation, auth, ...) and
//! `IntoResponse` maps each variant to a status code, so controllers never inspect error
//! messages to decide how to respond.

pub mod auth;
pub mod config;
pub mod search;
pub mod storage;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, search::SearchError, storage::StorageError,
    },
};

/// Top-level application error type.
///
/// Domain-specific errors like `AuthError` handle their own response mapping, tagged
/// variants carry a client-facing message, and transparent infrastructure wrappers all
/// become 500 responses with the detail logged server-side.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Authentication or authorization error.
    ///
    /// Delegates to `AuthError::into_response()` for 401/403 mapping.
    #[error(transparent)]
    AuthErr(#[from] AuthError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Object storage failure.
    #[error(transparent)]
    StorageErr(#[from] StorageError),

    /// Search engine failure that was not absorbed by the database fallback.
    #[error(transparent)]
    SearchErr(#[from] SearchError),

    /// Filesystem error outside the storage client, e.g. while managing backups.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// HTTP client request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Resource not found. Results in 404 Not Found.
    #[error("{0}")]
    NotFound(String),

    /// Uniqueness or state conflict. Results in 409 Conflict.
    #[error("{0}")]
    Conflict(String),

    /// Invalid request input. Results in 400 Bad Request.
    #[error("{0}")]
    Validation(String),

    /// Upload exceeds the configured size limit. Results in 413.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Upload content type is not on the allow-list. Results in 415.
    #[error("{0}")]
    UnsupportedMediaType(String),

    /// A required backend is unavailable for this operation. Results in 503.
    #[error("{0}")]
    Unavailable(String),

    /// An operation exceeded its deadline. Results in 504.
    #[error("{0}")]
    Timeout(String),

    /// Internal server error with custom message.
    ///
    /// The provided message is logged but a generic message is returned to the client.
    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - `Validation`
/// - 404 Not Found - `NotFound`
/// - 409 Conflict - `Conflict`
/// - 413 Payload Too Large - `PayloadTooLarge`
/// - 415 Unsupported Media Type - `UnsupportedMediaType`
/// - 503 Service Unavailable - `Unavailable`
/// - 504 Gateway Timeout - `Timeout`
/// - Variable - `AuthErr`, delegated to `AuthError::into_response()`
/// - 500 Internal Server Error - everything else, with a generic message
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::AuthErr(err) => return err.into_response(),
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                return internal_server_error();
            }
            err => return InternalServerError(err).into_response(),
        };

        (status, Json(ErrorDto::new(self.to_string()))).into_response()
    }
}

fn internal_server_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorDto::new("Internal server error")),
    )
        .into_response()
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" message to the
/// client to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        internal_server_error()
    }
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Request carried no `Authorization: Bearer` header.
    #[error("Missing bearer token")]
    MissingToken,

    /// Token could not be decoded or failed signature/issuer validation.
    #[error("Invalid bearer token: {0}")]
    InvalidToken(String),

    /// Token signature is valid but `exp` has passed.
    #[error("Bearer token expired")]
    TokenExpired,

    /// Login with an unknown user or wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Token subject no longer refers to a live user.
    #[error("User {0} not found")]
    UserNotFound(Uuid),

    /// User exists but has been deactivated.
    #[error("User {0} is inactive")]
    AccountInactive(Uuid),

    /// User lacks the permission `object:action`.
    #[error("User {user_id} denied {action} on {object}")]
    AccessDenied {
        user_id: Uuid,
        object: String,
        action: String,
    },

    /// Authenticated user attempted to modify a resource owned by someone else.
    #[error("User {0} is not the owner of this resource")]
    NotOwner(Uuid),
}

/// Converts authentication errors into HTTP responses.
///
/// Client-facing messages are kept generic; the detailed variant is logged at debug level.
///
/// # Returns
/// - 401 Unauthorized - Missing, invalid or expired token, unknown user, bad credentials
/// - 403 Forbidden - Inactive account, missing permission, not the owner
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        let (status, message) = match self {
            Self::MissingToken | Self::InvalidToken(_) | Self::UserNotFound(_) => {
                (StatusCode::UNAUTHORIZED, "Authentication required")
            }
            Self::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
            Self::InvalidCredentials => (StatusCode::UNAUTHORIZED, "invalid credentials"),
            Self::AccountInactive(_) => (StatusCode::FORBIDDEN, "Account is inactive"),
            Self::AccessDenied { .. } | Self::NotOwner(_) => {
                (StatusCode::FORBIDDEN, "You do not have permission to perform this action")
            }
        };

        (status, Json(ErrorDto::new(message))).into_response()
    }
}

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    config::Config,
    data::user::UserRepository,
    error::{auth::AuthError, AppError},
    model::{rbac::Action, user::User},
    service::{auth::token::decode_token, rbac::RbacService},
    state::AppState,
};

/// A permission a route requires, checked against the caller's role policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Permission {
    pub object: &'static str,
    pub action: Action,
}

impl Permission {
    pub const fn new(object: &'static str, action: Action) -> Self {
        Self { object, action }
    }
}

/// The authenticated caller, resolved from the `Authorization: Bearer` header.
///
/// Extraction fails with 401 when the token is missing, malformed, expired or names a user
/// that no longer exists, and with 403 when the account is inactive.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn id(&self) -> Uuid {
        self.0.id
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        let user = authenticate(&state.db, &state.config, header).await?;

        Ok(Self(user))
    }
}

/// Resolves an `Authorization` header value to a live, active user.
///
/// # Arguments
/// - `db` - Database connection
/// - `config` - Provides the token secret and issuer
/// - `header` - Raw header value, if the request carried one
///
/// # Returns
/// - `Ok(User)` - Token valid and user active
/// - `Err(AuthError::MissingToken)` - No header or not a bearer scheme
/// - `Err(AuthError::InvalidToken | TokenExpired)` - Token rejected
/// - `Err(AuthError::UserNotFound)` - Subject deleted or unknown
/// - `Err(AuthError::AccountInactive)` - User deactivated
pub async fn authenticate(
    db: &DatabaseConnection,
    config: &Config,
    header: Option<&str>,
) -> Result<User, AppError> {
    let token = header.and_then(bearer_token).ok_or(AuthError::MissingToken)?;

    let claims = decode_token(token, config)?;
    let user_id = claims.user_id()?;

    let Some(user) = UserRepository::new(db).find_by_id(user_id).await? else {
        return Err(AuthError::UserNotFound(user_id).into());
    };

    if !user.is_active {
        return Err(AuthError::AccountInactive(user_id).into());
    }

    Ok(user)
}

fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    user: &'a AuthUser,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, user: &'a AuthUser) -> Self {
        Self { db, user }
    }

    /// Checks every permission in order, failing on the first one the user lacks.
    ///
    /// # Returns
    /// - `Ok(())` - All permissions granted (an empty list always passes)
    /// - `Err(AuthError::AccessDenied)` - A permission is missing
    pub async fn require(&self, permissions: &[Permission]) -> Result<(), AppError> {
        let rbac = RbacService::new(self.db);

        for permission in permissions {
            rbac.enforce(self.user.id(), permission.object, permission.action)
                .await?;
        }

        Ok(())
    }
}

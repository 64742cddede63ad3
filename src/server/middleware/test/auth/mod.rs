use crate::server::{
    config::test_config,
    error::{auth::AuthError, AppError},
    middleware::auth::{authenticate, AuthGuard, AuthUser, Permission},
    model::{rbac::Action, user::User},
    service::auth::token::issue_token,
};
use test_utils::{builder::TestBuilder, factory};

mod authenticate;
mod require;

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

fn auth_user(user: entity::user::Model) -> AuthUser {
    AuthUser(User::from_entity(user))
}

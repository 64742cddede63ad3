//! Local account registration, login and password management.

pub mod password;
pub mod token;

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    config::Config,
    data::{role::RoleRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    model::user::{CreateUserParams, LoginResult, RegisterParams, User},
    service::rbac::RbacService,
};

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 50;
const PASSWORD_MIN: usize = 8;

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, config: &'a Config) -> Self {
        Self { db, config }
    }

    /// Registers a new local account.
    ///
    /// All input validation runs before any write, so a rejected registration never leaves a
    /// row behind. The very first account is granted the admin role.
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(AppError::Validation)` - Malformed input or password confirmation mismatch
    /// - `Err(AppError::Conflict)` - Username or email already registered
    pub async fn register(&self, params: RegisterParams) -> Result<User, AppError> {
        validate_username(&params.username)?;
        validate_email(&params.email)?;
        validate_new_password(&params.password, &params.confirm_password)?;

        let repo = UserRepository::new(self.db);

        if repo.username_exists(&params.username).await? {
            return Err(AppError::conflict(format!(
                "Username '{}' is already taken",
                params.username
            )));
        }
        if repo.email_exists(&params.email, None).await? {
            return Err(AppError::conflict(format!(
                "Email '{}' is already registered",
                params.email
            )));
        }

        let is_first_user = repo.count_all().await? == 0;
        let password_hash = password::hash_password(&params.password)?;

        let user = repo
            .create(CreateUserParams {
                username: params.username,
                email: params.email,
                password_hash,
                full_name: params.full_name,
            })
            .await?;

        if is_first_user {
            let admin = RbacService::new(self.db).seed().await?;
            RoleRepository::new(self.db).assign(user.id, admin.id).await?;

            tracing::info!("Granted admin role to first user {}", user.username);
        }

        Ok(user)
    }

    /// Authenticates by username or email and issues an access token.
    ///
    /// Unknown accounts and wrong passwords produce the same error.
    pub async fn login(&self, login: &str, password: &str) -> Result<LoginResult, AppError> {
        let repo = UserRepository::new(self.db);

        let Some(user) = repo.find_by_login(login.trim()).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !password::verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        if !user.is_active {
            return Err(AuthError::AccountInactive(user.id).into());
        }

        repo.touch_last_login(user.id).await?;

        let (access_token, expires_in) = token::issue_token(user.id, self.config)?;

        Ok(LoginResult {
            access_token,
            expires_in,
            user,
        })
    }

    pub async fn me(&self, user_id: Uuid) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(user_id).into())
    }

    /// Replaces the password of `user_id` after checking the current one.
    pub async fn change_password(
        &self,
        user_id: Uuid,
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<(), AppError> {
        validate_new_password(new_password, confirm_password)?;

        let user = self.me(user_id).await?;

        if !password::verify_password(current_password, &user.password_hash)? {
            return Err(AppError::validation("Current password is incorrect"));
        }

        let password_hash = password::hash_password(new_password)?;
        UserRepository::new(self.db)
            .set_password_hash(user_id, password_hash)
            .await?;

        Ok(())
    }
}

fn validate_username(username: &str) -> Result<(), AppError> {
    let len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err(AppError::validation(format!(
            "Username must be between {} and {} characters",
            USERNAME_MIN, USERNAME_MAX
        )));
    }

    let allowed = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
    if !allowed {
        return Err(AppError::validation(
            "Username may only contain letters, digits, '_', '.' and '-'",
        ));
    }

    Ok(())
}

fn validate_email(email: &str) -> Result<(), AppError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(AppError::validation("Email address is invalid")),
    }
}

fn validate_new_password(password: &str, confirm_password: &str) -> Result<(), AppError> {
    if password.chars().count() < PASSWORD_MIN {
        return Err(AppError::validation(format!(
            "Password must be at least {} characters",
            PASSWORD_MIN
        )));
    }
    if password != confirm_password {
        return Err(AppError::validation(
            "Password and confirmation do not match",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_rules() {
        assert!(validate_username("ab").is_err());
        assert!(validate_username("alice.smith-01").is_ok());
        assert!(validate_username("alice smith").is_err());
        assert!(validate_username(&"a".repeat(51)).is_err());
    }

    #[test]
    fn email_needs_both_sides_of_at() {
        assert!(validate_email("a@b").is_ok());
        assert!(validate_email("@b").is_err());
        assert!(validate_email("ab").is_err());
    }

    #[test]
    fn password_confirmation_must_match() {
        assert!(validate_new_password("longenough", "longenough").is_ok());
        assert!(matches!(
            validate_new_password("longenough", "different1"),
            Err(AppError::Validation(_))
        ));
        assert!(validate_new_password("short", "short").is_err());
    }
}

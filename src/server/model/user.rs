//! User domain models and parameters.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::user::UserDto;

/// Application user. The password hash never leaves the server layer.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Converts the user domain model to a DTO for API responses.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            username: self.username,
            email: self.email,
            full_name: self.full_name,
            is_active: self.is_active,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Converts an entity model to a user domain model at the repository boundary.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            email: entity.email,
            password_hash: entity.password_hash,
            full_name: entity.full_name,
            is_active: entity.is_active,
            last_login_at: entity.last_login_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Parameters for inserting a user. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateUserParams {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateUserParams {
    pub fn from_dto(dto: crate::model::user::UpdateUserDto) -> Self {
        Self {
            full_name: dto.full_name,
            email: dto.email,
            is_active: dto.is_active,
        }
    }
}

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct RegisterParams {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub full_name: Option<String>,
}

impl RegisterParams {
    pub fn from_dto(dto: crate::model::auth::RegisterDto) -> Self {
        Self {
            username: dto.username.trim().to_string(),
            email: dto.email.trim().to_lowercase(),
            password: dto.password,
            confirm_password: dto.confirm_password,
            full_name: dto.full_name,
        }
    }
}

/// Issued access token together with the user it was issued for.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub access_token: String,
    pub expires_in: i64,
    pub user: User,
}

impl LoginResult {
    pub fn into_dto(self) -> crate::model::auth::TokenDto {
        crate::model::auth::TokenDto {
            access_token: self.access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.expires_in,
            user: self.user.into_dto(),
        }
    }
}

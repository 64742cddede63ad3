use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::user::UserDto;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterDto {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub full_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginDto {
    /// Username or email address.
    pub login: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenDto {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserDto,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChangePasswordDto {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

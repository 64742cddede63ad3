use super::*;
use crate::server::{
    data::{role::RoleRepository, user::UserRepository},
    model::{role::ADMIN_ROLE, user::RegisterParams},
    service::auth::AuthService,
};

mod change_password;
mod login;
mod register;

fn register_params(username: &str, password: &str, confirm: &str) -> RegisterParams {
    RegisterParams {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password: password.to_string(),
        confirm_password: confirm.to_string(),
        full_name: None,
    }
}

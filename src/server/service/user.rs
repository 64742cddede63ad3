//! User administration and role assignment.
//!
//! Registration and password changes live in `AuthService`; this service covers what an
//! administrator does with existing accounts.

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::{role::RoleRepository, user::UserRepository},
    error::AppError,
    model::{
        pagination::{Paginated, Pagination},
        role::Role,
        user::{UpdateUserParams, User},
    },
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_paginated(
        &self,
        search: Option<&str>,
        pagination: Pagination,
    ) -> Result<Paginated<User>, AppError> {
        let repo = UserRepository::new(self.db);

        Ok(repo.get_paginated(search, pagination).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<User, AppError> {
        let repo = UserRepository::new(self.db);

        repo.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("user {} not found", id)))
    }

    /// Updates profile fields and the active flag.
    ///
    /// # Returns
    /// - `Err(AppError::Conflict)` - New email belongs to another user
    /// - `Err(AppError::NotFound)` - User missing or deleted
    pub async fn update(&self, id: Uuid, mut params: UpdateUserParams) -> Result<User, AppError> {
        let repo = UserRepository::new(self.db);

        if let Some(email) = params.email.take() {
            let email = email.trim().to_lowercase();
            if !email.contains('@') {
                return Err(AppError::validation("Email address is invalid"));
            }
            if repo.email_exists(&email, Some(id)).await? {
                return Err(AppError::conflict(format!(
                    "Email '{}' is already registered",
                    email
                )));
            }
            params.email = Some(email);
        }

        repo.update(id, params)
            .await?
            .ok_or_else(|| AppError::not_found(format!("user {} not found", id)))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let repo = UserRepository::new(self.db);

        if !repo.soft_delete(id).await? {
            return Err(AppError::not_found(format!("user {} not found", id)));
        }

        tracing::info!("Soft-deleted user {}", id);

        Ok(())
    }

    pub async fn get_roles(&self, user_id: Uuid) -> Result<Vec<Role>, AppError> {
        self.get(user_id).await?;

        Ok(RoleRepository::new(self.db).get_by_user(user_id).await?)
    }

    /// Assigns a role. Assigning a role the user already holds succeeds without change.
    pub async fn assign_role(&self, user_id: Uuid, role_id: Uuid) -> Result<Vec<Role>, AppError> {
        let role_repo = RoleRepository::new(self.db);

        self.get(user_id).await?;
        if role_repo.find_by_id(role_id).await?.is_none() {
            return Err(AppError::not_found(format!("role {} not found", role_id)));
        }

        if role_repo.assign(user_id, role_id).await? {
            tracing::info!("Assigned role {} to user {}", role_id, user_id);
        }

        Ok(role_repo.get_by_user(user_id).await?)
    }

    pub async fn unassign_role(&self, user_id: Uuid, role_id: Uuid) -> Result<(), AppError> {
        self.get(user_id).await?;

        if !RoleRepository::new(self.db).unassign(user_id, role_id).await? {
            return Err(AppError::not_found(format!(
                "user {} does not have role {}",
                user_id, role_id
            )));
        }

        Ok(())
    }
}

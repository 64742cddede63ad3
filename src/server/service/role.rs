use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::role::RoleRepository,
    error::AppError,
    model::role::{CreateRoleParams, Role, UpdateRoleParams},
};

pub struct RoleService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoleService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_all(&self) -> Result<Vec<Role>, AppError> {
        Ok(RoleRepository::new(self.db).get_all().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Role, AppError> {
        RoleRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("role {} not found", id)))
    }

    /// Creates a role.
    ///
    /// # Returns
    /// - `Err(AppError::Validation)` - Blank name
    /// - `Err(AppError::Conflict)` - Name already in use
    pub async fn create(&self, mut params: CreateRoleParams) -> Result<Role, AppError> {
        let repo = RoleRepository::new(self.db);

        params.name = normalize_name(&params.name)?;
        if repo.find_by_name(&params.name).await?.is_some() {
            return Err(AppError::conflict(format!(
                "Role '{}' already exists",
                params.name
            )));
        }

        Ok(repo.create(params).await?)
    }

    pub async fn update(&self, id: Uuid, mut params: UpdateRoleParams) -> Result<Role, AppError> {
        let repo = RoleRepository::new(self.db);

        if let Some(name) = params.name.take() {
            let name = normalize_name(&name)?;
            if let Some(existing) = repo.find_by_name(&name).await? {
                if existing.id != id {
                    return Err(AppError::conflict(format!("Role '{}' already exists", name)));
                }
            }
            params.name = Some(name);
        }

        repo.update(id, params)
            .await?
            .ok_or_else(|| AppError::not_found(format!("role {} not found", id)))
    }

    /// Deletes a role together with its assignments and policies.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !RoleRepository::new(self.db).delete(id).await? {
            return Err(AppError::not_found(format!("role {} not found", id)));
        }

        tracing::info!("Deleted role {}", id);

        Ok(())
    }
}

fn normalize_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Role name is required"));
    }

    Ok(name.to_string())
}

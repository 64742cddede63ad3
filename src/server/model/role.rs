//! Role domain models and parameters.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::model::role::RoleDto;

/// Name of the role seeded at startup with unrestricted access.
pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    pub fn from_entity(entity: entity::role::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            description: entity.description,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> RoleDto {
        RoleDto {
            id: self.id,
            name: self.name,
            description: self.description,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateRoleParams {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateRoleParams {
    pub name: Option<String>,
    pub description: Option<String>,
}

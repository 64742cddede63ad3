//! Organization domain models and parameters.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use uuid::Uuid;

use crate::{
    model::organization::{CreateOrganizationDto, OrganizationDto, UpdateOrganizationDto},
    server::{
        error::AppError,
        model::hierarchy::{HierarchyModel, HierarchyNode},
    },
};

/// Organization lifecycle status. Any status may move to any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrganizationStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl OrganizationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Suspended => "suspended",
        }
    }
}

impl fmt::Display for OrganizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrganizationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "suspended" => Ok(Self::Suspended),
            other => Err(AppError::validation(format!(
                "Invalid organization status '{}', expected active, inactive or suspended",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Organization {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub status: OrganizationStatus,
    pub record_ordering: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HierarchyModel for Organization {
    type Entity = entity::organization::Entity;
    type Dto = OrganizationDto;

    /// Converts an entity model at the repository boundary.
    ///
    /// # Returns
    /// - `Err(DbErr::Custom)` - Stored status is not a known organization status
    fn from_entity(entity: entity::organization::Model) -> Result<Self, DbErr> {
        let status = entity
            .status
            .parse::<OrganizationStatus>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse organization status: {}", e)))?;

        Ok(Self {
            id: entity.id,
            parent_id: entity.parent_id,
            name: entity.name,
            slug: entity.slug,
            description: entity.description,
            email: entity.email,
            phone: entity.phone,
            website: entity.website,
            status,
            record_ordering: entity.record_ordering,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    fn node(&self) -> HierarchyNode {
        HierarchyNode {
            id: self.id,
            parent_id: self.parent_id,
            record_ordering: self.record_ordering,
            created_at: self.created_at,
        }
    }

    fn into_dto(self) -> OrganizationDto {
        OrganizationDto {
            id: self.id,
            parent_id: self.parent_id,
            name: self.name,
            slug: self.slug,
            description: self.description,
            email: self.email,
            phone: self.phone,
            website: self.website,
            status: self.status.to_string(),
            record_ordering: self.record_ordering,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateOrganizationParams {
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub status: OrganizationStatus,
    pub record_ordering: i32,
}

impl CreateOrganizationParams {
    /// Validates the request body.
    ///
    /// # Returns
    /// - `Err(AppError::Validation)` - Blank name or slug, or unknown status
    pub fn from_dto(dto: CreateOrganizationDto) -> Result<Self, AppError> {
        let name = dto.name.trim().to_string();
        let slug = dto.slug.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("Organization name is required"));
        }
        if slug.is_empty() {
            return Err(AppError::validation("Organization slug is required"));
        }
        let status = match dto.status {
            Some(status) => status.parse()?,
            None => OrganizationStatus::default(),
        };

        Ok(Self {
            parent_id: dto.parent_id,
            name,
            slug,
            description: dto.description,
            email: dto.email,
            phone: dto.phone,
            website: dto.website,
            status,
            record_ordering: dto.record_ordering.unwrap_or(0),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateOrganizationParams {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub record_ordering: Option<i32>,
}

impl UpdateOrganizationParams {
    pub fn from_dto(dto: UpdateOrganizationDto) -> Result<Self, AppError> {
        let name = dto.name.map(|n| n.trim().to_string());
        let slug = dto.slug.map(|s| s.trim().to_string());
        if name.as_deref() == Some("") {
            return Err(AppError::validation("Organization name cannot be blank"));
        }
        if slug.as_deref() == Some("") {
            return Err(AppError::validation("Organization slug cannot be blank"));
        }

        Ok(Self {
            name,
            slug,
            description: dto.description,
            email: dto.email,
            phone: dto.phone,
            website: dto.website,
            record_ordering: dto.record_ordering,
        })
    }
}

/// List filter for `GET /organizations`.
#[derive(Debug, Clone, Default)]
pub struct OrganizationFilter {
    pub status: Option<OrganizationStatus>,
}

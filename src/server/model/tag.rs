//! Tag domain models and parameters.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    model::tag::{CreateTagDto, TagDto, UpdateTagDto},
    server::{error::AppError, util::slug::slugify},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Tag {
    pub fn from_entity(entity: entity::tag::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> TagDto {
        TagDto {
            id: self.id,
            name: self.name,
            slug: self.slug,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateTagParams {
    pub name: String,
    pub slug: String,
}

impl CreateTagParams {
    pub fn from_dto(dto: CreateTagDto) -> Result<Self, AppError> {
        let name = dto.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("Tag name is required"));
        }
        let slug = slugify(dto.slug.as_deref().unwrap_or(&name));
        if slug.is_empty() {
            return Err(AppError::validation("Tag slug cannot be derived from the name"));
        }

        Ok(Self { name, slug })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTagParams {
    pub name: Option<String>,
    pub slug: Option<String>,
}

impl UpdateTagParams {
    pub fn from_dto(dto: UpdateTagDto) -> Result<Self, AppError> {
        let name = dto.name.map(|n| n.trim().to_string());
        if name.as_deref() == Some("") {
            return Err(AppError::validation("Tag name cannot be blank"));
        }
        let slug = dto.slug.map(|s| slugify(&s));
        if slug.as_deref() == Some("") {
            return Err(AppError::validation("Tag slug cannot be blank"));
        }

        Ok(Self { name, slug })
    }
}

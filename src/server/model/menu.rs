//! Menu domain models and parameters.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use uuid::Uuid;

use crate::{
    model::menu::{CreateMenuDto, MenuDto, UpdateMenuDto},
    server::{
        error::AppError,
        model::hierarchy::{HierarchyModel, HierarchyNode},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub target: Option<String>,
    pub is_active: bool,
    pub is_visible: bool,
    pub record_ordering: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HierarchyModel for Menu {
    type Entity = entity::menu::Entity;
    type Dto = MenuDto;

    fn from_entity(entity: entity::menu::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            parent_id: entity.parent_id,
            name: entity.name,
            url: entity.url,
            icon: entity.icon,
            target: entity.target,
            is_active: entity.is_active,
            is_visible: entity.is_visible,
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

    fn into_dto(self) -> MenuDto {
        MenuDto {
            id: self.id,
            parent_id: self.parent_id,
            name: self.name,
            url: self.url,
            icon: self.icon,
            target: self.target,
            is_active: self.is_active,
            is_visible: self.is_visible,
            record_ordering: self.record_ordering,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateMenuParams {
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub target: Option<String>,
    pub is_active: bool,
    pub is_visible: bool,
    pub record_ordering: i32,
}

impl CreateMenuParams {
    pub fn from_dto(dto: CreateMenuDto) -> Result<Self, AppError> {
        let name = dto.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("Menu name is required"));
        }

        Ok(Self {
            parent_id: dto.parent_id,
            name,
            url: dto.url,
            icon: dto.icon,
            target: dto.target,
            is_active: dto.is_active.unwrap_or(true),
            is_visible: dto.is_visible.unwrap_or(true),
            record_ordering: dto.record_ordering.unwrap_or(0),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateMenuParams {
    pub name: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub target: Option<String>,
    pub record_ordering: Option<i32>,
}

impl UpdateMenuParams {
    pub fn from_dto(dto: UpdateMenuDto) -> Result<Self, AppError> {
        let name = dto.name.map(|n| n.trim().to_string());
        if name.as_deref() == Some("") {
            return Err(AppError::validation("Menu name cannot be blank"));
        }

        Ok(Self {
            name,
            url: dto.url,
            icon: dto.icon,
            target: dto.target,
            record_ordering: dto.record_ordering,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct MenuFilter {
    pub is_active: Option<bool>,
}

//! Taxonomy domain models and parameters.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use uuid::Uuid;

use crate::{
    model::taxonomy::{CreateTaxonomyDto, TaxonomyDto, UpdateTaxonomyDto},
    server::{
        error::AppError,
        model::hierarchy::{HierarchyModel, HierarchyNode},
        util::slug::slugify,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Taxonomy {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    /// Vocabulary the term belongs to, e.g. `category`.
    pub kind: String,
    pub description: Option<String>,
    pub record_ordering: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HierarchyModel for Taxonomy {
    type Entity = entity::taxonomy::Entity;
    type Dto = TaxonomyDto;

    fn from_entity(entity: entity::taxonomy::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            parent_id: entity.parent_id,
            name: entity.name,
            slug: entity.slug,
            kind: entity.kind,
            description: entity.description,
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

    fn into_dto(self) -> TaxonomyDto {
        TaxonomyDto {
            id: self.id,
            parent_id: self.parent_id,
            name: self.name,
            slug: self.slug,
            kind: self.kind,
            description: self.description,
            record_ordering: self.record_ordering,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn accepts_child(&self, child: &Self) -> Result<(), AppError> {
        self.accepts_kind(&child.kind)
    }
}

impl Taxonomy {
    /// Terms only nest within their own kind.
    pub fn accepts_kind(&self, kind: &str) -> Result<(), AppError> {
        if self.kind != kind {
            return Err(AppError::validation(format!(
                "Parent taxonomy is a '{}', cannot hold a '{}'",
                self.kind, kind
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CreateTaxonomyParams {
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub slug: String,
    pub kind: String,
    pub description: Option<String>,
    pub record_ordering: i32,
}

impl CreateTaxonomyParams {
    /// Validates the request body, deriving the slug from the name when absent.
    pub fn from_dto(dto: CreateTaxonomyDto) -> Result<Self, AppError> {
        let name = dto.name.trim().to_string();
        let kind = dto.kind.trim().to_lowercase();
        if name.is_empty() {
            return Err(AppError::validation("Taxonomy name is required"));
        }
        if kind.is_empty() {
            return Err(AppError::validation("Taxonomy kind is required"));
        }
        let slug = match dto.slug {
            Some(slug) if !slug.trim().is_empty() => slugify(&slug),
            _ => slugify(&name),
        };
        if slug.is_empty() {
            return Err(AppError::validation("Taxonomy slug cannot be derived from the name"));
        }

        Ok(Self {
            parent_id: dto.parent_id,
            name,
            slug,
            kind,
            description: dto.description,
            record_ordering: dto.record_ordering.unwrap_or(0),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTaxonomyParams {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub record_ordering: Option<i32>,
}

impl UpdateTaxonomyParams {
    pub fn from_dto(dto: UpdateTaxonomyDto) -> Result<Self, AppError> {
        let name = dto.name.map(|n| n.trim().to_string());
        if name.as_deref() == Some("") {
            return Err(AppError::validation("Taxonomy name cannot be blank"));
        }
        let slug = dto.slug.map(|s| slugify(&s));
        if slug.as_deref() == Some("") {
            return Err(AppError::validation("Taxonomy slug cannot be blank"));
        }

        Ok(Self {
            name,
            slug,
            description: dto.description,
            record_ordering: dto.record_ordering,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaxonomyFilter {
    pub kind: Option<String>,
}

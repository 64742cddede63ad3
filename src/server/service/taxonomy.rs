use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::taxonomy::TaxonomyRepository,
    error::AppError,
    model::{
        pagination::{Paginated, Pagination},
        taxonomy::{CreateTaxonomyParams, Taxonomy, TaxonomyFilter, UpdateTaxonomyParams},
    },
    service::hierarchy::HierarchyService,
};

pub struct TaxonomyService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TaxonomyService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn hierarchy(&self) -> HierarchyService<'a, Taxonomy> {
        HierarchyService::new(self.db)
    }

    /// Creates a term. Slugs are unique within a kind.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Parent missing or soft-deleted
    /// - `Err(AppError::Validation)` - Parent belongs to a different kind
    /// - `Err(AppError::Conflict)` - Slug already used in this kind
    pub async fn create(&self, params: CreateTaxonomyParams) -> Result<Taxonomy, AppError> {
        let repo = TaxonomyRepository::new(self.db);

        if let Some(parent_id) = params.parent_id {
            self.hierarchy().ensure_parent(Some(parent_id)).await?;
            self.hierarchy()
                .get(parent_id)
                .await?
                .accepts_kind(&params.kind)?;
        }
        if repo.slug_taken(&params.kind, &params.slug, None).await? {
            return Err(AppError::conflict(format!(
                "Taxonomy slug '{}' is already in use for kind '{}'",
                params.slug, params.kind
            )));
        }

        Ok(repo.create(params).await?)
    }

    pub async fn create_child(
        &self,
        parent_id: Uuid,
        mut params: CreateTaxonomyParams,
    ) -> Result<Taxonomy, AppError> {
        params.parent_id = Some(parent_id);

        self.create(params).await
    }

    pub async fn get_paginated(
        &self,
        filter: TaxonomyFilter,
        pagination: Pagination,
    ) -> Result<Paginated<Taxonomy>, AppError> {
        let repo = TaxonomyRepository::new(self.db);

        Ok(repo.get_paginated(filter, pagination).await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        params: UpdateTaxonomyParams,
    ) -> Result<Taxonomy, AppError> {
        let repo = TaxonomyRepository::new(self.db);
        let existing = self.hierarchy().get(id).await?;

        if let Some(slug) = &params.slug {
            if repo.slug_taken(&existing.kind, slug, Some(id)).await? {
                return Err(AppError::conflict(format!(
                    "Taxonomy slug '{}' is already in use for kind '{}'",
                    slug, existing.kind
                )));
            }
        }

        repo.update(id, params)
            .await?
            .ok_or_else(|| AppError::not_found(format!("taxonomy {} not found", id)))
    }
}

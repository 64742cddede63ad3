use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::organization::OrganizationRepository,
    error::AppError,
    model::{
        organization::{
            CreateOrganizationParams, Organization, OrganizationFilter, OrganizationStatus,
            UpdateOrganizationParams,
        },
        pagination::{Paginated, Pagination},
    },
    service::hierarchy::HierarchyService,
};

pub struct OrganizationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OrganizationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Tree operations for organizations.
    pub fn hierarchy(&self) -> HierarchyService<'a, Organization> {
        HierarchyService::new(self.db)
    }

    /// Creates an organization after checking its parent and slug.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Parent missing or soft-deleted
    /// - `Err(AppError::Conflict)` - Slug already used by a live organization
    pub async fn create(&self, params: CreateOrganizationParams) -> Result<Organization, AppError> {
        let repo = OrganizationRepository::new(self.db);

        self.hierarchy().ensure_parent(params.parent_id).await?;
        if repo.slug_taken(&params.slug, None).await? {
            return Err(AppError::conflict(format!(
                "Organization slug '{}' is already in use",
                params.slug
            )));
        }

        let organization = repo.create(params).await?;

        tracing::info!("Created organization {}", organization.id);

        Ok(organization)
    }

    /// Creates an organization under `parent_id`, ignoring any parent in `params`.
    pub async fn create_child(
        &self,
        parent_id: Uuid,
        mut params: CreateOrganizationParams,
    ) -> Result<Organization, AppError> {
        params.parent_id = Some(parent_id);

        self.create(params).await
    }

    pub async fn get_paginated(
        &self,
        filter: OrganizationFilter,
        pagination: Pagination,
    ) -> Result<Paginated<Organization>, AppError> {
        let repo = OrganizationRepository::new(self.db);

        Ok(repo.get_paginated(filter, pagination).await?)
    }

    pub async fn update(
        &self,
        id: Uuid,
        params: UpdateOrganizationParams,
    ) -> Result<Organization, AppError> {
        let repo = OrganizationRepository::new(self.db);

        if let Some(slug) = &params.slug {
            if repo.slug_taken(slug, Some(id)).await? {
                return Err(AppError::conflict(format!(
                    "Organization slug '{}' is already in use",
                    slug
                )));
            }
        }

        repo.update(id, params)
            .await?
            .ok_or_else(|| AppError::not_found(format!("organization {} not found", id)))
    }

    /// Sets the status. Setting the current status again succeeds unchanged.
    pub async fn set_status(
        &self,
        id: Uuid,
        status: OrganizationStatus,
    ) -> Result<Organization, AppError> {
        let repo = OrganizationRepository::new(self.db);

        repo.set_status(id, status)
            .await?
            .ok_or_else(|| AppError::not_found(format!("organization {} not found", id)))
    }
}

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QuerySelect,
};
use uuid::Uuid;

use crate::server::{
    data::hierarchy::{live, ordered},
    model::{
        hierarchy::HierarchyModel,
        organization::{
            CreateOrganizationParams, Organization, OrganizationFilter, OrganizationStatus,
            UpdateOrganizationParams,
        },
        pagination::{Paginated, Pagination},
    },
};

pub struct OrganizationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> OrganizationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateOrganizationParams) -> Result<Organization, DbErr> {
        let now = Utc::now();
        let organization = entity::organization::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            parent_id: ActiveValue::Set(params.parent_id),
            name: ActiveValue::Set(params.name),
            slug: ActiveValue::Set(params.slug),
            description: ActiveValue::Set(params.description),
            email: ActiveValue::Set(params.email),
            phone: ActiveValue::Set(params.phone),
            website: ActiveValue::Set(params.website),
            status: ActiveValue::Set(params.status.to_string()),
            record_ordering: ActiveValue::Set(params.record_ordering),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await?;

        Organization::from_entity(organization)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Organization>, DbErr> {
        live::<entity::organization::Entity>()
            .filter(entity::organization::Column::Id.eq(id))
            .one(self.db)
            .await?
            .map(Organization::from_entity)
            .transpose()
    }

    /// Paginated live organizations in sibling order, optionally filtered by status.
    pub async fn get_paginated(
        &self,
        filter: OrganizationFilter,
        pagination: Pagination,
    ) -> Result<Paginated<Organization>, DbErr> {
        let mut select = live::<entity::organization::Entity>();
        if let Some(status) = filter.status {
            select = select.filter(entity::organization::Column::Status.eq(status.to_string()));
        }

        let total = select.clone().count(self.db).await?;
        let items = ordered(select)
            .limit(pagination.limit)
            .offset(pagination.offset)
            .all(self.db)
            .await?
            .into_iter()
            .map(Organization::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated {
            items,
            total,
            pagination,
        })
    }

    /// Whether a live organization other than `exclude` already uses `slug`.
    pub async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, DbErr> {
        let mut select = live::<entity::organization::Entity>()
            .filter(entity::organization::Column::Slug.eq(slug));
        if let Some(id) = exclude {
            select = select.filter(entity::organization::Column::Id.ne(id));
        }

        Ok(select.count(self.db).await? > 0)
    }

    /// Applies the provided fields. Returns `None` when the organization is missing.
    pub async fn update(
        &self,
        id: Uuid,
        params: UpdateOrganizationParams,
    ) -> Result<Option<Organization>, DbErr> {
        let Some(existing) = live::<entity::organization::Entity>()
            .filter(entity::organization::Column::Id.eq(id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::organization::ActiveModel = existing.into();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(slug) = params.slug {
            active.slug = ActiveValue::Set(slug);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(Some(description));
        }
        if let Some(email) = params.email {
            active.email = ActiveValue::Set(Some(email));
        }
        if let Some(phone) = params.phone {
            active.phone = ActiveValue::Set(Some(phone));
        }
        if let Some(website) = params.website {
            active.website = ActiveValue::Set(Some(website));
        }
        if let Some(record_ordering) = params.record_ordering {
            active.record_ordering = ActiveValue::Set(record_ordering);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Organization::from_entity(active.update(self.db).await?).map(Some)
    }

    /// Sets the status of one organization. Children are untouched.
    pub async fn set_status(
        &self,
        id: Uuid,
        status: OrganizationStatus,
    ) -> Result<Option<Organization>, DbErr> {
        let Some(existing) = live::<entity::organization::Entity>()
            .filter(entity::organization::Column::Id.eq(id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::organization::ActiveModel = existing.into();
        active.status = ActiveValue::Set(status.to_string());
        active.updated_at = ActiveValue::Set(Utc::now());

        Organization::from_entity(active.update(self.db).await?).map(Some)
    }
}

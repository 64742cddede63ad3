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
        pagination::{Paginated, Pagination},
        taxonomy::{CreateTaxonomyParams, Taxonomy, TaxonomyFilter, UpdateTaxonomyParams},
    },
};

pub struct TaxonomyRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TaxonomyRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateTaxonomyParams) -> Result<Taxonomy, DbErr> {
        let now = Utc::now();
        let taxonomy = entity::taxonomy::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            parent_id: ActiveValue::Set(params.parent_id),
            name: ActiveValue::Set(params.name),
            slug: ActiveValue::Set(params.slug),
            kind: ActiveValue::Set(params.kind),
            description: ActiveValue::Set(params.description),
            record_ordering: ActiveValue::Set(params.record_ordering),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await?;

        Taxonomy::from_entity(taxonomy)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Taxonomy>, DbErr> {
        live::<entity::taxonomy::Entity>()
            .filter(entity::taxonomy::Column::Id.eq(id))
            .one(self.db)
            .await?
            .map(Taxonomy::from_entity)
            .transpose()
    }

    pub async fn get_paginated(
        &self,
        filter: TaxonomyFilter,
        pagination: Pagination,
    ) -> Result<Paginated<Taxonomy>, DbErr> {
        let mut select = live::<entity::taxonomy::Entity>();
        if let Some(kind) = filter.kind {
            select = select.filter(entity::taxonomy::Column::Kind.eq(kind));
        }

        let total = select.clone().count(self.db).await?;
        let items = ordered(select)
            .limit(pagination.limit)
            .offset(pagination.offset)
            .all(self.db)
            .await?
            .into_iter()
            .map(Taxonomy::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated {
            items,
            total,
            pagination,
        })
    }

    /// Whether a live term of `kind` other than `exclude` already uses `slug`.
    pub async fn slug_taken(
        &self,
        kind: &str,
        slug: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, DbErr> {
        let mut select = live::<entity::taxonomy::Entity>()
            .filter(entity::taxonomy::Column::Kind.eq(kind))
            .filter(entity::taxonomy::Column::Slug.eq(slug));
        if let Some(id) = exclude {
            select = select.filter(entity::taxonomy::Column::Id.ne(id));
        }

        Ok(select.count(self.db).await? > 0)
    }

    pub async fn update(
        &self,
        id: Uuid,
        params: UpdateTaxonomyParams,
    ) -> Result<Option<Taxonomy>, DbErr> {
        let Some(existing) = live::<entity::taxonomy::Entity>()
            .filter(entity::taxonomy::Column::Id.eq(id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::taxonomy::ActiveModel = existing.into();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(slug) = params.slug {
            active.slug = ActiveValue::Set(slug);
        }
        if let Some(description) = params.description {
            active.description = ActiveValue::Set(Some(description));
        }
        if let Some(record_ordering) = params.record_ordering {
            active.record_ordering = ActiveValue::Set(record_ordering);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Taxonomy::from_entity(active.update(self.db).await?).map(Some)
    }
}

//! Tag repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use uuid::Uuid;

use crate::server::model::{
    pagination::{Paginated, Pagination},
    tag::{CreateTagParams, Tag, UpdateTagParams},
};

pub struct TagRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TagRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateTagParams) -> Result<Tag, DbErr> {
        let now = Utc::now();
        let entity = entity::tag::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            name: ActiveValue::Set(params.name),
            slug: ActiveValue::Set(params.slug),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Ok(Tag::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Tag>, DbErr> {
        Ok(entity::prelude::Tag::find_by_id(id)
            .one(self.db)
            .await?
            .map(Tag::from_entity))
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Tag>, DbErr> {
        Ok(entity::prelude::Tag::find()
            .filter(entity::tag::Column::Slug.eq(slug))
            .one(self.db)
            .await?
            .map(Tag::from_entity))
    }

    /// Tags with the given IDs, ordered by name. Unknown IDs are skipped.
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Tag>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        Ok(entity::prelude::Tag::find()
            .filter(entity::tag::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(entity::tag::Column::Name)
            .all(self.db)
            .await?
            .into_iter()
            .map(Tag::from_entity)
            .collect())
    }

    pub async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, DbErr> {
        let mut select = entity::prelude::Tag::find().filter(entity::tag::Column::Slug.eq(slug));
        if let Some(id) = exclude {
            select = select.filter(entity::tag::Column::Id.ne(id));
        }

        Ok(select.count(self.db).await? > 0)
    }

    pub async fn get_paginated(&self, pagination: Pagination) -> Result<Paginated<Tag>, DbErr> {
        let select = entity::prelude::Tag::find();

        let total = select.clone().count(self.db).await?;
        let items = select
            .order_by_asc(entity::tag::Column::Name)
            .order_by_asc(entity::tag::Column::Id)
            .limit(pagination.limit)
            .offset(pagination.offset)
            .all(self.db)
            .await?
            .into_iter()
            .map(Tag::from_entity)
            .collect();

        Ok(Paginated {
            items,
            total,
            pagination,
        })
    }

    pub async fn update(&self, id: Uuid, params: UpdateTagParams) -> Result<Option<Tag>, DbErr> {
        let Some(existing) = entity::prelude::Tag::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::tag::ActiveModel = existing.into();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(slug) = params.slug {
            active.slug = ActiveValue::Set(slug);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Tag::from_entity(active.update(self.db).await?)))
    }

    /// Deletes a tag and detaches it from every post.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let txn = self.db.begin().await?;

        entity::prelude::PostTag::delete_many()
            .filter(entity::post_tag::Column::TagId.eq(id))
            .exec(&txn)
            .await?;
        let result = entity::prelude::Tag::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }
}

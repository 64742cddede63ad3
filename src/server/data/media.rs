//! Media metadata repository. File bytes live in the storage backend.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::server::model::{
    media::{CreateMediaParams, Media},
    pagination::{Paginated, Pagination},
};

pub struct MediaRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MediaRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateMediaParams) -> Result<Media, DbErr> {
        let entity = entity::media::ActiveModel {
            id: ActiveValue::Set(params.id),
            uploaded_by: ActiveValue::Set(params.uploaded_by),
            file_name: ActiveValue::Set(params.file_name),
            storage_key: ActiveValue::Set(params.storage_key),
            content_type: ActiveValue::Set(params.content_type),
            size_bytes: ActiveValue::Set(params.size_bytes),
            alt_text: ActiveValue::Set(params.alt_text),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(Media::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Media>, DbErr> {
        Ok(entity::prelude::Media::find_by_id(id)
            .one(self.db)
            .await?
            .map(Media::from_entity))
    }

    /// Newest uploads first, optionally restricted to one uploader.
    pub async fn get_paginated(
        &self,
        uploaded_by: Option<Uuid>,
        pagination: Pagination,
    ) -> Result<Paginated<Media>, DbErr> {
        let mut select = entity::prelude::Media::find();
        if let Some(user_id) = uploaded_by {
            select = select.filter(entity::media::Column::UploadedBy.eq(user_id));
        }

        let total = select.clone().count(self.db).await?;
        let items = select
            .order_by_desc(entity::media::Column::CreatedAt)
            .order_by_asc(entity::media::Column::Id)
            .limit(pagination.limit)
            .offset(pagination.offset)
            .all(self.db)
            .await?
            .into_iter()
            .map(Media::from_entity)
            .collect();

        Ok(Paginated {
            items,
            total,
            pagination,
        })
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::Media::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }
}

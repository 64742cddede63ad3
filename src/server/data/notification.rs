//! Notification repository.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::server::model::{
    notification::{CreateNotificationParams, Notification},
    pagination::{Paginated, Pagination},
};

pub struct NotificationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateNotificationParams) -> Result<Notification, DbErr> {
        let entity = entity::notification::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_id: ActiveValue::Set(params.user_id),
            kind: ActiveValue::Set(params.kind),
            title: ActiveValue::Set(params.title),
            body: ActiveValue::Set(params.body),
            read_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await?;

        Ok(Notification::from_entity(entity))
    }

    /// Notifications for a user, newest first.
    ///
    /// # Arguments
    /// - `unread_only` - Skip notifications that were already read
    pub async fn get_by_user_paginated(
        &self,
        user_id: Uuid,
        unread_only: bool,
        pagination: Pagination,
    ) -> Result<Paginated<Notification>, DbErr> {
        let mut select = entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id));
        if unread_only {
            select = select.filter(entity::notification::Column::ReadAt.is_null());
        }

        let total = select.clone().count(self.db).await?;
        let items = select
            .order_by_desc(entity::notification::Column::CreatedAt)
            .order_by_asc(entity::notification::Column::Id)
            .limit(pagination.limit)
            .offset(pagination.offset)
            .all(self.db)
            .await?
            .into_iter()
            .map(Notification::from_entity)
            .collect();

        Ok(Paginated {
            items,
            total,
            pagination,
        })
    }

    pub async fn unread_count(&self, user_id: Uuid) -> Result<u64, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::ReadAt.is_null())
            .count(self.db)
            .await
    }

    /// Marks one of the user's notifications read. Already-read rows keep their timestamp.
    ///
    /// # Returns
    /// - `Ok(Some(Notification))` - The notification, now read
    /// - `Ok(None)` - No such notification for this user
    pub async fn mark_read(&self, user_id: Uuid, id: Uuid) -> Result<Option<Notification>, DbErr> {
        let Some(existing) = entity::prelude::Notification::find_by_id(id)
            .filter(entity::notification::Column::UserId.eq(user_id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };
        if existing.read_at.is_some() {
            return Ok(Some(Notification::from_entity(existing)));
        }

        let mut active: entity::notification::ActiveModel = existing.into();
        active.read_at = ActiveValue::Set(Some(Utc::now()));

        Ok(Some(Notification::from_entity(active.update(self.db).await?)))
    }

    /// Marks every unread notification of the user read and returns how many changed.
    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::update_many()
            .col_expr(entity::notification::Column::ReadAt, Expr::value(Some(Utc::now())))
            .filter(entity::notification::Column::UserId.eq(user_id))
            .filter(entity::notification::Column::ReadAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, DbErr> {
        let result = entity::prelude::Notification::delete_many()
            .filter(entity::notification::Column::Id.eq(id))
            .filter(entity::notification::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes read notifications created before `cutoff`.
    pub async fn purge_read_before(&self, cutoff: DateTime<Utc>) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::delete_many()
            .filter(entity::notification::Column::ReadAt.is_not_null())
            .filter(entity::notification::Column::CreatedAt.lt(cutoff))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::{notification::NotificationRepository, user::UserRepository},
    error::AppError,
    model::{
        notification::{CreateNotificationParams, Notification},
        pagination::{Paginated, Pagination},
    },
};

/// Read notifications older than this are removed by the purge job.
pub const READ_RETENTION_DAYS: i64 = 30;

pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a notification for `params.user_id`.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Recipient missing or deleted
    pub async fn create(&self, params: CreateNotificationParams) -> Result<Notification, AppError> {
        if UserRepository::new(self.db)
            .find_by_id(params.user_id)
            .await?
            .is_none()
        {
            return Err(AppError::not_found(format!(
                "user {} not found",
                params.user_id
            )));
        }

        Ok(NotificationRepository::new(self.db).create(params).await?)
    }

    pub async fn get_for_user(
        &self,
        user_id: Uuid,
        unread_only: bool,
        pagination: Pagination,
    ) -> Result<Paginated<Notification>, AppError> {
        Ok(NotificationRepository::new(self.db)
            .get_by_user_paginated(user_id, unread_only, pagination)
            .await?)
    }

    pub async fn unread_count(&self, user_id: Uuid) -> Result<u64, AppError> {
        Ok(NotificationRepository::new(self.db)
            .unread_count(user_id)
            .await?)
    }

    /// Marks one of the user's notifications read. Other users' notifications are not found.
    pub async fn mark_read(&self, user_id: Uuid, id: Uuid) -> Result<Notification, AppError> {
        NotificationRepository::new(self.db)
            .mark_read(user_id, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("notification {} not found", id)))
    }

    /// Returns how many notifications changed.
    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, AppError> {
        Ok(NotificationRepository::new(self.db)
            .mark_all_read(user_id)
            .await?)
    }

    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
        if !NotificationRepository::new(self.db).delete(user_id, id).await? {
            return Err(AppError::not_found(format!("notification {} not found", id)));
        }

        Ok(())
    }

    /// Deletes read notifications older than `READ_RETENTION_DAYS`.
    pub async fn purge_read(&self) -> Result<u64, AppError> {
        let cutoff = Utc::now() - Duration::days(READ_RETENTION_DAYS);
        let removed = NotificationRepository::new(self.db)
            .purge_read_before(cutoff)
            .await?;

        tracing::info!("Purged {} read notifications", removed);

        Ok(removed)
    }
}

//! In-app notification domain models.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    model::notification::{CreateNotificationDto, NotificationDto},
    server::error::AppError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub title: String,
    pub body: String,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn from_entity(entity: entity::notification::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            kind: entity.kind,
            title: entity.title,
            body: entity.body,
            read_at: entity.read_at,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> NotificationDto {
        NotificationDto {
            id: self.id,
            user_id: self.user_id,
            kind: self.kind,
            title: self.title,
            body: self.body,
            read_at: self.read_at,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateNotificationParams {
    pub user_id: Uuid,
    pub kind: String,
    pub title: String,
    pub body: String,
}

impl CreateNotificationParams {
    pub fn from_dto(dto: CreateNotificationDto) -> Result<Self, AppError> {
        if dto.title.trim().is_empty() {
            return Err(AppError::validation("Notification title is required"));
        }
        if dto.kind.trim().is_empty() {
            return Err(AppError::validation("Notification kind is required"));
        }

        Ok(Self {
            user_id: dto.user_id,
            kind: dto.kind.trim().to_string(),
            title: dto.title.trim().to_string(),
            body: dto.body,
        })
    }
}

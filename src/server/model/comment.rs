//! Comment domain models and parameters.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use uuid::Uuid;

use crate::{model::comment::CommentDto, server::error::AppError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl CommentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for CommentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(AppError::validation(format!(
                "Invalid comment status '{}', expected pending, approved or rejected",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub content: String,
    pub status: CommentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn from_entity(entity: entity::comment::Model) -> Result<Self, DbErr> {
        let status = entity
            .status
            .parse::<CommentStatus>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse comment status: {}", e)))?;

        Ok(Self {
            id: entity.id,
            post_id: entity.post_id,
            author_id: entity.author_id,
            parent_id: entity.parent_id,
            content: entity.content,
            status,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> CommentDto {
        CommentDto {
            id: self.id,
            post_id: self.post_id,
            author_id: self.author_id,
            parent_id: self.parent_id,
            content: self.content,
            status: self.status.to_string(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateCommentParams {
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub content: String,
}

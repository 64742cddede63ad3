//! Post domain models and parameters.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use uuid::Uuid;

use crate::{
    model::post::{CreatePostDto, PostDto, UpdatePostDto},
    server::{error::AppError, model::tag::Tag, util::slug::slugify},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Archived,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "archived" => Ok(Self::Archived),
            other => Err(AppError::validation(format!(
                "Invalid post status '{}', expected draft, published or archived",
                other
            ))),
        }
    }
}

/// Post together with its tags.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub status: PostStatus,
    pub published_at: Option<DateTime<Utc>>,
    pub tags: Vec<Tag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Converts the entity and its tag rows at the repository boundary.
    pub fn from_entity(entity: entity::post::Model, tags: Vec<Tag>) -> Result<Self, DbErr> {
        let status = entity
            .status
            .parse::<PostStatus>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse post status: {}", e)))?;

        Ok(Self {
            id: entity.id,
            author_id: entity.author_id,
            title: entity.title,
            slug: entity.slug,
            content: entity.content,
            excerpt: entity.excerpt,
            status,
            published_at: entity.published_at,
            tags,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> PostDto {
        PostDto {
            id: self.id,
            author_id: self.author_id,
            title: self.title,
            slug: self.slug,
            content: self.content,
            excerpt: self.excerpt,
            status: self.status.to_string(),
            published_at: self.published_at,
            tags: self.tags.into_iter().map(Tag::into_dto).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreatePostParams {
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub tag_ids: Vec<Uuid>,
}

impl CreatePostParams {
    /// Validates the request body. The slug is derived from the title when absent.
    pub fn from_dto(author_id: Uuid, dto: CreatePostDto) -> Result<Self, AppError> {
        let title = dto.title.trim().to_string();
        if title.is_empty() {
            return Err(AppError::validation("Post title is required"));
        }
        if dto.content.trim().is_empty() {
            return Err(AppError::validation("Post content is required"));
        }
        let slug = slugify(dto.slug.as_deref().unwrap_or(&title));
        if slug.is_empty() {
            return Err(AppError::validation("Post slug cannot be derived from the title"));
        }

        Ok(Self {
            author_id,
            title,
            slug,
            content: dto.content,
            excerpt: dto.excerpt,
            tag_ids: dto.tag_ids,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct UpdatePostParams {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub status: Option<PostStatus>,
    pub tag_ids: Option<Vec<Uuid>>,
}

impl UpdatePostParams {
    pub fn from_dto(dto: UpdatePostDto) -> Result<Self, AppError> {
        let title = dto.title.map(|t| t.trim().to_string());
        if title.as_deref() == Some("") {
            return Err(AppError::validation("Post title cannot be blank"));
        }
        let slug = dto.slug.map(|s| slugify(&s));
        if slug.as_deref() == Some("") {
            return Err(AppError::validation("Post slug cannot be blank"));
        }
        let status = dto.status.map(|s| s.parse()).transpose()?;

        Ok(Self {
            title,
            slug,
            content: dto.content,
            excerpt: dto.excerpt,
            status,
            tag_ids: dto.tag_ids,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    pub status: Option<PostStatus>,
    pub author_id: Option<Uuid>,
    pub tag_id: Option<Uuid>,
}

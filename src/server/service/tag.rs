use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::tag::TagRepository,
    error::AppError,
    model::{
        pagination::{Paginated, Pagination},
        tag::{CreateTagParams, Tag, UpdateTagParams},
    },
};

pub struct TagService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> TagService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateTagParams) -> Result<Tag, AppError> {
        let repo = TagRepository::new(self.db);

        if repo.slug_taken(&params.slug, None).await? {
            return Err(AppError::conflict(format!(
                "Tag slug '{}' is already in use",
                params.slug
            )));
        }

        Ok(repo.create(params).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Tag, AppError> {
        TagRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("tag {} not found", id)))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Tag, AppError> {
        TagRepository::new(self.db)
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found(format!("tag '{}' not found", slug)))
    }

    pub async fn get_paginated(&self, pagination: Pagination) -> Result<Paginated<Tag>, AppError> {
        Ok(TagRepository::new(self.db).get_paginated(pagination).await?)
    }

    pub async fn update(&self, id: Uuid, params: UpdateTagParams) -> Result<Tag, AppError> {
        let repo = TagRepository::new(self.db);

        if let Some(slug) = &params.slug {
            if repo.slug_taken(slug, Some(id)).await? {
                return Err(AppError::conflict(format!(
                    "Tag slug '{}' is already in use",
                    slug
                )));
            }
        }

        repo.update(id, params)
            .await?
            .ok_or_else(|| AppError::not_found(format!("tag {} not found", id)))
    }

    /// Deletes the tag and detaches it from every post.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !TagRepository::new(self.db).delete(id).await? {
            return Err(AppError::not_found(format!("tag {} not found", id)));
        }

        Ok(())
    }
}

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::{post::PostRepository, tag::TagRepository},
    error::AppError,
    model::{
        pagination::{Paginated, Pagination},
        post::{CreatePostParams, Post, PostFilter, PostStatus, UpdatePostParams},
    },
};

pub struct PostService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PostService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a draft post authored by `params.author_id`.
    ///
    /// # Returns
    /// - `Err(AppError::Conflict)` - Slug used by another live post
    /// - `Err(AppError::NotFound)` - One of the tag IDs does not exist
    pub async fn create(&self, params: CreatePostParams) -> Result<Post, AppError> {
        let repo = PostRepository::new(self.db);

        self.ensure_slug_free(&params.slug, None).await?;
        self.ensure_tags_exist(&params.tag_ids).await?;

        let post = repo.create(params).await?;

        tracing::info!("Created post {} ({})", post.id, post.slug);

        Ok(post)
    }

    pub async fn get(&self, id: Uuid) -> Result<Post, AppError> {
        PostRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("post {} not found", id)))
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Post, AppError> {
        PostRepository::new(self.db)
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found(format!("post '{}' not found", slug)))
    }

    pub async fn get_paginated(
        &self,
        filter: PostFilter,
        pagination: Pagination,
    ) -> Result<Paginated<Post>, AppError> {
        Ok(PostRepository::new(self.db)
            .get_paginated(filter, pagination)
            .await?)
    }

    /// Applies changes and replaces tags when `tag_ids` is given.
    pub async fn update(&self, id: Uuid, params: UpdatePostParams) -> Result<Post, AppError> {
        if let Some(slug) = &params.slug {
            self.ensure_slug_free(slug, Some(id)).await?;
        }
        if let Some(tag_ids) = &params.tag_ids {
            self.ensure_tags_exist(tag_ids).await?;
        }

        PostRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::not_found(format!("post {} not found", id)))
    }

    /// Publishes a post. `published_at` is only stamped the first time.
    pub async fn publish(&self, id: Uuid) -> Result<Post, AppError> {
        self.set_status(id, PostStatus::Published).await
    }

    pub async fn unpublish(&self, id: Uuid) -> Result<Post, AppError> {
        self.set_status(id, PostStatus::Draft).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !PostRepository::new(self.db).soft_delete(id).await? {
            return Err(AppError::not_found(format!("post {} not found", id)));
        }

        Ok(())
    }

    async fn set_status(&self, id: Uuid, status: PostStatus) -> Result<Post, AppError> {
        self.update(
            id,
            UpdatePostParams {
                status: Some(status),
                ..Default::default()
            },
        )
        .await
    }

    async fn ensure_slug_free(&self, slug: &str, exclude: Option<Uuid>) -> Result<(), AppError> {
        if PostRepository::new(self.db).slug_taken(slug, exclude).await? {
            return Err(AppError::conflict(format!(
                "Post slug '{}' is already in use",
                slug
            )));
        }

        Ok(())
    }

    async fn ensure_tags_exist(&self, tag_ids: &[Uuid]) -> Result<(), AppError> {
        let found = TagRepository::new(self.db).find_by_ids(tag_ids).await?;

        if let Some(missing) = tag_ids
            .iter()
            .find(|id| !found.iter().any(|tag| tag.id == **id))
        {
            return Err(AppError::not_found(format!("tag {} not found", missing)));
        }

        Ok(())
    }
}

//! Comments on posts, with author-only editing and moderation statuses.

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::{comment::CommentRepository, post::PostRepository},
    error::{auth::AuthError, AppError},
    model::{
        comment::{Comment, CommentStatus, CreateCommentParams},
        pagination::{Paginated, Pagination},
    },
};

pub struct CommentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommentService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a pending comment.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Post or parent comment missing
    /// - `Err(AppError::Validation)` - Blank content, or parent belongs to another post
    pub async fn create(&self, params: CreateCommentParams) -> Result<Comment, AppError> {
        if params.content.trim().is_empty() {
            return Err(AppError::validation("Comment content is required"));
        }

        self.ensure_post(params.post_id).await?;

        if let Some(parent_id) = params.parent_id {
            let parent = self.get(parent_id).await?;
            if parent.post_id != params.post_id {
                return Err(AppError::validation(
                    "Parent comment belongs to a different post",
                ));
            }
        }

        Ok(CommentRepository::new(self.db).create(params).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Comment, AppError> {
        CommentRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("comment {} not found", id)))
    }

    /// Lists comments on a post. Without an explicit status only approved comments are shown.
    pub async fn get_by_post(
        &self,
        post_id: Uuid,
        status: Option<CommentStatus>,
        pagination: Pagination,
    ) -> Result<Paginated<Comment>, AppError> {
        self.ensure_post(post_id).await?;

        let status = status.unwrap_or(CommentStatus::Approved);

        Ok(CommentRepository::new(self.db)
            .get_by_post_paginated(post_id, Some(status), pagination)
            .await?)
    }

    pub async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        content: String,
    ) -> Result<Comment, AppError> {
        if content.trim().is_empty() {
            return Err(AppError::validation("Comment content is required"));
        }

        self.ensure_author(user_id, id).await?;

        CommentRepository::new(self.db)
            .update_content(id, content)
            .await?
            .ok_or_else(|| AppError::not_found(format!("comment {} not found", id)))
    }

    pub async fn set_status(&self, id: Uuid, status: CommentStatus) -> Result<Comment, AppError> {
        CommentRepository::new(self.db)
            .set_status(id, status)
            .await?
            .ok_or_else(|| AppError::not_found(format!("comment {} not found", id)))
    }

    pub async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
        self.ensure_author(user_id, id).await?;

        if !CommentRepository::new(self.db).soft_delete(id).await? {
            return Err(AppError::not_found(format!("comment {} not found", id)));
        }

        Ok(())
    }

    async fn ensure_post(&self, post_id: Uuid) -> Result<(), AppError> {
        if PostRepository::new(self.db).find_by_id(post_id).await?.is_none() {
            return Err(AppError::not_found(format!("post {} not found", post_id)));
        }

        Ok(())
    }

    async fn ensure_author(&self, user_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let comment = self.get(id).await?;
        if comment.author_id != user_id {
            return Err(AuthError::NotOwner(user_id).into());
        }

        Ok(())
    }
}

//! Post factory for creating test post entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test posts.
///
/// The author must already exist because `post.author_id` references `user.id`.
pub struct PostFactory<'a> {
    db: &'a DatabaseConnection,
    author_id: Uuid,
    title: String,
    slug: String,
    content: String,
    status: String,
}

impl<'a> PostFactory<'a> {
    /// Creates a new draft post titled `"Post {id}"` for the given author.
    pub fn new(db: &'a DatabaseConnection, author_id: Uuid) -> Self {
        let id = next_id();
        Self {
            db,
            author_id,
            title: format!("Post {}", id),
            slug: format!("post-{}", id),
            content: format!("Body of post {}", id),
            status: "draft".to_string(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub async fn build(self) -> Result<entity::post::Model, DbErr> {
        let now = Utc::now();
        let published_at = (self.status == "published").then_some(now);
        entity::post::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            author_id: ActiveValue::Set(self.author_id),
            title: ActiveValue::Set(self.title),
            slug: ActiveValue::Set(self.slug),
            content: ActiveValue::Set(self.content),
            excerpt: ActiveValue::Set(None),
            status: ActiveValue::Set(self.status),
            published_at: ActiveValue::Set(published_at),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a draft post for the given author with default values.
pub async fn create_post(
    db: &DatabaseConnection,
    author_id: Uuid,
) -> Result<entity::post::Model, DbErr> {
    PostFactory::new(db, author_id).build().await
}

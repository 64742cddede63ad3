//! Tag factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Creates a tag named `"Tag {id}"` with slug `"tag-{id}"`.
pub async fn create_tag(db: &DatabaseConnection) -> Result<entity::tag::Model, DbErr> {
    let id = next_id();
    create_tag_named(db, &format!("Tag {}", id), &format!("tag-{}", id)).await
}

/// Creates a tag with an explicit name and slug.
pub async fn create_tag_named(
    db: &DatabaseConnection,
    name: &str,
    slug: &str,
) -> Result<entity::tag::Model, DbErr> {
    let now = Utc::now();
    entity::tag::ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4()),
        name: ActiveValue::Set(name.to_string()),
        slug: ActiveValue::Set(slug.to_string()),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
    }
    .insert(db)
    .await
}

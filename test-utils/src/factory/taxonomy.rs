//! Taxonomy factory for creating test taxonomy terms.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test taxonomy terms.
pub struct TaxonomyFactory<'a> {
    db: &'a DatabaseConnection,
    parent_id: Option<Uuid>,
    name: String,
    slug: String,
    kind: String,
    record_ordering: i32,
}

impl<'a> TaxonomyFactory<'a> {
    /// Creates a new TaxonomyFactory with default values.
    ///
    /// Defaults to a root `"category"` term named `"Term {id}"` with slug `"term-{id}"`.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            parent_id: None,
            name: format!("Term {}", id),
            slug: format!("term-{}", id),
            kind: "category".to_string(),
            record_ordering: 0,
        }
    }

    pub fn parent_id(mut self, parent_id: Option<Uuid>) -> Self {
        self.parent_id = parent_id;
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn record_ordering(mut self, record_ordering: i32) -> Self {
        self.record_ordering = record_ordering;
        self
    }

    pub async fn build(self) -> Result<entity::taxonomy::Model, DbErr> {
        let now = Utc::now();
        entity::taxonomy::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            parent_id: ActiveValue::Set(self.parent_id),
            name: ActiveValue::Set(self.name),
            slug: ActiveValue::Set(self.slug),
            kind: ActiveValue::Set(self.kind),
            description: ActiveValue::Set(None),
            record_ordering: ActiveValue::Set(self.record_ordering),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a root taxonomy term with default values.
pub async fn create_taxonomy(db: &DatabaseConnection) -> Result<entity::taxonomy::Model, DbErr> {
    TaxonomyFactory::new(db).build().await
}

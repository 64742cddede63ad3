//! Organization factory for creating test organization entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test organizations with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let child = OrganizationFactory::new(&db)
///     .parent_id(Some(root.id))
///     .record_ordering(2)
///     .build()
///     .await?;
/// ```
pub struct OrganizationFactory<'a> {
    db: &'a DatabaseConnection,
    parent_id: Option<Uuid>,
    name: String,
    slug: String,
    status: String,
    record_ordering: i32,
    created_at: DateTime<Utc>,
}

impl<'a> OrganizationFactory<'a> {
    /// Creates a new OrganizationFactory with default values.
    ///
    /// Defaults:
    /// - parent_id: `None` (root)
    /// - name: `"Organization {id}"`
    /// - slug: `"organization-{id}"`
    /// - status: `"active"`
    /// - record_ordering: `0`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            parent_id: None,
            name: format!("Organization {}", id),
            slug: format!("organization-{}", id),
            status: "active".to_string(),
            record_ordering: 0,
            created_at: Utc::now(),
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

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn record_ordering(mut self, record_ordering: i32) -> Self {
        self.record_ordering = record_ordering;
        self
    }

    /// Overrides the creation timestamp, used to test tie-breaking on equal ordering.
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the organization entity into the database.
    pub async fn build(self) -> Result<entity::organization::Model, DbErr> {
        entity::organization::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            parent_id: ActiveValue::Set(self.parent_id),
            name: ActiveValue::Set(self.name),
            slug: ActiveValue::Set(self.slug),
            description: ActiveValue::Set(None),
            email: ActiveValue::Set(None),
            phone: ActiveValue::Set(None),
            website: ActiveValue::Set(None),
            status: ActiveValue::Set(self.status),
            record_ordering: ActiveValue::Set(self.record_ordering),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a root organization with default values.
pub async fn create_organization(
    db: &DatabaseConnection,
) -> Result<entity::organization::Model, DbErr> {
    OrganizationFactory::new(db).build().await
}

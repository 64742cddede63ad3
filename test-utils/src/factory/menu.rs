//! Menu factory for creating test menu entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test menu entries.
pub struct MenuFactory<'a> {
    db: &'a DatabaseConnection,
    parent_id: Option<Uuid>,
    name: String,
    url: Option<String>,
    is_active: bool,
    is_visible: bool,
    record_ordering: i32,
}

impl<'a> MenuFactory<'a> {
    /// Creates a new MenuFactory with default values.
    ///
    /// Defaults to an active, visible root entry named `"Menu {id}"` linking to `/menu-{id}`.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            parent_id: None,
            name: format!("Menu {}", id),
            url: Some(format!("/menu-{}", id)),
            is_active: true,
            is_visible: true,
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

    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn visible(mut self, is_visible: bool) -> Self {
        self.is_visible = is_visible;
        self
    }

    pub fn record_ordering(mut self, record_ordering: i32) -> Self {
        self.record_ordering = record_ordering;
        self
    }

    pub async fn build(self) -> Result<entity::menu::Model, DbErr> {
        let now = Utc::now();
        entity::menu::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            parent_id: ActiveValue::Set(self.parent_id),
            name: ActiveValue::Set(self.name),
            url: ActiveValue::Set(self.url),
            icon: ActiveValue::Set(None),
            target: ActiveValue::Set(None),
            is_active: ActiveValue::Set(self.is_active),
            is_visible: ActiveValue::Set(self.is_visible),
            record_ordering: ActiveValue::Set(self.record_ordering),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a root menu entry with default values.
pub async fn create_menu(db: &DatabaseConnection) -> Result<entity::menu::Model, DbErr> {
    MenuFactory::new(db).build().await
}

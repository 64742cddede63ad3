//! User data repository for database operations.
//!
//! Provides `UserRepository` for account rows. Soft-deleted users are invisible to every
//! query here, so a deleted account can neither log in nor be listed.

use chrono::Utc;
use sea_orm::{
    sea_query::{Condition, Expr},
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};
use uuid::Uuid;

use crate::server::model::{
    pagination::{Paginated, Pagination},
    user::{CreateUserParams, UpdateUserParams, User},
};

/// Repository providing database operations for user accounts.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

fn live() -> Select<entity::user::Entity> {
    entity::prelude::User::find().filter(entity::user::Column::DeletedAt.is_null())
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new active user.
    ///
    /// # Arguments
    /// - `params` - Username, email, already-hashed password and optional full name
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(DbErr)` - Database error, including unique violations on username or email
    pub async fn create(&self, params: CreateUserParams) -> Result<User, DbErr> {
        let now = Utc::now();
        let entity = entity::user::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            username: ActiveValue::Set(params.username),
            email: ActiveValue::Set(params.email),
            password_hash: ActiveValue::Set(params.password_hash),
            full_name: ActiveValue::Set(params.full_name),
            is_active: ActiveValue::Set(true),
            last_login_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await?;

        Ok(User::from_entity(entity))
    }

    /// Finds a live user by ID.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No such user, or the user was soft-deleted
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DbErr> {
        let entity = live()
            .filter(entity::user::Column::Id.eq(id))
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Finds a live user whose username or email equals `login`.
    ///
    /// Email comparison is done against the lowercased input since emails are stored
    /// lowercased at registration.
    pub async fn find_by_login(&self, login: &str) -> Result<Option<User>, DbErr> {
        let login = login.trim();
        let entity = live()
            .filter(
                Condition::any()
                    .add(entity::user::Column::Username.eq(login))
                    .add(entity::user::Column::Email.eq(login.to_lowercase())),
            )
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Whether any user row, live or deleted, holds this username.
    ///
    /// Deleted rows still occupy the unique index, so they count.
    pub async fn username_exists(&self, username: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Username.eq(username))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Whether any user row other than `exclude` holds this email.
    pub async fn email_exists(&self, email: &str, exclude: Option<Uuid>) -> Result<bool, DbErr> {
        let mut select =
            entity::prelude::User::find().filter(entity::user::Column::Email.eq(email));
        if let Some(id) = exclude {
            select = select.filter(entity::user::Column::Id.ne(id));
        }

        Ok(select.count(self.db).await? > 0)
    }

    /// Counts all users ever created, including soft-deleted ones.
    pub async fn count_all(&self) -> Result<u64, DbErr> {
        entity::prelude::User::find().count(self.db).await
    }

    /// Gets paginated live users ordered by username.
    ///
    /// # Arguments
    /// - `search` - Optional substring matched against username, email and full name
    ///   with SQLite `LIKE` (ASCII case-insensitive)
    /// - `pagination` - Limit and offset
    pub async fn get_paginated(
        &self,
        search: Option<&str>,
        pagination: Pagination,
    ) -> Result<Paginated<User>, DbErr> {
        let mut select = live();
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            select = select.filter(
                Condition::any()
                    .add(entity::user::Column::Username.contains(term))
                    .add(entity::user::Column::Email.contains(term))
                    .add(entity::user::Column::FullName.contains(term)),
            );
        }

        let total = select.clone().count(self.db).await?;
        let items = select
            .order_by_asc(entity::user::Column::Username)
            .limit(pagination.limit)
            .offset(pagination.offset)
            .all(self.db)
            .await?
            .into_iter()
            .map(User::from_entity)
            .collect();

        Ok(Paginated {
            items,
            total,
            pagination,
        })
    }

    /// Applies profile changes. Returns `None` when the user does not exist.
    pub async fn update(&self, id: Uuid, params: UpdateUserParams) -> Result<Option<User>, DbErr> {
        let Some(existing) = live()
            .filter(entity::user::Column::Id.eq(id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::user::ActiveModel = existing.into();
        if let Some(full_name) = params.full_name {
            active.full_name = ActiveValue::Set(Some(full_name));
        }
        if let Some(email) = params.email {
            active.email = ActiveValue::Set(email);
        }
        if let Some(is_active) = params.is_active {
            active.is_active = ActiveValue::Set(is_active);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(User::from_entity(active.update(self.db).await?)))
    }

    /// Replaces the stored password hash.
    ///
    /// # Returns
    /// - `Ok(true)` - Hash updated
    /// - `Ok(false)` - User not found
    pub async fn set_password_hash(&self, id: Uuid, password_hash: String) -> Result<bool, DbErr> {
        let result = entity::prelude::User::update_many()
            .col_expr(entity::user::Column::PasswordHash, Expr::value(password_hash))
            .col_expr(entity::user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::user::Column::Id.eq(id))
            .filter(entity::user::Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn touch_last_login(&self, id: Uuid) -> Result<(), DbErr> {
        entity::prelude::User::update_many()
            .col_expr(entity::user::Column::LastLoginAt, Expr::value(Some(Utc::now())))
            .filter(entity::user::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Soft-deletes a user.
    ///
    /// # Returns
    /// - `Ok(true)` - User marked deleted
    /// - `Ok(false)` - User not found or already deleted
    pub async fn soft_delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let now = Utc::now();
        let result = entity::prelude::User::update_many()
            .col_expr(entity::user::Column::DeletedAt, Expr::value(Some(now)))
            .col_expr(entity::user::Column::IsActive, Expr::value(false))
            .col_expr(entity::user::Column::UpdatedAt, Expr::value(now))
            .filter(entity::user::Column::Id.eq(id))
            .filter(entity::user::Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Add entity tables, then call `build()` to create the configured context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{User, Post};
///
/// let test = TestBuilder::new()
///     .with_table(User)
///     .with_table(Post)
///     .build()
///     .await?;
/// ```
#[derive(Default)]
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. Tables with foreign keys should be added after the tables they
    /// reference.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity implementing `EntityTrait` to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds the identity and access tables: User, Role, UserRole and RbacPolicy.
    ///
    /// Use this when testing authentication, user management or permission checks.
    pub fn with_auth_tables(self) -> Self {
        self.with_table(User)
            .with_table(Role)
            .with_table(UserRole)
            .with_table(RbacPolicy)
    }

    /// Adds the three hierarchical entity tables: Organization, Menu and Taxonomy.
    pub fn with_hierarchy_tables(self) -> Self {
        self.with_table(Organization)
            .with_table(Menu)
            .with_table(Taxonomy)
    }

    /// Adds the content tables: Post, Tag, PostTag and Comment.
    ///
    /// Posts reference users, so combine this with `with_auth_tables()` or add `User`
    /// beforehand.
    pub fn with_content_tables(self) -> Self {
        self.with_table(Post)
            .with_table(Tag)
            .with_table(PostTag)
            .with_table(Comment)
    }

    /// Adds every table in the schema, in dependency order.
    ///
    /// Used by router-level tests that exercise the whole application.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let test = TestBuilder::new().with_all_tables().build().await?;
    /// ```
    pub fn with_all_tables(self) -> Self {
        self.with_auth_tables()
            .with_hierarchy_tables()
            .with_content_tables()
            .with_table(Address)
            .with_table(Media)
            .with_table(Notification)
            .with_table(Job)
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Initialized test context with database and tables ready
    /// - `Err(TestError::Database)` - Failed to connect to database or create tables
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;

        Ok(setup)
    }
}

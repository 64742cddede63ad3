//! Atrium Test Utils
//!
//! Shared testing utilities for the atrium backend. Provides a builder for test contexts
//! backed by in-memory SQLite databases with the entity tables a test needs, plus factories
//! for inserting rows with sensible defaults.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment holding the database connection
//! - **TestError**: Errors that can occur during test setup
//! - **factory**: Row factories for users, roles, hierarchy entities and content
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::Organization;
//!
//! #[tokio::test]
//! async fn test_organization_operations() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(Organization)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;

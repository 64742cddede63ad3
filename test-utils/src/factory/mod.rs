//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` builder for customization and
//! a `create_*` convenience function for quick default creation. Factories for rows with
//! foreign keys take the referenced ids as arguments.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let user = factory::create_user(&db).await?;
//!     let root = factory::create_organization(&db).await?;
//!     let child = factory::organization::OrganizationFactory::new(&db)
//!         .parent_id(Some(root.id))
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Available Factories
//!
//! - `user` - Users
//! - `role` - Roles, role assignments and RBAC policies
//! - `organization` - Organizations
//! - `menu` - Menu entries
//! - `taxonomy` - Taxonomy terms
//! - `post` - Posts
//! - `tag` - Tags
//! - `helpers` - Id generation and multi-level hierarchy helpers

pub mod helpers;
pub mod menu;
pub mod organization;
pub mod post;
pub mod role;
pub mod tag;
pub mod taxonomy;
pub mod user;

pub use menu::create_menu;
pub use organization::create_organization;
pub use post::create_post;
pub use role::{assign_role, create_policy, create_role};
pub use tag::create_tag;
pub use taxonomy::create_taxonomy;
pub use user::create_user;

//! Shared helper utilities for factory methods.
//!
//! Provides id generation used across all factories and helpers for building small
//! organization trees in one call.

use sea_orm::{DatabaseConnection, DbErr};

use crate::factory::organization::OrganizationFactory;

/// Counter for generating unique names and slugs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Creates a linear chain of organizations, each the child of the previous one.
///
/// The first element is the root. Organizations get `record_ordering` 0 and default names.
///
/// # Arguments
/// - `db` - Database connection
/// - `depth` - Number of organizations in the chain
///
/// # Returns
/// - `Ok(Vec<entity::organization::Model>)` - Chain ordered from root to leaf
/// - `Err(DbErr)` - Database error during insert
pub async fn create_organization_chain(
    db: &DatabaseConnection,
    depth: usize,
) -> Result<Vec<entity::organization::Model>, DbErr> {
    let mut chain: Vec<entity::organization::Model> = Vec::with_capacity(depth);

    for _ in 0..depth {
        let parent_id = chain.last().map(|org| org.id);
        let org = OrganizationFactory::new(db).parent_id(parent_id).build().await?;
        chain.push(org);
    }

    Ok(chain)
}

/// Creates a root organization with `count` direct children.
///
/// Children receive `record_ordering` values `0..count` in insertion order.
///
/// # Returns
/// - `Ok((root, children))` - The root and its children
/// - `Err(DbErr)` - Database error during insert
pub async fn create_organization_with_children(
    db: &DatabaseConnection,
    count: usize,
) -> Result<
    (
        entity::organization::Model,
        Vec<entity::organization::Model>,
    ),
    DbErr,
> {
    let root = OrganizationFactory::new(db).build().await?;

    let mut children = Vec::with_capacity(count);
    for ordering in 0..count {
        let child = OrganizationFactory::new(db)
            .parent_id(Some(root.id))
            .record_ordering(ordering as i32)
            .build()
            .await?;
        children.push(child);
    }

    Ok((root, children))
}

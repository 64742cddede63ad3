//! Generic tree queries over the self-referencing hierarchy tables.
//!
//! Organizations, menus and taxonomies share one adjacency-list layout (`parent_id`,
//! `record_ordering`, audit timestamps, `deleted_at`). `HierarchyEntity` exposes those
//! columns so a single repository answers children, descendants, ancestors and subtree
//! mutations for all three. Soft-deleted rows are never returned.

use std::{collections::HashSet, marker::PhantomData};

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Select, TransactionTrait,
};
use uuid::Uuid;

use crate::server::model::hierarchy::HierarchyNode;

/// Column access for an entity stored as an adjacency list.
pub trait HierarchyEntity: EntityTrait {
    /// Human-readable name used in error messages.
    const LABEL: &'static str;

    fn id_column() -> Self::Column;
    fn parent_column() -> Self::Column;
    fn ordering_column() -> Self::Column;
    fn created_at_column() -> Self::Column;
    fn updated_at_column() -> Self::Column;
    fn deleted_at_column() -> Self::Column;

    fn node_of(model: &Self::Model) -> HierarchyNode;
}

macro_rules! impl_hierarchy_entity {
    ($module:ident, $label:literal) => {
        impl HierarchyEntity for entity::$module::Entity {
            const LABEL: &'static str = $label;

            fn id_column() -> Self::Column {
                entity::$module::Column::Id
            }
            fn parent_column() -> Self::Column {
                entity::$module::Column::ParentId
            }
            fn ordering_column() -> Self::Column {
                entity::$module::Column::RecordOrdering
            }
            fn created_at_column() -> Self::Column {
                entity::$module::Column::CreatedAt
            }
            fn updated_at_column() -> Self::Column {
                entity::$module::Column::UpdatedAt
            }
            fn deleted_at_column() -> Self::Column {
                entity::$module::Column::DeletedAt
            }

            fn node_of(model: &Self::Model) -> HierarchyNode {
                HierarchyNode {
                    id: model.id,
                    parent_id: model.parent_id,
                    record_ordering: model.record_ordering,
                    created_at: model.created_at,
                }
            }
        }
    };
}

impl_hierarchy_entity!(organization, "organization");
impl_hierarchy_entity!(menu, "menu");
impl_hierarchy_entity!(taxonomy, "taxonomy");

/// Live rows only.
pub fn live<E: HierarchyEntity>() -> Select<E> {
    E::find().filter(E::deleted_at_column().is_null())
}

/// Applies sibling ordering: `record_ordering`, then `created_at`, then `id`.
pub fn ordered<E: HierarchyEntity>(select: Select<E>) -> Select<E> {
    select
        .order_by_asc(E::ordering_column())
        .order_by_asc(E::created_at_column())
        .order_by_asc(E::id_column())
}

pub struct HierarchyRepository<'a, E> {
    db: &'a DatabaseConnection,
    _entity: PhantomData<E>,
}

impl<'a, E> HierarchyRepository<'a, E>
where
    E: HierarchyEntity,
{
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    /// Finds a live row by id.
    pub async fn find_live(&self, id: Uuid) -> Result<Option<E::Model>, DbErr> {
        find_live::<E, _>(self.db, id).await
    }

    /// Every live row in sibling order, unnested.
    pub async fn all_live(&self) -> Result<Vec<E::Model>, DbErr> {
        ordered(live::<E>()).all(self.db).await
    }

    /// Direct children of `parent_id`, or the roots when `None`.
    pub async fn children(&self, parent_id: Option<Uuid>) -> Result<Vec<E::Model>, DbErr> {
        let select = match parent_id {
            Some(parent_id) => live::<E>().filter(E::parent_column().eq(parent_id)),
            None => live::<E>().filter(E::parent_column().is_null()),
        };

        ordered(select).all(self.db).await
    }

    /// All transitive descendants of `id` in breadth-first order, excluding `id` itself.
    pub async fn descendants(&self, id: Uuid) -> Result<Vec<E::Model>, DbErr> {
        descendants::<E, _>(self.db, id).await
    }

    /// Ids of all transitive descendants of `id`.
    pub async fn descendant_ids(&self, id: Uuid) -> Result<Vec<Uuid>, DbErr> {
        Ok(self
            .descendants(id)
            .await?
            .iter()
            .map(|model| E::node_of(model).id)
            .collect())
    }

    /// Chain of live ancestors of `id`, root first, excluding `id` itself.
    ///
    /// The walk stops at the first missing or soft-deleted parent.
    pub async fn ancestors(&self, id: Uuid) -> Result<Vec<E::Model>, DbErr> {
        let mut chain = Vec::new();
        let mut visited = HashSet::from([id]);

        let mut next = match self.find_live(id).await? {
            Some(model) => E::node_of(&model).parent_id,
            None => return Ok(chain),
        };

        while let Some(parent_id) = next {
            if !visited.insert(parent_id) {
                break;
            }
            let Some(parent) = self.find_live(parent_id).await? else {
                break;
            };
            next = E::node_of(&parent).parent_id;
            chain.push(parent);
        }

        chain.reverse();
        Ok(chain)
    }

    /// Points `id` at a new parent, or makes it a root when `None`.
    pub async fn set_parent(&self, id: Uuid, parent_id: Option<Uuid>) -> Result<(), DbErr> {
        E::update_many()
            .col_expr(E::parent_column(), Expr::value(parent_id))
            .col_expr(E::updated_at_column(), Expr::value(Utc::now()))
            .filter(E::id_column().eq(id))
            .filter(E::deleted_at_column().is_null())
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Soft-deletes a single row and moves its live children up to `new_parent`.
    ///
    /// Both updates run in one transaction.
    pub async fn delete_and_reparent(
        &self,
        id: Uuid,
        new_parent: Option<Uuid>,
    ) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        E::update_many()
            .col_expr(E::parent_column(), Expr::value(new_parent))
            .col_expr(E::updated_at_column(), Expr::value(now))
            .filter(E::parent_column().eq(id))
            .filter(E::deleted_at_column().is_null())
            .exec(&txn)
            .await?;

        soft_delete_many::<E, _>(&txn, vec![id]).await?;

        txn.commit().await
    }

    /// Soft-deletes `id` and every transitive descendant atomically.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows marked deleted
    pub async fn delete_subtree(&self, id: Uuid) -> Result<u64, DbErr> {
        let txn = self.db.begin().await?;

        let mut ids: Vec<Uuid> = descendants::<E, _>(&txn, id)
            .await?
            .iter()
            .map(|model| E::node_of(model).id)
            .collect();
        ids.push(id);

        let deleted = soft_delete_many::<E, _>(&txn, ids).await?;

        txn.commit().await?;

        Ok(deleted)
    }
}

async fn find_live<E, C>(db: &C, id: Uuid) -> Result<Option<E::Model>, DbErr>
where
    E: HierarchyEntity,
    C: ConnectionTrait,
{
    live::<E>().filter(E::id_column().eq(id)).one(db).await
}

async fn descendants<E, C>(db: &C, id: Uuid) -> Result<Vec<E::Model>, DbErr>
where
    E: HierarchyEntity,
    C: ConnectionTrait,
{
    let mut found = Vec::new();
    let mut visited = HashSet::from([id]);
    let mut frontier = vec![id];

    while !frontier.is_empty() {
        let level = ordered(live::<E>().filter(E::parent_column().is_in(frontier)))
            .all(db)
            .await?;

        frontier = Vec::with_capacity(level.len());
        for model in level {
            let child_id = E::node_of(&model).id;
            if visited.insert(child_id) {
                frontier.push(child_id);
                found.push(model);
            }
        }
    }

    Ok(found)
}

async fn soft_delete_many<E, C>(db: &C, ids: Vec<Uuid>) -> Result<u64, DbErr>
where
    E: HierarchyEntity,
    C: ConnectionTrait,
{
    let now = Utc::now();

    let result = E::update_many()
        .col_expr(E::deleted_at_column(), Expr::value(Some(now)))
        .col_expr(E::updated_at_column(), Expr::value(now))
        .filter(E::id_column().is_in(ids))
        .filter(E::deleted_at_column().is_null())
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

//! Shared hierarchy model for self-referencing entities.
//!
//! Organizations, menus and taxonomies all carry a nullable parent reference, a sibling
//! ordering and audit timestamps. `HierarchyModel` lets the generic repository and service
//! treat them uniformly, and `build_forest` nests a flat row set into a tree.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{DbErr, EntityTrait};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    model::hierarchy::TreeNodeDto,
    server::{data::hierarchy::HierarchyEntity, error::AppError},
};

/// Structural fields of a hierarchy row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HierarchyNode {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub record_ordering: i32,
    pub created_at: DateTime<Utc>,
}

impl HierarchyNode {
    /// Sibling sort key: ordering, then creation time, then id.
    pub fn sort_key(&self) -> (i32, DateTime<Utc>, Uuid) {
        (self.record_ordering, self.created_at, self.id)
    }
}

/// Domain model backed by a hierarchy entity.
pub trait HierarchyModel: Sized + Clone + Send + Sync {
    type Entity: HierarchyEntity;
    type Dto: Serialize + Send;

    /// Converts an entity model to the domain model at the repository boundary.
    fn from_entity(entity: <Self::Entity as EntityTrait>::Model) -> Result<Self, DbErr>;

    fn node(&self) -> HierarchyNode;

    fn into_dto(self) -> Self::Dto;

    /// Rejects placing `child` under `self` for entity-specific reasons.
    fn accepts_child(&self, _child: &Self) -> Result<(), AppError> {
        Ok(())
    }
}

/// A model with its nested children.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode<T> {
    pub item: T,
    pub children: Vec<TreeNode<T>>,
}

impl<T> TreeNode<T> {
    pub fn map<U>(self, f: &impl Fn(T) -> U) -> TreeNodeDto<U> {
        TreeNodeDto {
            item: f(self.item),
            children: self.children.into_iter().map(|child| child.map(f)).collect(),
        }
    }

    /// Number of items in this subtree, including the node itself.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }
}

/// Nests a flat set of items into a forest.
///
/// Items whose parent is absent from the set become roots. Siblings are ordered by
/// `record_ordering`, then `created_at`, then `id`. Rows caught in a parent cycle are
/// unreachable from any root and are left out.
pub fn build_forest<T>(items: Vec<T>, node_of: impl Fn(&T) -> HierarchyNode) -> Vec<TreeNode<T>> {
    let mut items = items;
    items.sort_by_key(|item| node_of(item).sort_key());

    let present: std::collections::HashSet<Uuid> =
        items.iter().map(|item| node_of(item).id).collect();

    let mut roots = Vec::new();
    let mut children: HashMap<Uuid, Vec<T>> = HashMap::new();

    for item in items {
        match node_of(&item).parent_id {
            Some(parent_id) if present.contains(&parent_id) => {
                children.entry(parent_id).or_default().push(item)
            }
            _ => roots.push(item),
        }
    }

    roots
        .into_iter()
        .map(|root| attach(root, &mut children, &node_of))
        .collect()
}

fn attach<T>(
    item: T,
    children: &mut HashMap<Uuid, Vec<T>>,
    node_of: &impl Fn(&T) -> HierarchyNode,
) -> TreeNode<T> {
    let kids = children.remove(&node_of(&item).id).unwrap_or_default();

    TreeNode {
        item,
        children: kids
            .into_iter()
            .map(|child| attach(child, children, node_of))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn node(parent_id: Option<Uuid>, record_ordering: i32, offset_secs: i64) -> HierarchyNode {
        HierarchyNode {
            id: Uuid::new_v4(),
            parent_id,
            record_ordering,
            created_at: DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(offset_secs),
        }
    }

    #[test]
    fn nests_children_under_parents() {
        let root = node(None, 0, 0);
        let child = node(Some(root.id), 0, 1);
        let grandchild = node(Some(child.id), 0, 2);

        let forest = build_forest(vec![grandchild, child, root], |n| *n);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].item.id, root.id);
        assert_eq!(forest[0].children[0].item.id, child.id);
        assert_eq!(forest[0].children[0].children[0].item.id, grandchild.id);
        assert_eq!(forest[0].size(), 3);
    }

    #[test]
    fn orders_siblings_by_ordering_then_creation() {
        let root = node(None, 0, 0);
        let late_low = node(Some(root.id), 1, 30);
        let early_low = node(Some(root.id), 1, 10);
        let first = node(Some(root.id), 0, 50);

        let forest = build_forest(vec![late_low, root, early_low, first], |n| *n);
        let order: Vec<Uuid> = forest[0].children.iter().map(|c| c.item.id).collect();

        assert_eq!(order, vec![first.id, early_low.id, late_low.id]);
    }

    #[test]
    fn treats_orphans_as_roots() {
        let orphan = node(Some(Uuid::new_v4()), 0, 0);
        let root = node(None, 1, 0);

        let forest = build_forest(vec![root, orphan], |n| *n);

        assert_eq!(forest.len(), 2);
        assert_eq!(forest[0].item.id, orphan.id);
    }
}

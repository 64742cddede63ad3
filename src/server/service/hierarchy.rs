//! Tree operations shared by organizations, menus and taxonomies.
//!
//! `HierarchyService` implements reads (children, descendants, ancestors, siblings, path,
//! tree, roots) and structural writes (move, delete, subtree delete) once for any
//! `HierarchyModel`. Entity services add their own create/update/status rules on top.

use std::marker::PhantomData;

use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::server::{
    data::hierarchy::{HierarchyEntity, HierarchyRepository},
    error::AppError,
    model::hierarchy::{build_forest, HierarchyModel, TreeNode},
};

pub struct HierarchyService<'a, M: HierarchyModel> {
    db: &'a DatabaseConnection,
    _model: PhantomData<M>,
}

fn label<M: HierarchyModel>() -> &'static str {
    <M::Entity as HierarchyEntity>::LABEL
}

fn convert<M: HierarchyModel>(
    models: Vec<<M::Entity as EntityTrait>::Model>,
) -> Result<Vec<M>, AppError> {
    models
        .into_iter()
        .map(M::from_entity)
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

impl<'a, M: HierarchyModel> HierarchyService<'a, M> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            _model: PhantomData,
        }
    }

    fn repo(&self) -> HierarchyRepository<'a, M::Entity> {
        HierarchyRepository::new(self.db)
    }

    /// Gets a live entity.
    ///
    /// # Returns
    /// - `Ok(M)` - The entity
    /// - `Err(AppError::NotFound)` - Missing or soft-deleted
    pub async fn get(&self, id: Uuid) -> Result<M, AppError> {
        match self.repo().find_live(id).await? {
            Some(model) => Ok(M::from_entity(model)?),
            None => Err(AppError::not_found(format!("{} {} not found", label::<M>(), id))),
        }
    }

    /// Ensures a referenced parent exists and is live. `None` always passes.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - `"parent <label> <id> not found"`
    pub async fn ensure_parent(&self, parent_id: Option<Uuid>) -> Result<(), AppError> {
        let Some(parent_id) = parent_id else {
            return Ok(());
        };
        if self.repo().find_live(parent_id).await?.is_none() {
            return Err(AppError::not_found(format!(
                "parent {} {} not found",
                label::<M>(),
                parent_id
            )));
        }

        Ok(())
    }

    /// Direct children in sibling order.
    pub async fn children(&self, id: Uuid) -> Result<Vec<M>, AppError> {
        self.get(id).await?;

        convert(self.repo().children(Some(id)).await?)
    }

    /// Every transitive child, breadth-first. Never includes the entity itself.
    pub async fn descendants(&self, id: Uuid) -> Result<Vec<M>, AppError> {
        self.get(id).await?;

        convert(self.repo().descendants(id).await?)
    }

    /// Ancestors ordered root-first, excluding the entity.
    pub async fn ancestors(&self, id: Uuid) -> Result<Vec<M>, AppError> {
        self.get(id).await?;

        convert(self.repo().ancestors(id).await?)
    }

    /// Other children of the same parent. For a root, the other roots.
    pub async fn siblings(&self, id: Uuid) -> Result<Vec<M>, AppError> {
        let entity = self.get(id).await?;
        let parent_id = entity.node().parent_id;

        let siblings = convert::<M>(self.repo().children(parent_id).await?)?;

        Ok(siblings
            .into_iter()
            .filter(|sibling| sibling.node().id != id)
            .collect())
    }

    /// Root-to-entity chain for breadcrumbs, ending with the entity itself.
    pub async fn path(&self, id: Uuid) -> Result<Vec<M>, AppError> {
        let entity = self.get(id).await?;

        let mut path = convert::<M>(self.repo().ancestors(id).await?)?;
        path.push(entity);

        Ok(path)
    }

    /// Entities with no parent, in sibling order.
    pub async fn roots(&self) -> Result<Vec<M>, AppError> {
        convert(self.repo().children(None).await?)
    }

    /// The whole live forest, nested.
    pub async fn tree(&self) -> Result<Vec<TreeNode<M>>, AppError> {
        let all = convert::<M>(self.repo().all_live().await?)?;

        Ok(build_forest(all, M::node))
    }

    /// Checks that `child` may be placed under `parent`.
    ///
    /// # Returns
    /// - `Ok(())` - The move keeps the hierarchy acyclic
    /// - `Err(AppError::NotFound)` - Either entity is missing
    /// - `Err(AppError::Validation)` - `parent == child`, `parent` is below `child`, or the
    ///   entity type refuses the pairing
    pub async fn validate_hierarchy(&self, parent_id: Uuid, child_id: Uuid) -> Result<(), AppError> {
        let child = self.get(child_id).await?;
        self.ensure_parent(Some(parent_id)).await?;

        if parent_id == child_id {
            return Err(AppError::validation(format!(
                "A {} cannot be its own parent",
                label::<M>()
            )));
        }

        let descendants = self.repo().descendant_ids(child_id).await?;
        if descendants.contains(&parent_id) {
            return Err(AppError::validation(format!(
                "Cannot move {} {} under its own descendant {}",
                label::<M>(),
                child_id,
                parent_id
            )));
        }

        self.get(parent_id).await?.accepts_child(&child)
    }

    /// Re-parents `id` and its subtree. `None` makes it a root.
    pub async fn move_subtree(&self, id: Uuid, new_parent_id: Option<Uuid>) -> Result<M, AppError> {
        match new_parent_id {
            Some(parent_id) => self.validate_hierarchy(parent_id, id).await?,
            None => {
                self.get(id).await?;
            }
        }

        self.repo().set_parent(id, new_parent_id).await?;

        tracing::debug!(
            "Moved {} {} under {:?}",
            label::<M>(),
            id,
            new_parent_id
        );

        self.get(id).await
    }

    /// Soft-deletes one entity. Its direct children move up to its parent.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let entity = self.get(id).await?;

        self.repo()
            .delete_and_reparent(id, entity.node().parent_id)
            .await?;

        Ok(())
    }

    /// Soft-deletes the entity and all of its descendants in one transaction.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of entities deleted, including `id`
    pub async fn delete_subtree(&self, id: Uuid) -> Result<u64, AppError> {
        self.get(id).await?;

        let deleted = self.repo().delete_subtree(id).await?;

        tracing::info!("Deleted {} subtree {} ({} rows)", label::<M>(), id, deleted);

        Ok(deleted)
    }
}

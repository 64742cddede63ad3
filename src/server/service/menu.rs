use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    data::menu::MenuRepository,
    error::AppError,
    model::{
        menu::{CreateMenuParams, Menu, MenuFilter, UpdateMenuParams},
        pagination::{Paginated, Pagination},
    },
    service::hierarchy::HierarchyService,
};

pub struct MenuService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MenuService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn hierarchy(&self) -> HierarchyService<'a, Menu> {
        HierarchyService::new(self.db)
    }

    pub async fn create(&self, params: CreateMenuParams) -> Result<Menu, AppError> {
        let repo = MenuRepository::new(self.db);

        self.hierarchy().ensure_parent(params.parent_id).await?;

        Ok(repo.create(params).await?)
    }

    pub async fn create_child(
        &self,
        parent_id: Uuid,
        mut params: CreateMenuParams,
    ) -> Result<Menu, AppError> {
        params.parent_id = Some(parent_id);

        self.create(params).await
    }

    pub async fn get_paginated(
        &self,
        filter: MenuFilter,
        pagination: Pagination,
    ) -> Result<Paginated<Menu>, AppError> {
        let repo = MenuRepository::new(self.db);

        Ok(repo.get_paginated(filter, pagination).await?)
    }

    pub async fn update(&self, id: Uuid, params: UpdateMenuParams) -> Result<Menu, AppError> {
        let repo = MenuRepository::new(self.db);

        repo.update(id, params)
            .await?
            .ok_or_else(|| AppError::not_found(format!("menu {} not found", id)))
    }

    /// Activates or deactivates one entry. Children keep their own flag.
    pub async fn set_active(&self, id: Uuid, is_active: bool) -> Result<Menu, AppError> {
        let repo = MenuRepository::new(self.db);

        repo.set_flags(id, Some(is_active), None)
            .await?
            .ok_or_else(|| AppError::not_found(format!("menu {} not found", id)))
    }

    pub async fn set_visible(&self, id: Uuid, is_visible: bool) -> Result<Menu, AppError> {
        let repo = MenuRepository::new(self.db);

        repo.set_flags(id, None, Some(is_visible))
            .await?
            .ok_or_else(|| AppError::not_found(format!("menu {} not found", id)))
    }
}

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QuerySelect,
};
use uuid::Uuid;

use crate::server::{
    data::hierarchy::{live, ordered},
    model::{
        hierarchy::HierarchyModel,
        menu::{CreateMenuParams, Menu, MenuFilter, UpdateMenuParams},
        pagination::{Paginated, Pagination},
    },
};

pub struct MenuRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MenuRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: CreateMenuParams) -> Result<Menu, DbErr> {
        let now = Utc::now();
        let menu = entity::menu::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            parent_id: ActiveValue::Set(params.parent_id),
            name: ActiveValue::Set(params.name),
            url: ActiveValue::Set(params.url),
            icon: ActiveValue::Set(params.icon),
            target: ActiveValue::Set(params.target),
            is_active: ActiveValue::Set(params.is_active),
            is_visible: ActiveValue::Set(params.is_visible),
            record_ordering: ActiveValue::Set(params.record_ordering),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await?;

        Menu::from_entity(menu)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Menu>, DbErr> {
        live::<entity::menu::Entity>()
            .filter(entity::menu::Column::Id.eq(id))
            .one(self.db)
            .await?
            .map(Menu::from_entity)
            .transpose()
    }

    pub async fn get_paginated(
        &self,
        filter: MenuFilter,
        pagination: Pagination,
    ) -> Result<Paginated<Menu>, DbErr> {
        let mut select = live::<entity::menu::Entity>();
        if let Some(is_active) = filter.is_active {
            select = select.filter(entity::menu::Column::IsActive.eq(is_active));
        }

        let total = select.clone().count(self.db).await?;
        let items = ordered(select)
            .limit(pagination.limit)
            .offset(pagination.offset)
            .all(self.db)
            .await?
            .into_iter()
            .map(Menu::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated {
            items,
            total,
            pagination,
        })
    }

    pub async fn update(&self, id: Uuid, params: UpdateMenuParams) -> Result<Option<Menu>, DbErr> {
        let Some(existing) = live::<entity::menu::Entity>()
            .filter(entity::menu::Column::Id.eq(id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::menu::ActiveModel = existing.into();
        if let Some(name) = params.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(url) = params.url {
            active.url = ActiveValue::Set(Some(url));
        }
        if let Some(icon) = params.icon {
            active.icon = ActiveValue::Set(Some(icon));
        }
        if let Some(target) = params.target {
            active.target = ActiveValue::Set(Some(target));
        }
        if let Some(record_ordering) = params.record_ordering {
            active.record_ordering = ActiveValue::Set(record_ordering);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Menu::from_entity(active.update(self.db).await?).map(Some)
    }

    /// Sets the `is_active` and/or `is_visible` flags of one entry.
    pub async fn set_flags(
        &self,
        id: Uuid,
        is_active: Option<bool>,
        is_visible: Option<bool>,
    ) -> Result<Option<Menu>, DbErr> {
        let Some(existing) = live::<entity::menu::Entity>()
            .filter(entity::menu::Column::Id.eq(id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::menu::ActiveModel = existing.into();
        if let Some(is_active) = is_active {
            active.is_active = ActiveValue::Set(is_active);
        }
        if let Some(is_visible) = is_visible {
            active.is_visible = ActiveValue::Set(is_visible);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Menu::from_entity(active.update(self.db).await?).map(Some)
    }
}

//! Comment repository.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};
use uuid::Uuid;

use crate::server::model::{
    comment::{Comment, CommentStatus, CreateCommentParams},
    pagination::{Paginated, Pagination},
};

pub struct CommentRepository<'a> {
    db: &'a DatabaseConnection,
}

fn live() -> Select<entity::comment::Entity> {
    entity::prelude::Comment::find().filter(entity::comment::Column::DeletedAt.is_null())
}

impl<'a> CommentRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a comment in `pending` status.
    pub async fn create(&self, params: CreateCommentParams) -> Result<Comment, DbErr> {
        let now = Utc::now();
        let entity = entity::comment::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            post_id: ActiveValue::Set(params.post_id),
            author_id: ActiveValue::Set(params.author_id),
            parent_id: ActiveValue::Set(params.parent_id),
            content: ActiveValue::Set(params.content),
            status: ActiveValue::Set(CommentStatus::Pending.to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await?;

        Comment::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, DbErr> {
        live()
            .filter(entity::comment::Column::Id.eq(id))
            .one(self.db)
            .await?
            .map(Comment::from_entity)
            .transpose()
    }

    /// Comments on a post, oldest first.
    ///
    /// # Arguments
    /// - `status` - When set, only comments in this moderation status
    pub async fn get_by_post_paginated(
        &self,
        post_id: Uuid,
        status: Option<CommentStatus>,
        pagination: Pagination,
    ) -> Result<Paginated<Comment>, DbErr> {
        let mut select = live().filter(entity::comment::Column::PostId.eq(post_id));
        if let Some(status) = status {
            select = select.filter(entity::comment::Column::Status.eq(status.to_string()));
        }

        let total = select.clone().count(self.db).await?;
        let items = select
            .order_by_asc(entity::comment::Column::CreatedAt)
            .order_by_asc(entity::comment::Column::Id)
            .limit(pagination.limit)
            .offset(pagination.offset)
            .all(self.db)
            .await?
            .into_iter()
            .map(Comment::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated {
            items,
            total,
            pagination,
        })
    }

    pub async fn update_content(&self, id: Uuid, content: String) -> Result<Option<Comment>, DbErr> {
        let Some(existing) = live()
            .filter(entity::comment::Column::Id.eq(id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::comment::ActiveModel = existing.into();
        active.content = ActiveValue::Set(content);
        active.updated_at = ActiveValue::Set(Utc::now());

        Comment::from_entity(active.update(self.db).await?).map(Some)
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        status: CommentStatus,
    ) -> Result<Option<Comment>, DbErr> {
        let Some(existing) = live()
            .filter(entity::comment::Column::Id.eq(id))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::comment::ActiveModel = existing.into();
        active.status = ActiveValue::Set(status.to_string());
        active.updated_at = ActiveValue::Set(Utc::now());

        Comment::from_entity(active.update(self.db).await?).map(Some)
    }

    pub async fn soft_delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let now = Utc::now();
        let result = entity::prelude::Comment::update_many()
            .col_expr(entity::comment::Column::DeletedAt, Expr::value(Some(now)))
            .col_expr(entity::comment::Column::UpdatedAt, Expr::value(now))
            .filter(entity::comment::Column::Id.eq(id))
            .filter(entity::comment::Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

//! Post repository.
//!
//! Posts are returned with their tags attached. Tag links live in `post_tag` and are
//! replaced wholesale whenever a tag list is supplied.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, Query},
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, TransactionTrait,
};
use uuid::Uuid;

use crate::server::model::{
    pagination::{Paginated, Pagination},
    post::{CreatePostParams, Post, PostFilter, PostStatus, UpdatePostParams},
    tag::Tag,
};

pub struct PostRepository<'a> {
    db: &'a DatabaseConnection,
}

fn live() -> Select<entity::post::Entity> {
    entity::prelude::Post::find().filter(entity::post::Column::DeletedAt.is_null())
}

/// Loads tags for each post in one pair of queries.
async fn tags_by_post<C: ConnectionTrait>(
    db: &C,
    post_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<Tag>>, DbErr> {
    if post_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let links = entity::prelude::PostTag::find()
        .filter(entity::post_tag::Column::PostId.is_in(post_ids.iter().copied()))
        .all(db)
        .await?;
    if links.is_empty() {
        return Ok(HashMap::new());
    }

    let tags: HashMap<Uuid, Tag> = entity::prelude::Tag::find()
        .filter(entity::tag::Column::Id.is_in(links.iter().map(|l| l.tag_id)))
        .order_by_asc(entity::tag::Column::Name)
        .all(db)
        .await?
        .into_iter()
        .map(|t| (t.id, Tag::from_entity(t)))
        .collect();

    let mut grouped: HashMap<Uuid, Vec<Tag>> = HashMap::new();
    for link in links {
        if let Some(tag) = tags.get(&link.tag_id) {
            grouped.entry(link.post_id).or_default().push(tag.clone());
        }
    }
    for tags in grouped.values_mut() {
        tags.sort_by(|a, b| a.name.cmp(&b.name));
    }

    Ok(grouped)
}

async fn replace_tags<C: ConnectionTrait>(
    db: &C,
    post_id: Uuid,
    tag_ids: &[Uuid],
) -> Result<(), DbErr> {
    entity::prelude::PostTag::delete_many()
        .filter(entity::post_tag::Column::PostId.eq(post_id))
        .exec(db)
        .await?;

    let mut seen = Vec::with_capacity(tag_ids.len());
    for tag_id in tag_ids {
        if seen.contains(tag_id) {
            continue;
        }
        seen.push(*tag_id);

        entity::post_tag::ActiveModel {
            post_id: ActiveValue::Set(post_id),
            tag_id: ActiveValue::Set(*tag_id),
        }
        .insert(db)
        .await?;
    }

    Ok(())
}

async fn with_tags<C: ConnectionTrait>(
    db: &C,
    entities: Vec<entity::post::Model>,
) -> Result<Vec<Post>, DbErr> {
    let ids: Vec<Uuid> = entities.iter().map(|p| p.id).collect();
    let mut tags = tags_by_post(db, &ids).await?;

    entities
        .into_iter()
        .map(|p| {
            let post_tags = tags.remove(&p.id).unwrap_or_default();
            Post::from_entity(p, post_tags)
        })
        .collect()
}

async fn find_live<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<Option<Post>, DbErr> {
    let Some(entity) = live()
        .filter(entity::post::Column::Id.eq(id))
        .one(db)
        .await?
    else {
        return Ok(None);
    };

    Ok(with_tags(db, vec![entity]).await?.pop())
}

impl<'a> PostRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a draft post and links its tags in one transaction.
    ///
    /// Tag IDs must already be validated by the caller.
    pub async fn create(&self, params: CreatePostParams) -> Result<Post, DbErr> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let entity = entity::post::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            author_id: ActiveValue::Set(params.author_id),
            title: ActiveValue::Set(params.title),
            slug: ActiveValue::Set(params.slug),
            content: ActiveValue::Set(params.content),
            excerpt: ActiveValue::Set(params.excerpt),
            status: ActiveValue::Set(PostStatus::Draft.to_string()),
            published_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(&txn)
        .await?;
        replace_tags(&txn, entity.id, &params.tag_ids).await?;

        let post = find_live(&txn, entity.id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("post {}", entity.id)))?;
        txn.commit().await?;

        Ok(post)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DbErr> {
        find_live(self.db, id).await
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Post>, DbErr> {
        let Some(entity) = live()
            .filter(entity::post::Column::Slug.eq(slug))
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        Ok(with_tags(self.db, vec![entity]).await?.pop())
    }

    pub async fn slug_taken(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, DbErr> {
        let mut select = live().filter(entity::post::Column::Slug.eq(slug));
        if let Some(id) = exclude {
            select = select.filter(entity::post::Column::Id.ne(id));
        }

        Ok(select.count(self.db).await? > 0)
    }

    /// Gets paginated live posts, newest first.
    ///
    /// # Arguments
    /// - `filter` - Optional status, author and tag constraints, combined with AND
    /// - `pagination` - Limit and offset
    pub async fn get_paginated(
        &self,
        filter: PostFilter,
        pagination: Pagination,
    ) -> Result<Paginated<Post>, DbErr> {
        let mut select = live();
        if let Some(status) = filter.status {
            select = select.filter(entity::post::Column::Status.eq(status.to_string()));
        }
        if let Some(author_id) = filter.author_id {
            select = select.filter(entity::post::Column::AuthorId.eq(author_id));
        }
        if let Some(tag_id) = filter.tag_id {
            select = select.filter(
                entity::post::Column::Id.in_subquery(
                    Query::select()
                        .column(entity::post_tag::Column::PostId)
                        .from(entity::post_tag::Entity)
                        .and_where(entity::post_tag::Column::TagId.eq(tag_id))
                        .to_owned(),
                ),
            );
        }

        let total = select.clone().count(self.db).await?;
        let entities = select
            .order_by_desc(entity::post::Column::CreatedAt)
            .order_by_asc(entity::post::Column::Id)
            .limit(pagination.limit)
            .offset(pagination.offset)
            .all(self.db)
            .await?;
        let items = with_tags(self.db, entities).await?;

        Ok(Paginated {
            items,
            total,
            pagination,
        })
    }

    /// Applies changes and, when `tag_ids` is provided, replaces the tag links.
    ///
    /// `published_at` is stamped the first time a post becomes published.
    pub async fn update(&self, id: Uuid, params: UpdatePostParams) -> Result<Option<Post>, DbErr> {
        let txn = self.db.begin().await?;

        let Some(existing) = live()
            .filter(entity::post::Column::Id.eq(id))
            .one(&txn)
            .await?
        else {
            return Ok(None);
        };

        let already_published = existing.published_at.is_some();
        let mut active: entity::post::ActiveModel = existing.into();
        if let Some(title) = params.title {
            active.title = ActiveValue::Set(title);
        }
        if let Some(slug) = params.slug {
            active.slug = ActiveValue::Set(slug);
        }
        if let Some(content) = params.content {
            active.content = ActiveValue::Set(content);
        }
        if let Some(excerpt) = params.excerpt {
            active.excerpt = ActiveValue::Set(Some(excerpt));
        }
        if let Some(status) = params.status {
            if status == PostStatus::Published && !already_published {
                active.published_at = ActiveValue::Set(Some(Utc::now()));
            }
            active.status = ActiveValue::Set(status.to_string());
        }
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(&txn).await?;

        if let Some(tag_ids) = params.tag_ids {
            replace_tags(&txn, id, &tag_ids).await?;
        }

        let post = find_live(&txn, id).await?;
        txn.commit().await?;

        Ok(post)
    }

    /// # Returns
    /// - `Ok(true)` - Post marked deleted
    /// - `Ok(false)` - Post not found or already deleted
    pub async fn soft_delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let now = Utc::now();
        let result = entity::prelude::Post::update_many()
            .col_expr(entity::post::Column::DeletedAt, Expr::value(Some(now)))
            .col_expr(entity::post::Column::UpdatedAt, Expr::value(now))
            .filter(entity::post::Column::Id.eq(id))
            .filter(entity::post::Column::DeletedAt.is_null())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

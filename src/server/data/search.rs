//! SQL `LIKE` search used when no search engine is configured or the engine fails.

use sea_orm::{
    sea_query::Condition, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::server::model::search::{SearchHit, SearchKind, SearchQuery};

const SNIPPET_CHARS: usize = 160;

pub struct SearchRepository<'a> {
    db: &'a DatabaseConnection,
}

pub fn snippet(text: &str) -> String {
    match text.char_indices().nth(SNIPPET_CHARS) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

impl<'a> SearchRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Searches live rows of one kind, returning the requested page and the total match count.
    pub async fn search(
        &self,
        kind: SearchKind,
        query: &SearchQuery,
    ) -> Result<(Vec<SearchHit>, u64), DbErr> {
        let q = query.q.as_str();
        match kind {
            SearchKind::Users => {
                let select = entity::prelude::User::find()
                    .filter(entity::user::Column::DeletedAt.is_null())
                    .filter(
                        Condition::any()
                            .add(entity::user::Column::Username.contains(q))
                            .add(entity::user::Column::Email.contains(q))
                            .add(entity::user::Column::FullName.contains(q)),
                    )
                    .order_by_asc(entity::user::Column::Username);
                let (rows, total) = self.page(select, query).await?;
                let hits = rows
                    .into_iter()
                    .map(|u| SearchHit {
                        id: u.id,
                        kind,
                        title: u.username,
                        snippet: u.full_name,
                    })
                    .collect();
                Ok((hits, total))
            }
            SearchKind::Posts => {
                let select = entity::prelude::Post::find()
                    .filter(entity::post::Column::DeletedAt.is_null())
                    .filter(
                        Condition::any()
                            .add(entity::post::Column::Title.contains(q))
                            .add(entity::post::Column::Excerpt.contains(q))
                            .add(entity::post::Column::Content.contains(q)),
                    )
                    .order_by_desc(entity::post::Column::CreatedAt);
                let (rows, total) = self.page(select, query).await?;
                let hits = rows
                    .into_iter()
                    .map(|p| SearchHit {
                        id: p.id,
                        kind,
                        title: p.title,
                        snippet: Some(p.excerpt.unwrap_or_else(|| snippet(&p.content))),
                    })
                    .collect();
                Ok((hits, total))
            }
            SearchKind::Tags => {
                let select = entity::prelude::Tag::find()
                    .filter(
                        Condition::any()
                            .add(entity::tag::Column::Name.contains(q))
                            .add(entity::tag::Column::Slug.contains(q)),
                    )
                    .order_by_asc(entity::tag::Column::Name);
                let (rows, total) = self.page(select, query).await?;
                let hits = rows
                    .into_iter()
                    .map(|t| SearchHit {
                        id: t.id,
                        kind,
                        title: t.name,
                        snippet: Some(t.slug),
                    })
                    .collect();
                Ok((hits, total))
            }
            SearchKind::Taxonomies => {
                let select = entity::prelude::Taxonomy::find()
                    .filter(entity::taxonomy::Column::DeletedAt.is_null())
                    .filter(
                        Condition::any()
                            .add(entity::taxonomy::Column::Name.contains(q))
                            .add(entity::taxonomy::Column::Slug.contains(q))
                            .add(entity::taxonomy::Column::Description.contains(q)),
                    )
                    .order_by_asc(entity::taxonomy::Column::Name);
                let (rows, total) = self.page(select, query).await?;
                let hits = rows
                    .into_iter()
                    .map(|t| SearchHit {
                        id: t.id,
                        kind,
                        title: t.name,
                        snippet: t.description.as_deref().map(snippet),
                    })
                    .collect();
                Ok((hits, total))
            }
            SearchKind::Menus => {
                let select = entity::prelude::Menu::find()
                    .filter(entity::menu::Column::DeletedAt.is_null())
                    .filter(
                        Condition::any()
                            .add(entity::menu::Column::Name.contains(q))
                            .add(entity::menu::Column::Url.contains(q)),
                    )
                    .order_by_asc(entity::menu::Column::Name);
                let (rows, total) = self.page(select, query).await?;
                let hits = rows
                    .into_iter()
                    .map(|m| SearchHit {
                        id: m.id,
                        kind,
                        title: m.name,
                        snippet: m.url,
                    })
                    .collect();
                Ok((hits, total))
            }
            SearchKind::Organizations => {
                let select = entity::prelude::Organization::find()
                    .filter(entity::organization::Column::DeletedAt.is_null())
                    .filter(
                        Condition::any()
                            .add(entity::organization::Column::Name.contains(q))
                            .add(entity::organization::Column::Slug.contains(q))
                            .add(entity::organization::Column::Description.contains(q)),
                    )
                    .order_by_asc(entity::organization::Column::Name);
                let (rows, total) = self.page(select, query).await?;
                let hits = rows
                    .into_iter()
                    .map(|o| SearchHit {
                        id: o.id,
                        kind,
                        title: o.name,
                        snippet: o.description.as_deref().map(snippet),
                    })
                    .collect();
                Ok((hits, total))
            }
        }
    }

    async fn page<E: EntityTrait>(
        &self,
        select: Select<E>,
        query: &SearchQuery,
    ) -> Result<(Vec<E::Model>, u64), DbErr>
    where
        E::Model: Sync,
    {
        let total = select.clone().count(self.db).await?;
        let rows = select
            .limit(query.page_size)
            .offset(query.offset())
            .all(self.db)
            .await?;

        Ok((rows, total))
    }
}

#[cfg(test)]
mod tests {
    use super::snippet;

    #[test]
    fn snippet_truncates_long_text_on_char_boundary() {
        let text = "é".repeat(200);
        let result = snippet(&text);
        assert_eq!(result.chars().count(), 163);
        assert!(result.ends_with("..."));
        assert_eq!(snippet("short"), "short");
    }
}

//! Hybrid search: the configured engine first, SQL `LIKE` as the fallback.

pub mod engine;

use futures::future::join_all;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::search::SearchRepository,
    error::AppError,
    model::search::{
        SearchFanOut, SearchKind, SearchPage, SearchQuery, SearchSource, FAN_OUT_PAGE_SIZE,
    },
};

use self::engine::SearchEngine;

pub struct SearchService<'a> {
    db: &'a DatabaseConnection,
    engine: Option<&'a dyn SearchEngine>,
}

impl<'a> SearchService<'a> {
    pub fn new(db: &'a DatabaseConnection, engine: Option<&'a dyn SearchEngine>) -> Self {
        Self { db, engine }
    }

    /// Searches one entity type.
    ///
    /// An engine failure is logged and answered from the database instead; only a database
    /// failure surfaces as an error.
    pub async fn search(
        &self,
        kind: SearchKind,
        query: &SearchQuery,
    ) -> Result<SearchPage, AppError> {
        if let Some(engine) = self.engine {
            match engine.search(kind, query).await {
                Ok((hits, total)) => {
                    return Ok(SearchPage {
                        kind,
                        source: SearchSource::Engine,
                        hits,
                        total,
                        page: query.page,
                        page_size: query.page_size,
                    })
                }
                Err(e) => {
                    tracing::warn!("Search engine failed for {}, using database: {}", kind, e);
                }
            }
        }

        let (hits, total) = SearchRepository::new(self.db).search(kind, query).await?;

        Ok(SearchPage {
            kind,
            source: SearchSource::Database,
            hits,
            total,
            page: query.page,
            page_size: query.page_size,
        })
    }

    /// Searches every type concurrently with a small page each.
    ///
    /// A type that fails is reported in `statuses` and contributes no hits.
    pub async fn search_all(&self, query: &SearchQuery) -> SearchFanOut {
        let query = query.with_page_size(FAN_OUT_PAGE_SIZE);
        let query = &query;

        let outcomes = join_all(
            SearchKind::ALL
                .into_iter()
                .map(|kind| async move { (kind, self.search(kind, query).await) }),
        )
        .await;

        let mut fan_out = SearchFanOut::default();
        for (kind, outcome) in outcomes {
            match outcome {
                Ok(page) => {
                    fan_out.results.insert(kind, page.hits);
                    fan_out.statuses.insert(kind, true);
                }
                Err(e) => {
                    tracing::error!("Search for {} failed: {}", kind, e);
                    fan_out.results.insert(kind, Vec::new());
                    fan_out.statuses.insert(kind, false);
                }
            }
        }

        fan_out
    }
}

use super::*;
use crate::server::{
    error::search::SearchError,
    model::search::{SearchHit, SearchKind, SearchQuery, SearchSource},
    service::search::{engine::SearchEngine, SearchService},
};
use async_trait::async_trait;

mod fallback;

/// Engine double that either fails every call or returns one fixed hit.
struct StubEngine {
    fail: bool,
}

#[async_trait]
impl SearchEngine for StubEngine {
    async fn search(
        &self,
        kind: SearchKind,
        _query: &SearchQuery,
    ) -> Result<(Vec<SearchHit>, u64), SearchError> {
        if self.fail {
            return Err(SearchError::Malformed("engine down".to_string()));
        }

        Ok((
            vec![SearchHit {
                id: uuid::Uuid::nil(),
                kind,
                title: "from engine".to_string(),
                snippet: None,
            }],
            1,
        ))
    }

    async fn health(&self) -> Result<(), SearchError> {
        Ok(())
    }
}

//! External full-text search engine client.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use uuid::Uuid;

use crate::server::{
    data::search::snippet,
    error::search::SearchError,
    model::search::{SearchHit, SearchKind, SearchQuery},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Fields tried in order for the hit title and snippet.
const TITLE_FIELDS: &[&str] = &["title", "name", "username"];
const SNIPPET_FIELDS: &[&str] = &["excerpt", "description", "content", "full_name"];

#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// Searches the index for `kind`, returning one page of hits and the estimated total.
    async fn search(
        &self,
        kind: SearchKind,
        query: &SearchQuery,
    ) -> Result<(Vec<SearchHit>, u64), SearchError>;

    async fn health(&self) -> Result<(), SearchError>;
}

/// Meilisearch over HTTP. Each `SearchKind` maps to an index of the same name.
pub struct MeilisearchEngine {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    hits: Vec<Map<String, Value>>,
    estimated_total_hits: Option<u64>,
    total_hits: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

impl MeilisearchEngine {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SearchError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(SearchError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl SearchEngine for MeilisearchEngine {
    async fn search(
        &self,
        kind: SearchKind,
        query: &SearchQuery,
    ) -> Result<(Vec<SearchHit>, u64), SearchError> {
        let url = format!("{}/indexes/{}/search", self.base_url, kind);
        let body = json!({
            "q": query.q,
            "limit": query.page_size,
            "offset": query.offset(),
        });

        let response = self
            .authorize(self.client.post(&url).json(&body))
            .send()
            .await?;
        let response: SearchResponse = Self::check_status(response).await?.json().await?;

        let total = response
            .total_hits
            .or(response.estimated_total_hits)
            .unwrap_or(response.hits.len() as u64);
        let hits = response
            .hits
            .iter()
            .map(|document| parse_hit(kind, document))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((hits, total))
    }

    async fn health(&self) -> Result<(), SearchError> {
        let url = format!("{}/health", self.base_url);

        let response = self.authorize(self.client.get(&url)).send().await?;
        let health: HealthResponse = Self::check_status(response).await?.json().await?;

        if health.status != "available" {
            return Err(SearchError::Malformed(format!(
                "engine reported status '{}'",
                health.status
            )));
        }

        Ok(())
    }
}

fn parse_hit(kind: SearchKind, document: &Map<String, Value>) -> Result<SearchHit, SearchError> {
    let id = document
        .get("id")
        .and_then(Value::as_str)
        .and_then(|id| Uuid::parse_str(id).ok())
        .ok_or_else(|| SearchError::Malformed("hit without a UUID id".to_string()))?;

    let first_text = |fields: &[&str]| {
        fields
            .iter()
            .find_map(|field| document.get(*field).and_then(Value::as_str))
            .map(str::to_string)
    };

    Ok(SearchHit {
        id,
        kind,
        title: first_text(TITLE_FIELDS).unwrap_or_default(),
        snippet: first_text(SNIPPET_FIELDS).map(|text| snippet(&text)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn picks_title_and_snippet_fields_in_order() {
        let id = Uuid::new_v4();
        let hit = parse_hit(
            SearchKind::Posts,
            &document(json!({ "id": id.to_string(), "title": "Hello", "content": "Body" })),
        )
        .unwrap();

        assert_eq!(hit.id, id);
        assert_eq!(hit.title, "Hello");
        assert_eq!(hit.snippet.as_deref(), Some("Body"));
    }

    #[test]
    fn hit_without_uuid_is_malformed() {
        let result = parse_hit(SearchKind::Tags, &document(json!({ "id": 7, "name": "x" })));

        assert!(matches!(result, Err(SearchError::Malformed(_))));
    }
}

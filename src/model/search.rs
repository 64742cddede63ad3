use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::api::PageDto;

/// A single search match, shaped the same for every entity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchHitDto {
    pub id: Uuid,
    /// Entity type the hit belongs to, e.g. `posts`.
    pub kind: String,
    pub title: String,
    pub snippet: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchResultDto {
    pub query: String,
    pub kind: String,
    /// `engine` or `database`.
    pub source: String,
    pub hits: Vec<SearchHitDto>,
    pub page: PageDto,
}

/// Fan-out result for `type=all`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchAllDto {
    pub query: String,
    pub results: BTreeMap<String, Vec<SearchHitDto>>,
    /// Per-type outcome, `succeeded` or `failed`.
    pub statuses: BTreeMap<String, String>,
}

//! Search request and result models.

use std::{collections::BTreeMap, fmt, str::FromStr};

use uuid::Uuid;

use crate::{
    model::{
        api::PageDto,
        search::{SearchAllDto, SearchHitDto, SearchResultDto},
    },
    server::{error::AppError, model::pagination::MAX_OFFSET},
};

/// Page size used per type when fanning out a `type=all` search.
pub const FAN_OUT_PAGE_SIZE: u64 = 5;
pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

/// Searchable entity types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SearchKind {
    Users,
    Posts,
    Tags,
    Taxonomies,
    Menus,
    Organizations,
}

impl SearchKind {
    pub const ALL: [SearchKind; 6] = [
        Self::Users,
        Self::Posts,
        Self::Tags,
        Self::Taxonomies,
        Self::Menus,
        Self::Organizations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Posts => "posts",
            Self::Tags => "tags",
            Self::Taxonomies => "taxonomies",
            Self::Menus => "menus",
            Self::Organizations => "organizations",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested scope: one type or every type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    One(SearchKind),
    All,
}

impl FromStr for SearchScope {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        if s == "all" {
            return Ok(Self::All);
        }
        SearchKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .map(Self::One)
            .ok_or_else(|| {
                AppError::validation(format!(
                    "Invalid search type '{}', expected users, posts, tags, taxonomies, menus, organizations or all",
                    s
                ))
            })
    }
}

/// Where a result page came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSource {
    Engine,
    Database,
}

impl SearchSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Engine => "engine",
            Self::Database => "database",
        }
    }
}

/// Validated search query.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub q: String,
    pub page: u64,
    pub page_size: u64,
}

impl SearchQuery {
    /// # Returns
    /// - `Err(AppError::Validation)` - Query is blank
    pub fn new(q: &str, page: Option<u64>, page_size: Option<u64>) -> Result<Self, AppError> {
        let q = q.trim();
        if q.is_empty() {
            return Err(AppError::validation("Search query 'q' is required"));
        }

        Ok(Self {
            q: q.to_string(),
            page: page.unwrap_or(1).max(1),
            page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        })
    }

    /// Rows to skip, capped at `MAX_OFFSET` for pages beyond any real result set.
    pub fn offset(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.page_size)
            .min(MAX_OFFSET)
    }

    pub fn with_page_size(&self, page_size: u64) -> Self {
        Self {
            q: self.q.clone(),
            page: 1,
            page_size,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: Uuid,
    pub kind: SearchKind,
    pub title: String,
    pub snippet: Option<String>,
}

impl SearchHit {
    pub fn into_dto(self) -> SearchHitDto {
        SearchHitDto {
            id: self.id,
            kind: self.kind.to_string(),
            title: self.title,
            snippet: self.snippet,
        }
    }
}

/// One page of hits for a single type.
#[derive(Debug, Clone)]
pub struct SearchPage {
    pub kind: SearchKind,
    pub source: SearchSource,
    pub hits: Vec<SearchHit>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

impl SearchPage {
    pub fn into_dto(self, query: String) -> SearchResultDto {
        SearchResultDto {
            query,
            kind: self.kind.to_string(),
            source: self.source.as_str().to_string(),
            hits: self.hits.into_iter().map(SearchHit::into_dto).collect(),
            page: PageDto {
                page: self.page,
                page_size: self.page_size,
                total: self.total,
            },
        }
    }
}

/// Outcome of a `type=all` search. A failed type has an empty hit list.
#[derive(Debug, Clone, Default)]
pub struct SearchFanOut {
    pub results: BTreeMap<SearchKind, Vec<SearchHit>>,
    pub statuses: BTreeMap<SearchKind, bool>,
}

impl SearchFanOut {
    pub fn into_dto(self, query: String) -> SearchAllDto {
        SearchAllDto {
            query,
            results: self
                .results
                .into_iter()
                .map(|(kind, hits)| {
                    (
                        kind.to_string(),
                        hits.into_iter().map(SearchHit::into_dto).collect(),
                    )
                })
                .collect(),
            statuses: self
                .statuses
                .into_iter()
                .map(|(kind, ok)| {
                    let status = if ok { "succeeded" } else { "failed" };
                    (kind.to_string(), status.to_string())
                })
                .collect(),
        }
    }
}

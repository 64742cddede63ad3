//! HTTP request handlers.
//!
//! Each module owns one resource: it parses path, query and body input, checks access
//! with `AuthGuard`, calls exactly one service operation and wraps the result in the
//! shared `ApiResponse` envelope. Handlers never branch on error content; `AppError`
//! decides the status code.

pub mod address;
pub mod auth;
pub mod backup;
pub mod comment;
pub mod health;
pub mod hierarchy;
pub mod job;
pub mod media;
pub mod menu;
pub mod notification;
pub mod organization;
pub mod post;
pub mod rbac;
pub mod role;
pub mod search;
pub mod tag;
pub mod taxonomy;
pub mod user;

use serde::Deserialize;
use utoipa::IntoParams;

use crate::server::model::pagination::Pagination;

/// `limit`/`offset` query parameters shared by list endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page size, default 10, clamped to 1..=100.
    pub limit: Option<u64>,
    /// Number of items to skip, default 0.
    pub offset: Option<u64>,
}

impl PaginationParams {
    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.limit, self.offset)
    }
}

#[cfg(test)]
mod test;

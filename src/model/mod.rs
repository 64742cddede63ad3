//! Wire-format data transfer objects.
//!
//! Every request body and response payload exchanged over HTTP is defined here. Types
//! derive `serde` for JSON and `utoipa::ToSchema` for the generated OpenAPI document.
//! Server-side domain models live in `server::model` and convert into these at the
//! controller boundary.

pub mod address;
pub mod api;
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

//! Database repository layer for all domain entities.
//!
//! Repositories perform the queries, inserts, updates and deletes for each domain. They
//! use SeaORM entity models internally, return domain models from `server::model`, and
//! surface failures as `sea_orm::DbErr`. Soft-deleted rows are filtered out here so no
//! caller above this layer has to remember `deleted_at`.

pub mod address;
pub mod comment;
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

#[cfg(test)]
mod test;

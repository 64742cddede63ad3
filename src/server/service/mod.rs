//! Service layer for business logic and orchestration.
//!
//! Services sit between the controllers and the repositories in `data/`. They enforce
//! business rules (validation, uniqueness, hierarchy legality, ownership), coordinate
//! several repositories or external clients, and translate missing rows and rule
//! violations into tagged `AppError` variants. They work with domain models only; DTO
//! conversion happens in the controllers.

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
pub mod storage;
pub mod tag;
pub mod taxonomy;
pub mod user;

#[cfg(test)]
mod test;

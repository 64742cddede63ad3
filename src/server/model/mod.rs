//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer, representing
//! business entities and operation parameters. Domain models are converted from entity
//! models at the repository boundary and transformed to DTOs at the controller boundary.
//! They provide type-safe representations with business logic separated from database
//! and API concerns.

pub mod address;
pub mod backup;
pub mod comment;
pub mod health;
pub mod hierarchy;
pub mod job;
pub mod media;
pub mod menu;
pub mod notification;
pub mod organization;
pub mod pagination;
pub mod post;
pub mod rbac;
pub mod role;
pub mod search;
pub mod tag;
pub mod taxonomy;
pub mod user;

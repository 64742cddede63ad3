//! Server-side API backend and business logic.
//!
//! This module contains the complete backend: API endpoints, business logic, data
//! access and infrastructure services. It uses Axum as the web framework and SeaORM for
//! database operations.
//!
//! # Architecture
//!
//! The server follows a layered architecture:
//!
//! - **Controller Layer** (`controller/`) - HTTP request handlers, access control, and DTO conversion
//! - **Service Layer** (`service/`) - Business logic orchestration between controllers and data layer
//! - **Data Layer** (`data/`) - Database operations and entity-to-domain model conversion
//! - **Model Layer** (`model/`) - Domain models and operation-specific parameter types
//! - **Error Layer** (`error/`) - Application error types and HTTP response mapping
//! - **Middleware** (`middleware/`) - Bearer token authentication and permission guards
//!
//! # Infrastructure
//!
//! - **Configuration** (`config`) - Environment-based application configuration
//! - **State** (`state`) - Shared application state (DB, storage, search engine)
//! - **Startup** (`startup`) - Logging, database, RBAC seed and client initialization
//! - **Router** (`router`) - Axum route configuration and API documentation
//! - **Scheduler** (`scheduler/`) - Cron jobs for the job worker and backup cleanup
//!
//! # Request Flow
//!
//! 1. **Router** receives the HTTP request and routes it to a controller
//! 2. **Middleware** resolves the bearer token into an `AuthUser`
//! 3. **Controller** checks permissions, converts DTOs to params, calls a service
//! 4. **Service** executes business logic and orchestrates data operations
//! 5. **Data** queries the database and converts entities to domain models
//! 6. **Controller** converts the domain model to a DTO inside the response envelope

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod state;
pub mod util;

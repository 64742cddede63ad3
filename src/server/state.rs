//! Application state shared across all request handlers.
//!
//! `AppState` is built once during startup and cloned into every handler through Axum's
//! state extraction. It holds:
//! - Database connection pool for data persistence
//! - Configuration loaded from the environment
//! - Storage client for uploaded media
//! - Optional search engine client for hybrid search

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config,
    service::{search::engine::SearchEngine, storage::StorageClient},
};

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone: `DatabaseConnection` is a pool handle and the rest are
/// reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for accessing persistent storage.
    pub db: DatabaseConnection,

    /// Configuration, read-only after startup.
    pub config: Arc<Config>,

    /// Object storage backing media uploads.
    pub storage: Arc<dyn StorageClient>,

    /// Search engine client, present only when `SEARCH_ENGINE_URL` is configured.
    pub search_engine: Option<Arc<dyn SearchEngine>>,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `config` - Application configuration
    /// - `storage` - Storage client for media objects
    /// - `search_engine` - Optional search engine client
    pub fn new(
        db: DatabaseConnection,
        config: Config,
        storage: Arc<dyn StorageClient>,
        search_engine: Option<Arc<dyn SearchEngine>>,
    ) -> Self {
        Self {
            db,
            config: Arc::new(config),
            storage,
            search_engine,
        }
    }
}

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::server::{
    config::Config,
    error::AppError,
    service::{
        rbac::RbacService,
        search::engine::{MeilisearchEngine, SearchEngine},
        storage::{LocalStorage, StorageClient},
    },
};

/// Initializes the global tracing subscriber.
///
/// `RUST_LOG` sets the filter (default `info`). `LOG_FORMAT=json` switches to JSON lines
/// for log aggregation; anything else gives human-readable output.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        registry
            .with(fmt::layer().json().flatten_event(true).with_target(true))
            .init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}

/// Connects to the database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then runs
/// all pending SeaORM migrations so the schema is up to date before any request is served.
/// For SQLite, `?mode=rwc` in the URL creates the file when it does not exist.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError::DbErr)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Ensures the `admin` role and its wildcard policy exist.
pub async fn seed_rbac(db: &DatabaseConnection) -> Result<(), AppError> {
    RbacService::new(db).seed().await?;

    Ok(())
}

/// Creates the storage directories and the local media storage client.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn StorageClient>, AppError> {
    tokio::fs::create_dir_all(&config.storage_dir).await?;
    tokio::fs::create_dir_all(&config.backup_dir).await?;

    Ok(Arc::new(LocalStorage::new(config.storage_dir.clone())))
}

/// Builds the search engine client when `SEARCH_ENGINE_URL` is configured.
pub fn setup_search_engine(config: &Config) -> Result<Option<Arc<dyn SearchEngine>>, AppError> {
    let Some(url) = config.search_engine_url.as_deref() else {
        tracing::info!("No search engine configured, searching the database only");
        return Ok(None);
    };

    let engine = MeilisearchEngine::new(url, config.search_engine_api_key.clone())?;
    tracing::info!("Search engine configured at {}", url);

    Ok(Some(Arc::new(engine)))
}

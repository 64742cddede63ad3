mod model;
mod server;

use tokio::net::TcpListener;

use crate::server::{
    config::Config, error::AppError, scheduler::maintenance, startup, state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_logging();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;
    startup::seed_rbac(&db).await?;
    let storage = startup::setup_storage(&config).await?;
    let search_engine = startup::setup_search_engine(&config)?;

    let bind_addr = config.bind_addr.clone();
    let state = AppState::new(db.clone(), config, storage, search_engine);

    let _scheduler = maintenance::start_scheduler(db, state.config.clone()).await?;

    let app = server::router::router(state);

    let listener = TcpListener::bind(bind_addr.as_str()).await?;
    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

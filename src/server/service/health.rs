//! Dependency health probes.

use std::{future::Future, time::Duration};

use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio::time::Instant;

use crate::server::{
    model::health::{HealthReport, ServiceHealth},
    service::{rbac::RbacService, search::engine::SearchEngine, storage::StorageClient},
};

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HealthService<'a> {
    db: &'a DatabaseConnection,
    storage: &'a dyn StorageClient,
    search_engine: Option<&'a dyn SearchEngine>,
}

impl<'a> HealthService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        storage: &'a dyn StorageClient,
        search_engine: Option<&'a dyn SearchEngine>,
    ) -> Self {
        Self {
            db,
            storage,
            search_engine,
        }
    }

    /// Runs every probe concurrently, each bounded by a 10 second timeout.
    ///
    /// The search engine is only probed when one is configured.
    pub async fn check(&self) -> HealthReport {
        let database = probe("database", async {
            self.db.ping().await.map_err(|e| e.to_string())
        });
        let storage = probe("storage", async {
            self.storage.probe().await.map_err(|e| e.to_string())
        });
        let rbac = probe("rbac", async {
            match RbacService::new(self.db).admin_policy_present().await {
                Ok(true) => Ok(()),
                Ok(false) => Err("admin policy missing".to_string()),
                Err(e) => Err(e.to_string()),
            }
        });
        let search_engine = async {
            match self.search_engine {
                Some(engine) => Some(
                    probe("search_engine", async {
                        engine.health().await.map_err(|e| e.to_string())
                    })
                    .await,
                ),
                None => None,
            }
        };

        let (database, storage, rbac, search_engine) =
            tokio::join!(database, storage, rbac, search_engine);

        let mut services = vec![database, storage, rbac];
        services.extend(search_engine);

        HealthReport {
            timestamp: Utc::now(),
            services,
        }
    }
}

async fn probe<F>(name: &'static str, check: F) -> ServiceHealth
where
    F: Future<Output = Result<(), String>>,
{
    let started = Instant::now();
    let outcome = tokio::time::timeout(PROBE_TIMEOUT, check).await;
    let duration_ms = started.elapsed().as_millis() as u64;

    let (up, message) = match outcome {
        Ok(Ok(())) => (true, None),
        Ok(Err(e)) => {
            tracing::warn!("Health probe {} failed: {}", name, e);
            (false, Some(e))
        }
        Err(_) => {
            tracing::warn!("Health probe {} timed out", name);
            (false, Some("timed out".to_string()))
        }
    };

    ServiceHealth {
        name,
        up,
        message,
        duration_ms,
    }
}

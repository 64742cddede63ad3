use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{
    config::Config,
    error::AppError,
    service::{backup::BackupService, job::JobWorker},
};

/// Every 30 seconds.
const JOB_WORKER_SCHEDULE: &str = "*/30 * * * * *";
/// Daily at 03:00.
const BACKUP_CLEANUP_SCHEDULE: &str = "0 0 3 * * *";

/// Starts the maintenance scheduler
///
/// Registers two jobs:
/// - the job queue worker, which claims and runs due jobs (skipped when
///   `JOB_WORKER_ENABLED` is false)
/// - backup cleanup, which removes backups older than the retention window
///
/// The returned scheduler must be kept alive for the jobs to keep running.
///
/// # Arguments
/// - `db`: Database connection
/// - `config`: Application configuration
pub async fn start_scheduler(
    db: DatabaseConnection,
    config: Arc<Config>,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    if config.job_worker_enabled {
        let job_db = db.clone();
        let job_config = config.clone();

        let job = Job::new_async(JOB_WORKER_SCHEDULE, move |_uuid, _lock| {
            let db = job_db.clone();
            let config = job_config.clone();

            Box::pin(async move {
                match JobWorker::new(&db, &config).run_due().await {
                    Ok(0) => {}
                    Ok(claimed) => tracing::debug!("Job worker processed {} jobs", claimed),
                    Err(e) => tracing::error!("Error running due jobs: {}", e),
                }
            })
        })?;

        scheduler.add(job).await?;
    } else {
        tracing::info!("Job worker disabled");
    }

    let cleanup_db = db.clone();
    let cleanup_config = config.clone();

    let job = Job::new_async(BACKUP_CLEANUP_SCHEDULE, move |_uuid, _lock| {
        let db = cleanup_db.clone();
        let config = cleanup_config.clone();

        Box::pin(async move {
            let service =
                BackupService::new(&db, &config.backup_dir, config.backup_retention_days);

            if let Err(e) = service.cleanup().await {
                tracing::error!("Error cleaning up backups: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Maintenance scheduler started");

    Ok(scheduler)
}

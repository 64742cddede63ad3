//! Persistent background jobs: queue management and the worker that runs them.

use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::server::{
    config::Config,
    data::job::JobRepository,
    error::AppError,
    model::{
        job::{EnqueueJobParams, Job, JobKind, JobStatus},
        pagination::{Paginated, Pagination},
    },
    service::{backup::BackupService, notification::NotificationService},
};

/// Jobs claimed per worker tick.
const CLAIM_BATCH: u64 = 10;
/// A `running` job older than this is assumed abandoned. Longer than the backup timeout.
const JOB_LEASE_MINUTES: i64 = 60;

pub struct JobService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> JobService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn enqueue(&self, params: EnqueueJobParams) -> Result<Job, AppError> {
        let job = JobRepository::new(self.db).enqueue(params).await?;

        tracing::info!("Enqueued job {} ({})", job.id, job.job_type);

        Ok(job)
    }

    pub async fn get(&self, id: Uuid) -> Result<Job, AppError> {
        JobRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("job {} not found", id)))
    }

    pub async fn get_paginated(
        &self,
        status: Option<JobStatus>,
        pagination: Pagination,
    ) -> Result<Paginated<Job>, AppError> {
        Ok(JobRepository::new(self.db)
            .get_paginated(status, pagination)
            .await?)
    }

    /// Requeues a failed or cancelled job with a fresh attempt budget.
    ///
    /// # Returns
    /// - `Err(AppError::Conflict)` - Job is in any other state
    pub async fn retry(&self, id: Uuid) -> Result<Job, AppError> {
        self.transition(id, &[JobStatus::Failed, JobStatus::Cancelled], JobStatus::Pending)
            .await
    }

    /// Cancels a job that has not started yet.
    ///
    /// # Returns
    /// - `Err(AppError::Conflict)` - Job is not pending
    pub async fn cancel(&self, id: Uuid) -> Result<Job, AppError> {
        self.transition(id, &[JobStatus::Pending], JobStatus::Cancelled)
            .await
    }

    pub async fn stats(&self) -> Result<BTreeMap<JobStatus, u64>, AppError> {
        Ok(JobRepository::new(self.db).stats().await?)
    }

    async fn transition(
        &self,
        id: Uuid,
        from: &[JobStatus],
        to: JobStatus,
    ) -> Result<Job, AppError> {
        let current = self.get(id).await?;

        JobRepository::new(self.db)
            .transition(id, from, to)
            .await?
            .ok_or_else(|| {
                AppError::conflict(format!(
                    "job {} is {} and cannot become {}",
                    id, current.status, to
                ))
            })
    }
}

/// Claims due jobs and runs their handlers.
pub struct JobWorker<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
}

impl<'a> JobWorker<'a> {
    pub fn new(db: &'a DatabaseConnection, config: &'a Config) -> Self {
        Self { db, config }
    }

    /// Runs one batch of due jobs, returning how many were claimed.
    ///
    /// Abandoned `running` jobs are reclaimed first. A handler error marks the job failed;
    /// it is retried later while attempts remain. Bookkeeping errors for one job are
    /// logged and the batch continues; the lease picks that job up on a later tick.
    pub async fn run_due(&self) -> Result<usize, AppError> {
        let repo = JobRepository::new(self.db);
        let now = Utc::now();

        let reclaimed = repo
            .reclaim_stale(now - Duration::minutes(JOB_LEASE_MINUTES), "job lease expired")
            .await?;
        if reclaimed > 0 {
            tracing::warn!("Reclaimed {} abandoned jobs", reclaimed);
        }

        let jobs = repo.claim_due(now, CLAIM_BATCH).await?;

        for job in &jobs {
            match self.execute(job).await {
                Ok(()) => match repo.mark_completed(job.id).await {
                    Ok(()) => tracing::info!("Job {} ({}) completed", job.id, job.job_type),
                    Err(e) => tracing::error!(
                        "Job {} ({}) completed but could not be recorded: {}",
                        job.id,
                        job.job_type,
                        e
                    ),
                },
                Err(e) => match repo.mark_failed(job.id, &e.to_string()).await {
                    Ok(status) => tracing::warn!(
                        "Job {} ({}) failed on attempt {}: {}; now {:?}",
                        job.id,
                        job.job_type,
                        job.attempts,
                        e,
                        status
                    ),
                    Err(db_err) => tracing::error!(
                        "Job {} ({}) failed with {} and could not be recorded: {}",
                        job.id,
                        job.job_type,
                        e,
                        db_err
                    ),
                },
            }
        }

        Ok(jobs.len())
    }

    async fn execute(&self, job: &Job) -> Result<(), AppError> {
        let backups = || {
            BackupService::new(
                self.db,
                &self.config.backup_dir,
                self.config.backup_retention_days,
            )
        };

        match job.job_type.parse::<JobKind>()? {
            JobKind::BackupCreate => {
                backups().create().await?;
            }
            JobKind::BackupCleanup => {
                backups().cleanup().await?;
            }
            JobKind::NotificationsPurge => {
                NotificationService::new(self.db).purge_read().await?;
            }
        }

        Ok(())
    }
}

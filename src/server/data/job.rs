//! Background job queue persisted in the `job` table.
//!
//! Claiming is a conditional update from `pending` to `running`, so two workers polling
//! at once never run the same job twice.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::server::model::{
    job::{EnqueueJobParams, Job, JobStatus},
    pagination::{Paginated, Pagination},
};

/// Delay before a failed job becomes due again, multiplied by the attempt count.
const RETRY_BACKOFF_SECONDS: i64 = 60;

pub struct JobRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> JobRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn enqueue(&self, params: EnqueueJobParams) -> Result<Job, DbErr> {
        let now = Utc::now();
        let entity = entity::job::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            job_type: ActiveValue::Set(params.kind.as_str().to_string()),
            payload: ActiveValue::Set(params.payload),
            status: ActiveValue::Set(JobStatus::Pending.to_string()),
            attempts: ActiveValue::Set(0),
            max_attempts: ActiveValue::Set(params.max_attempts),
            last_error: ActiveValue::Set(None),
            run_at: ActiveValue::Set(params.run_at),
            started_at: ActiveValue::Set(None),
            finished_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
        }
        .insert(self.db)
        .await?;

        Job::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Job>, DbErr> {
        entity::prelude::Job::find_by_id(id)
            .one(self.db)
            .await?
            .map(Job::from_entity)
            .transpose()
    }

    /// Newest jobs first, optionally filtered by status.
    pub async fn get_paginated(
        &self,
        status: Option<JobStatus>,
        pagination: Pagination,
    ) -> Result<Paginated<Job>, DbErr> {
        let mut select = entity::prelude::Job::find();
        if let Some(status) = status {
            select = select.filter(entity::job::Column::Status.eq(status.as_str()));
        }

        let total = select.clone().count(self.db).await?;
        let items = select
            .order_by_desc(entity::job::Column::CreatedAt)
            .order_by_asc(entity::job::Column::Id)
            .limit(pagination.limit)
            .offset(pagination.offset)
            .all(self.db)
            .await?
            .into_iter()
            .map(Job::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated {
            items,
            total,
            pagination,
        })
    }

    /// Claims up to `limit` pending jobs whose `run_at` has passed.
    ///
    /// Each claimed job is moved to `running`, its attempt counter incremented and
    /// `started_at` stamped. Jobs claimed concurrently by another worker are skipped.
    pub async fn claim_due(&self, now: DateTime<Utc>, limit: u64) -> Result<Vec<Job>, DbErr> {
        let candidates = entity::prelude::Job::find()
            .filter(entity::job::Column::Status.eq(JobStatus::Pending.as_str()))
            .filter(entity::job::Column::RunAt.lte(now))
            .order_by_asc(entity::job::Column::RunAt)
            .order_by_asc(entity::job::Column::CreatedAt)
            .limit(limit)
            .all(self.db)
            .await?;

        let mut claimed = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let result = entity::prelude::Job::update_many()
                .col_expr(
                    entity::job::Column::Status,
                    Expr::value(JobStatus::Running.as_str()),
                )
                .col_expr(
                    entity::job::Column::Attempts,
                    Expr::value(candidate.attempts + 1),
                )
                .col_expr(entity::job::Column::StartedAt, Expr::value(Some(now)))
                .col_expr(entity::job::Column::UpdatedAt, Expr::value(now))
                .filter(entity::job::Column::Id.eq(candidate.id))
                .filter(entity::job::Column::Status.eq(JobStatus::Pending.as_str()))
                .exec(self.db)
                .await?;
            if result.rows_affected == 0 {
                continue;
            }

            if let Some(job) = self.find_by_id(candidate.id).await? {
                claimed.push(job);
            }
        }

        Ok(claimed)
    }

    pub async fn mark_completed(&self, id: Uuid) -> Result<(), DbErr> {
        let now = Utc::now();
        entity::prelude::Job::update_many()
            .col_expr(
                entity::job::Column::Status,
                Expr::value(JobStatus::Completed.as_str()),
            )
            .col_expr(entity::job::Column::LastError, Expr::value(None::<String>))
            .col_expr(entity::job::Column::FinishedAt, Expr::value(Some(now)))
            .col_expr(entity::job::Column::UpdatedAt, Expr::value(now))
            .filter(entity::job::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Records a failed run.
    ///
    /// The job goes back to `pending` with a delayed `run_at` while attempts remain,
    /// otherwise it ends in `failed`.
    ///
    /// # Returns
    /// - `Ok(Some(JobStatus))` - The status the job was moved to
    /// - `Ok(None)` - Job not found
    pub async fn mark_failed(&self, id: Uuid, error: &str) -> Result<Option<JobStatus>, DbErr> {
        let Some(existing) = entity::prelude::Job::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let now = Utc::now();
        let retry = existing.attempts < existing.max_attempts;
        let attempts = i64::from(existing.attempts.max(1));

        let mut active: entity::job::ActiveModel = existing.into();
        active.last_error = ActiveValue::Set(Some(error.to_string()));
        active.updated_at = ActiveValue::Set(now);
        let status = if retry {
            let delay = Duration::seconds(RETRY_BACKOFF_SECONDS * attempts);
            active.run_at = ActiveValue::Set(now + delay);
            JobStatus::Pending
        } else {
            active.finished_at = ActiveValue::Set(Some(now));
            JobStatus::Failed
        };
        active.status = ActiveValue::Set(status.to_string());
        active.update(self.db).await?;

        Ok(Some(status))
    }

    /// Returns `running` jobs to the retry path when they started before `started_before`.
    ///
    /// A worker that died or lost its database connection mid-run leaves the job
    /// `running`; each such job is failed with `error` and rescheduled while attempts
    /// remain.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of jobs reclaimed
    pub async fn reclaim_stale(
        &self,
        started_before: DateTime<Utc>,
        error: &str,
    ) -> Result<u64, DbErr> {
        let stale = entity::prelude::Job::find()
            .filter(entity::job::Column::Status.eq(JobStatus::Running.as_str()))
            .filter(entity::job::Column::StartedAt.lt(started_before))
            .all(self.db)
            .await?;

        let mut reclaimed = 0;
        for job in stale {
            if self.mark_failed(job.id, error).await?.is_some() {
                reclaimed += 1;
            }
        }

        Ok(reclaimed)
    }

    /// Moves a job from one of `from` to `to`, returning the updated job.
    ///
    /// # Returns
    /// - `Ok(Some(Job))` - Transition applied
    /// - `Ok(None)` - Job missing or not in any of the `from` states
    pub async fn transition(
        &self,
        id: Uuid,
        from: &[JobStatus],
        to: JobStatus,
    ) -> Result<Option<Job>, DbErr> {
        let now = Utc::now();
        let mut update = entity::prelude::Job::update_many()
            .col_expr(entity::job::Column::Status, Expr::value(to.as_str()))
            .col_expr(entity::job::Column::UpdatedAt, Expr::value(now));
        if to == JobStatus::Pending {
            update = update
                .col_expr(entity::job::Column::Attempts, Expr::value(0))
                .col_expr(entity::job::Column::RunAt, Expr::value(now))
                .col_expr(entity::job::Column::FinishedAt, Expr::value(None::<DateTime<Utc>>));
        } else {
            update = update.col_expr(entity::job::Column::FinishedAt, Expr::value(Some(now)));
        }

        let result = update
            .filter(entity::job::Column::Id.eq(id))
            .filter(entity::job::Column::Status.is_in(from.iter().map(JobStatus::as_str)))
            .exec(self.db)
            .await?;
        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }

    /// Number of jobs in each status. Every status is present, zero when empty.
    pub async fn stats(&self) -> Result<BTreeMap<JobStatus, u64>, DbErr> {
        let mut counts = BTreeMap::new();
        for status in JobStatus::ALL {
            let count = entity::prelude::Job::find()
                .filter(entity::job::Column::Status.eq(status.as_str()))
                .count(self.db)
                .await?;
            counts.insert(status, count);
        }

        Ok(counts)
    }
}

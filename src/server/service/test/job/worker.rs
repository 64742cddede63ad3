use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue};

use super::*;

/// Tests that the worker runs due maintenance jobs to completion.
///
/// Expected: both jobs completed, attempts recorded
#[tokio::test]
async fn runs_due_jobs() -> Result<(), AppError> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config();
    config.backup_dir = dir.path().to_path_buf();

    let service = JobService::new(db);
    let cleanup = service
        .enqueue(EnqueueJobParams::new(JobKind::BackupCleanup))
        .await?;
    let purge = service
        .enqueue(EnqueueJobParams::new(JobKind::NotificationsPurge))
        .await?;

    let ran = JobWorker::new(db, &config).run_due().await?;
    assert_eq!(ran, 2);

    for id in [cleanup.id, purge.id] {
        let job = service.get(id).await?;
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.attempts, 1);
        assert!(job.finished_at.is_some());
    }

    Ok(())
}

/// Tests that a job with an unknown type fails once its attempts are used up.
///
/// Expected: Failed with last_error recorded
#[tokio::test]
async fn unknown_type_fails() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Job)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    let now = Utc::now();
    let row = entity::job::ActiveModel {
        id: ActiveValue::Set(uuid::Uuid::new_v4()),
        job_type: ActiveValue::Set("mystery".to_string()),
        payload: ActiveValue::Set(serde_json::Value::Null),
        status: ActiveValue::Set(JobStatus::Pending.to_string()),
        attempts: ActiveValue::Set(0),
        max_attempts: ActiveValue::Set(1),
        last_error: ActiveValue::Set(None),
        run_at: ActiveValue::Set(now),
        started_at: ActiveValue::Set(None),
        finished_at: ActiveValue::Set(None),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
    }
    .insert(db)
    .await?;

    JobWorker::new(db, &config).run_due().await?;

    let job = JobRepository::new(db).find_by_id(row.id).await?.unwrap();
    assert_eq!(job.status, JobStatus::Failed);
    assert!(job.last_error.unwrap().contains("mystery"));

    Ok(())
}

/// Tests that the worker reclaims a job left running by a crashed worker.
///
/// Expected: the abandoned job is pending again with the lease error recorded
#[tokio::test]
async fn reclaims_abandoned_running_job() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Job)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    let now = Utc::now();
    let started = now - Duration::hours(3);
    let row = entity::job::ActiveModel {
        id: ActiveValue::Set(uuid::Uuid::new_v4()),
        job_type: ActiveValue::Set(JobKind::NotificationsPurge.as_str().to_string()),
        payload: ActiveValue::Set(serde_json::Value::Null),
        status: ActiveValue::Set(JobStatus::Running.to_string()),
        attempts: ActiveValue::Set(1),
        max_attempts: ActiveValue::Set(3),
        last_error: ActiveValue::Set(None),
        run_at: ActiveValue::Set(started),
        started_at: ActiveValue::Set(Some(started)),
        finished_at: ActiveValue::Set(None),
        created_at: ActiveValue::Set(started),
        updated_at: ActiveValue::Set(started),
    }
    .insert(db)
    .await?;

    JobWorker::new(db, &config).run_due().await?;

    let job = JobRepository::new(db).find_by_id(row.id).await?.unwrap();
    assert_eq!(job.status, JobStatus::Pending);
    assert_eq!(job.last_error.as_deref(), Some("job lease expired"));
    assert!(job.run_at > now);

    Ok(())
}

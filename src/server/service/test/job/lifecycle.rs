use super::*;

/// Tests cancel and retry transitions and their conflicts.
///
/// Expected: pending -> cancelled -> pending; cancelling twice conflicts
#[tokio::test]
async fn cancel_then_retry() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Job)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = JobService::new(db);
    let job = service
        .enqueue(EnqueueJobParams::new(JobKind::BackupCleanup))
        .await?;

    let retry_pending = service.retry(job.id).await;
    assert!(matches!(retry_pending, Err(AppError::Conflict(_))));

    let cancelled = service.cancel(job.id).await?;
    assert_eq!(cancelled.status, JobStatus::Cancelled);

    let cancel_again = service.cancel(job.id).await;
    assert!(matches!(cancel_again, Err(AppError::Conflict(_))));

    let retried = service.retry(job.id).await?;
    assert_eq!(retried.status, JobStatus::Pending);
    assert_eq!(retried.attempts, 0);

    let stats = service.stats().await?;
    assert_eq!(stats[&JobStatus::Pending], 1);
    assert_eq!(stats[&JobStatus::Cancelled], 0);

    Ok(())
}

/// Tests transitions on a missing job.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn missing_job_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Job)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = JobService::new(db).cancel(uuid::Uuid::new_v4()).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

use super::*;

/// Tests that only due pending jobs are claimed, and only once.
///
/// Expected: first claim returns the due job running with 1 attempt, second claim is empty
#[tokio::test]
async fn claims_due_jobs_once() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = JobRepository::new(db);
    let due = repo
        .enqueue(EnqueueJobParams::new(JobKind::BackupCleanup))
        .await?;
    let mut later = EnqueueJobParams::new(JobKind::NotificationsPurge);
    later.run_at = Utc::now() + Duration::hours(1);
    repo.enqueue(later).await?;

    let claimed = repo.claim_due(Utc::now(), 10).await?;
    assert_eq!(claimed.len(), 1);
    assert_eq!(claimed[0].id, due.id);
    assert_eq!(claimed[0].status, JobStatus::Running);
    assert_eq!(claimed[0].attempts, 1);
    assert!(claimed[0].started_at.is_some());

    assert!(repo.claim_due(Utc::now(), 10).await?.is_empty());

    Ok(())
}

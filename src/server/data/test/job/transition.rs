use super::*;

/// Tests cancel and retry transitions.
///
/// Expected: pending -> cancelled -> pending, while invalid transitions return None
#[tokio::test]
async fn applies_only_allowed_transitions() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = JobRepository::new(db);
    let job = repo
        .enqueue(EnqueueJobParams::new(JobKind::BackupCleanup))
        .await?;

    let cancelled = repo
        .transition(job.id, &[JobStatus::Pending], JobStatus::Cancelled)
        .await?
        .unwrap();
    assert_eq!(cancelled.status, JobStatus::Cancelled);

    // Cancelling again is not allowed from cancelled
    assert!(repo
        .transition(job.id, &[JobStatus::Pending], JobStatus::Cancelled)
        .await?
        .is_none());

    let retried = repo
        .transition(
            job.id,
            &[JobStatus::Failed, JobStatus::Cancelled],
            JobStatus::Pending,
        )
        .await?
        .unwrap();
    assert_eq!(retried.status, JobStatus::Pending);
    assert_eq!(retried.attempts, 0);
    assert!(retried.finished_at.is_none());

    let stats = repo.stats().await?;
    assert_eq!(stats[&JobStatus::Pending], 1);
    assert_eq!(stats[&JobStatus::Cancelled], 0);

    Ok(())
}

use super::*;

/// Tests that a running job past its lease goes back to the retry path.
///
/// Expected: untouched before the cutoff, pending with the error recorded after it
#[tokio::test]
async fn reclaims_running_jobs_started_before_cutoff() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = JobRepository::new(db);
    let job = repo
        .enqueue(EnqueueJobParams::new(JobKind::BackupCleanup))
        .await?;
    repo.claim_due(Utc::now(), 1).await?;

    let reclaimed = repo
        .reclaim_stale(Utc::now() - Duration::hours(1), "job lease expired")
        .await?;
    assert_eq!(reclaimed, 0);
    assert_eq!(
        repo.find_by_id(job.id).await?.unwrap().status,
        JobStatus::Running
    );

    let reclaimed = repo
        .reclaim_stale(Utc::now() + Duration::hours(1), "job lease expired")
        .await?;
    assert_eq!(reclaimed, 1);

    let job = repo.find_by_id(job.id).await?.unwrap();
    assert_eq!(job.status, JobStatus::Pending);
    assert_eq!(job.last_error.as_deref(), Some("job lease expired"));

    Ok(())
}

/// Tests that pending jobs are never reclaimed.
///
/// Expected: nothing reclaimed
#[tokio::test]
async fn ignores_pending_jobs() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = JobRepository::new(db);
    repo.enqueue(EnqueueJobParams::new(JobKind::BackupCleanup))
        .await?;

    let reclaimed = repo
        .reclaim_stale(Utc::now() + Duration::hours(1), "job lease expired")
        .await?;
    assert_eq!(reclaimed, 0);

    Ok(())
}

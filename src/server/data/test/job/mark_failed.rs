use super::*;

/// Tests retry scheduling until attempts are exhausted.
///
/// Expected: pending after the first failure, failed after the last
#[tokio::test]
async fn retries_until_max_attempts() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = JobRepository::new(db);
    let mut params = EnqueueJobParams::new(JobKind::BackupCreate);
    params.max_attempts = 2;
    let job = repo.enqueue(params).await?;

    repo.claim_due(Utc::now(), 1).await?;
    let status = repo.mark_failed(job.id, "disk full").await?;
    assert_eq!(status, Some(JobStatus::Pending));

    let retried = repo.find_by_id(job.id).await?.unwrap();
    assert!(retried.run_at > Utc::now());
    assert_eq!(retried.last_error.as_deref(), Some("disk full"));

    // Claim again once the backoff has passed
    let claimed = repo
        .claim_due(Utc::now() + Duration::hours(1), 1)
        .await?;
    assert_eq!(claimed.len(), 1);
    assert_eq!(claimed[0].attempts, 2);

    let status = repo.mark_failed(job.id, "disk still full").await?;
    assert_eq!(status, Some(JobStatus::Failed));
    assert!(repo.find_by_id(job.id).await?.unwrap().finished_at.is_some());

    Ok(())
}

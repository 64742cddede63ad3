use super::*;

/// Tests creating, listing and deleting a backup of the test database.
///
/// Expected: one listed backup matching the created file, gone after delete
#[tokio::test]
async fn create_list_delete() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();

    factory::create_user(db).await?;

    let service = BackupService::new(db, dir.path(), 7);
    let backup = service.create().await?;
    assert!(backup.size_bytes > 0);
    assert!(dir.path().join(&backup.name).is_file());

    let listed = service.list().await?;
    assert_eq!(listed, vec![backup.clone()]);

    service.delete(&backup.name).await?;
    assert!(service.list().await?.is_empty());

    Ok(())
}

/// Tests that names outside the backup pattern are rejected before touching the disk.
///
/// Expected: Err(AppError::Validation) for traversal, NotFound for a missing backup
#[tokio::test]
async fn delete_validates_name() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();

    let service = BackupService::new(db, dir.path(), 7);

    assert!(matches!(
        service.delete("../secrets.db").await,
        Err(AppError::Validation(_))
    ));
    assert!(matches!(
        service.delete("backup-20200101-000000.db").await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests that cleanup removes only backups past retention and ignores other files.
///
/// Expected: Ok(1), the recent backup and the unrelated file remain
#[tokio::test]
async fn cleanup_honors_retention() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();

    let recent = crate::server::model::backup::backup_file_name(chrono::Utc::now());
    std::fs::write(dir.path().join("backup-20200101-000000.db"), b"old").unwrap();
    std::fs::write(dir.path().join(&recent), b"new").unwrap();
    std::fs::write(dir.path().join("README.txt"), b"keep").unwrap();

    let service = BackupService::new(db, dir.path(), 7);
    let removed = service.cleanup().await?;

    assert_eq!(removed, 1);
    let remaining: Vec<_> = service.list().await?.into_iter().map(|b| b.name).collect();
    assert_eq!(remaining, vec![recent]);
    assert!(dir.path().join("README.txt").exists());

    Ok(())
}

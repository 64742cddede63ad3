use super::*;

/// Tests that an upload lands in storage under its key and can be deleted again.
///
/// Expected: file present after upload, gone after delete
#[tokio::test]
async fn stores_and_deletes() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_auth_tables()
        .with_table(entity::prelude::Media)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalStorage::new(dir.path());

    let user = factory::create_user(db).await?;
    let service = MediaService::new(db, &storage);
    let media = service
        .upload(upload(user.id, "text/plain; charset=utf-8", b"hello".to_vec()))
        .await?;

    assert_eq!(media.content_type, "text/plain");
    assert_eq!(media.size_bytes, 5);
    assert!(media.storage_key.ends_with(&format!("{}.txt", media.id)));
    let path = dir.path().join(&media.storage_key);
    assert_eq!(std::fs::read(&path).unwrap(), b"hello");

    service.delete(media.id).await?;

    assert!(!path.exists());
    assert!(matches!(service.get(media.id).await, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests the size limit and the content type allow-list.
///
/// Expected: PayloadTooLarge and UnsupportedMediaType, nothing stored
#[tokio::test]
async fn rejects_oversized_and_disallowed() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_auth_tables()
        .with_table(entity::prelude::Media)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let storage = LocalStorage::new(dir.path());

    let user = factory::create_user(db).await?;
    let service = MediaService::new(db, &storage);

    let too_large = service
        .upload(upload(user.id, "text/plain", vec![b'a'; MAX_UPLOAD_BYTES + 1]))
        .await;
    assert!(matches!(too_large, Err(AppError::PayloadTooLarge(_))));

    let disallowed = service
        .upload(upload(user.id, "application/x-msdownload", b"MZ".to_vec()))
        .await;
    assert!(matches!(disallowed, Err(AppError::UnsupportedMediaType(_))));

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

    Ok(())
}

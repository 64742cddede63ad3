use super::*;

/// Tests marking a single notification and then all notifications read.
///
/// Expected: unread count drops 3 -> 2 -> 0
#[tokio::test]
async fn marks_one_then_all() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let repo = NotificationRepository::new(db);
    let first = repo.create(params(user.id)).await?;
    repo.create(params(user.id)).await?;
    repo.create(params(user.id)).await?;
    assert_eq!(repo.unread_count(user.id).await?, 3);

    let read = repo.mark_read(user.id, first.id).await?.unwrap();
    assert!(read.read_at.is_some());
    assert_eq!(repo.unread_count(user.id).await?, 2);

    assert_eq!(repo.mark_all_read(user.id).await?, 2);
    assert_eq!(repo.unread_count(user.id).await?, 0);

    let unread = repo
        .get_by_user_paginated(user.id, true, Pagination::default())
        .await?;
    assert_eq!(unread.total, 0);

    Ok(())
}

/// Tests that users cannot mark someone else's notification.
///
/// Expected: Ok(None)
#[tokio::test]
async fn ignores_other_users_notification() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let owner = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;

    let repo = NotificationRepository::new(db);
    let notification = repo.create(params(owner.id)).await?;

    assert!(repo.mark_read(other.id, notification.id).await?.is_none());
    assert!(!repo.delete(other.id, notification.id).await?);

    Ok(())
}

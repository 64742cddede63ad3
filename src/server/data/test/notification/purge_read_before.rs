use super::*;

/// Tests purging old read notifications.
///
/// Expected: only the old, read notification is removed
#[tokio::test]
async fn purges_only_old_read_notifications() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let repo = NotificationRepository::new(db);
    let old_read = repo.create(params(user.id)).await?;
    let old_unread = repo.create(params(user.id)).await?;
    let recent_read = repo.create(params(user.id)).await?;

    let long_ago = Utc::now() - Duration::days(45);
    for (id, read) in [(old_read.id, true), (old_unread.id, false)] {
        entity::notification::ActiveModel {
            id: ActiveValue::Unchanged(id),
            created_at: ActiveValue::Set(long_ago),
            read_at: ActiveValue::Set(read.then_some(long_ago)),
            ..Default::default()
        }
        .update(db)
        .await?;
    }
    repo.mark_read(user.id, recent_read.id).await?;

    let purged = repo
        .purge_read_before(Utc::now() - Duration::days(30))
        .await?;

    assert_eq!(purged, 1);
    assert!(entity::prelude::Notification::find_by_id(old_read.id)
        .one(db)
        .await?
        .is_none());
    assert!(entity::prelude::Notification::find_by_id(old_unread.id)
        .one(db)
        .await?
        .is_some());

    Ok(())
}

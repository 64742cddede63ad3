use super::*;

/// Tests updating profile fields and the password hash.
///
/// Expected: Ok with new values persisted
#[tokio::test]
async fn updates_profile_and_password() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let repo = UserRepository::new(db);
    let updated = repo
        .update(
            user.id,
            UpdateUserParams {
                full_name: Some("New Name".to_string()),
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await?
        .unwrap();
    assert_eq!(updated.full_name.as_deref(), Some("New Name"));
    assert!(!updated.is_active);

    assert!(repo.set_password_hash(user.id, "new-hash".to_string()).await?);
    let reloaded = repo.find_by_id(user.id).await?.unwrap();
    assert_eq!(reloaded.password_hash, "new-hash");

    Ok(())
}

/// Tests updating a missing user.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let result = repo
        .update(uuid::Uuid::new_v4(), UpdateUserParams::default())
        .await?;

    assert!(result.is_none());

    Ok(())
}

use super::*;

/// Tests creating a user.
///
/// Expected: Ok with an active user and no last login
#[tokio::test]
async fn creates_active_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create(CreateUserParams {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "hash".to_string(),
            full_name: Some("Alice".to_string()),
        })
        .await?;

    assert_eq!(user.username, "alice");
    assert!(user.is_active);
    assert!(user.last_login_at.is_none());
    assert!(repo.username_exists("alice").await?);
    assert!(repo.email_exists("alice@example.com", None).await?);
    assert!(!repo.email_exists("alice@example.com", Some(user.id)).await?);

    Ok(())
}

/// Tests that duplicate usernames are rejected by the unique index.
///
/// Expected: Err
#[tokio::test]
async fn rejects_duplicate_username() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .username("taken")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let result = repo
        .create(CreateUserParams {
            username: "taken".to_string(),
            email: "other@example.com".to_string(),
            password_hash: "hash".to_string(),
            full_name: None,
        })
        .await;

    assert!(result.is_err());

    Ok(())
}

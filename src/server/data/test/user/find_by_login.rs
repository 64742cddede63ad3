use super::*;

/// Tests lookup by username and by email in any case.
///
/// Expected: Ok(Some) for both, Ok(None) for unknown
#[tokio::test]
async fn finds_by_username_or_email() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .username("bob")
        .email("bob@example.com")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    assert_eq!(repo.find_by_login("bob").await?.unwrap().id, user.id);
    assert_eq!(
        repo.find_by_login("Bob@Example.com").await?.unwrap().id,
        user.id
    );
    assert!(repo.find_by_login("carol").await?.is_none());

    Ok(())
}

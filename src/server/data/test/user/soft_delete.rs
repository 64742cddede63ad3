use super::*;

/// Tests that soft-deleted users disappear from reads.
///
/// Expected: Ok(true) then the user is not found, second delete Ok(false)
#[tokio::test]
async fn hides_deleted_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let repo = UserRepository::new(db);
    assert!(repo.soft_delete(user.id).await?);
    assert!(repo.find_by_id(user.id).await?.is_none());
    assert!(repo.find_by_login(&user.username).await?.is_none());
    assert!(!repo.soft_delete(user.id).await?);

    // Deleted rows still reserve their username
    assert!(repo.username_exists(&user.username).await?);

    Ok(())
}

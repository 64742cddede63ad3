use super::*;

/// Tests that a valid bearer token resolves to its user.
///
/// Expected: Ok(User) with the token subject's id
#[tokio::test]
async fn resolves_token_subject() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    let user = factory::create_user(db).await?;
    let (token, _) = issue_token(user.id, &config)?;

    let resolved = authenticate(db, &config, Some(&bearer(&token))).await?;

    assert_eq!(resolved.id, user.id);

    Ok(())
}

/// Tests requests without a usable bearer header.
///
/// Expected: Err(AuthError::MissingToken) for no header and for other schemes
#[tokio::test]
async fn rejects_missing_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    for header in [None, Some("Basic dXNlcjpwYXNz")] {
        let result = authenticate(db, &config, header).await;
        assert!(matches!(
            result,
            Err(AppError::AuthErr(AuthError::MissingToken))
        ));
    }

    Ok(())
}

/// Tests a token signed with another secret.
///
/// Expected: Err(AuthError::InvalidToken)
#[tokio::test]
async fn rejects_foreign_token() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    let user = factory::create_user(db).await?;
    let mut other = test_config();
    other.jwt_secret = "someone-else".to_string();
    let (token, _) = issue_token(user.id, &other)?;

    let result = authenticate(db, &config, Some(&bearer(&token))).await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::InvalidToken(_)))
    ));

    Ok(())
}

/// Tests tokens for inactive and deleted users.
///
/// Expected: AccountInactive for the inactive user, UserNotFound for the deleted one
#[tokio::test]
async fn rejects_inactive_and_deleted_users() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    let inactive = factory::user::UserFactory::new(db)
        .active(false)
        .build()
        .await?;
    let deleted = factory::create_user(db).await?;
    crate::server::data::user::UserRepository::new(db)
        .soft_delete(deleted.id)
        .await?;

    let (token, _) = issue_token(inactive.id, &config)?;
    let result = authenticate(db, &config, Some(&bearer(&token))).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccountInactive(id))) if id == inactive.id
    ));

    let (token, _) = issue_token(deleted.id, &config)?;
    let result = authenticate(db, &config, Some(&bearer(&token))).await;
    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::UserNotFound(id))) if id == deleted.id
    ));

    Ok(())
}

use super::*;

/// Tests logging in by username and by email.
///
/// Expected: Ok(LoginResult) with a bearer token and last_login_at recorded
#[tokio::test]
async fn accepts_username_or_email() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    let service = AuthService::new(db, &config);
    let user = service
        .register(register_params("bob", "password123", "password123"))
        .await?;

    let by_name = service.login("bob", "password123").await?;
    assert_eq!(by_name.user.id, user.id);
    assert!(!by_name.access_token.is_empty());
    assert_eq!(by_name.expires_in, config.jwt_ttl_seconds);

    let by_email = service.login("BOB@example.com", "password123").await?;
    assert_eq!(by_email.user.id, user.id);

    let reloaded = service.me(user.id).await?;
    assert!(reloaded.last_login_at.is_some());

    Ok(())
}

/// Tests that a wrong password and an unknown user give the same error.
///
/// Expected: Err(AuthError::InvalidCredentials) for both
#[tokio::test]
async fn rejects_bad_credentials() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    let service = AuthService::new(db, &config);
    service
        .register(register_params("carol", "password123", "password123"))
        .await?;

    for (login, password) in [("carol", "wrong-password"), ("nobody", "password123")] {
        let result = service.login(login, password).await;
        assert!(matches!(
            result,
            Err(AppError::AuthErr(AuthError::InvalidCredentials))
        ));
    }

    Ok(())
}

/// Tests that a deactivated account cannot log in.
///
/// Expected: Err(AuthError::AccountInactive)
#[tokio::test]
async fn rejects_inactive_account() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    let service = AuthService::new(db, &config);
    let user = service
        .register(register_params("dave", "password123", "password123"))
        .await?;
    UserRepository::new(db)
        .update(
            user.id,
            crate::server::model::user::UpdateUserParams {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await?;

    let result = service.login("dave", "password123").await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccountInactive(id))) if id == user.id
    ));

    Ok(())
}

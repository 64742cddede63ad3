use super::*;

/// Tests changing the password and logging in with the new one.
///
/// Expected: Ok, old password rejected afterwards
#[tokio::test]
async fn replaces_password() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    let service = AuthService::new(db, &config);
    let user = service
        .register(register_params("erin", "password123", "password123"))
        .await?;

    service
        .change_password(user.id, "password123", "new-password", "new-password")
        .await?;

    assert!(service.login("erin", "new-password").await.is_ok());
    assert!(service.login("erin", "password123").await.is_err());

    Ok(())
}

/// Tests that the current password must be correct.
///
/// Expected: Err(AppError::Validation)
#[tokio::test]
async fn requires_current_password() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    let service = AuthService::new(db, &config);
    let user = service
        .register(register_params("frank", "password123", "password123"))
        .await?;

    let result = service
        .change_password(user.id, "not-my-password", "new-password", "new-password")
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));

    Ok(())
}

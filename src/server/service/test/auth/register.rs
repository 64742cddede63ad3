use super::*;

/// Tests that a confirmation mismatch is rejected before anything is written.
///
/// A later login with the same credentials must fail as if the user never existed.
///
/// Expected: Err(AppError::Validation), no user row, login gives InvalidCredentials
#[tokio::test]
async fn mismatched_confirmation_writes_nothing() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    let service = AuthService::new(db, &config);
    let result = service
        .register(register_params("alice", "password-one", "password-two"))
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(UserRepository::new(db).count_all().await?, 0);

    let login = service.login("alice", "password-one").await;
    assert!(matches!(
        login,
        Err(AppError::AuthErr(AuthError::InvalidCredentials))
    ));

    Ok(())
}

/// Tests that the first registered user becomes admin and later users do not.
///
/// Expected: Ok with admin role on the first user only
#[tokio::test]
async fn first_user_becomes_admin() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    let service = AuthService::new(db, &config);
    let first = service
        .register(register_params("first", "password123", "password123"))
        .await?;
    let second = service
        .register(register_params("second", "password123", "password123"))
        .await?;

    let roles = RoleRepository::new(db);
    let first_roles = roles.get_by_user(first.id).await?;
    assert_eq!(first_roles.len(), 1);
    assert_eq!(first_roles[0].name, ADMIN_ROLE);
    assert!(roles.get_by_user(second.id).await?.is_empty());

    Ok(())
}

/// Tests duplicate usernames and emails.
///
/// Expected: Err(AppError::Conflict) for both
#[tokio::test]
async fn rejects_duplicates() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let config = test_config();

    let service = AuthService::new(db, &config);
    service
        .register(register_params("alice", "password123", "password123"))
        .await?;

    let same_username = service
        .register(RegisterParams {
            email: "other@example.com".to_string(),
            ..register_params("alice", "password123", "password123")
        })
        .await;
    assert!(matches!(same_username, Err(AppError::Conflict(_))));

    let same_email = service
        .register(RegisterParams {
            email: "alice@example.com".to_string(),
            ..register_params("alice2", "password123", "password123")
        })
        .await;
    assert!(matches!(same_email, Err(AppError::Conflict(_))));

    Ok(())
}

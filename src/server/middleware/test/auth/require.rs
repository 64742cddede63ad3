use super::*;

/// Tests that a role policy grants the matching permission.
///
/// Expected: Ok(()) for the granted action, AccessDenied for another
#[tokio::test]
async fn grants_policy_permissions_only() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let role = factory::role::create_role_named(db, "editor").await?;
    factory::role::assign_role(db, user.id, role.id).await?;
    factory::role::create_policy(db, "editor", "posts", "update").await?;

    let caller = auth_user(user);
    let guard = AuthGuard::new(db, &caller);

    guard
        .require(&[Permission::new("posts", Action::Update)])
        .await?;

    let result = guard
        .require(&[Permission::new("posts", Action::Delete)])
        .await;
    match result {
        Err(AppError::AuthErr(AuthError::AccessDenied { object, action, .. })) => {
            assert_eq!(object, "posts");
            assert_eq!(action, "delete");
        }
        other => panic!("Expected AccessDenied, got: {:?}", other),
    }

    Ok(())
}

/// Tests that every listed permission must hold.
///
/// Expected: Err(AccessDenied) when the second permission is missing
#[tokio::test]
async fn requires_all_permissions() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let role = factory::role::create_role_named(db, "reader").await?;
    factory::role::assign_role(db, user.id, role.id).await?;
    factory::role::create_policy(db, "reader", "*", "read").await?;

    let caller = auth_user(user);
    let result = AuthGuard::new(db, &caller)
        .require(&[
            Permission::new("tags", Action::Read),
            Permission::new("tags", Action::Create),
        ])
        .await;

    assert!(matches!(
        result,
        Err(AppError::AuthErr(AuthError::AccessDenied { .. }))
    ));

    Ok(())
}

/// Tests that an empty permission list only needs authentication.
///
/// Expected: Ok(()) for a user with no roles
#[tokio::test]
async fn empty_permission_list_grants_access() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let caller = auth_user(user);

    AuthGuard::new(db, &caller).require(&[]).await?;

    Ok(())
}

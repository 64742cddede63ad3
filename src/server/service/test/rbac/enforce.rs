use super::*;

/// Tests exact and wildcard policies through a user's roles.
///
/// Expected: allowed only for pairs a policy of one of the user's roles grants
#[tokio::test]
async fn honors_exact_and_wildcard_rules() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let editor = factory::role::create_role_named(db, "editor").await?;
    let auditor = factory::role::create_role_named(db, "auditor").await?;
    factory::assign_role(db, user.id, editor.id).await?;
    factory::assign_role(db, user.id, auditor.id).await?;
    factory::create_policy(db, "editor", "posts", "*").await?;
    factory::create_policy(db, "auditor", "*", "read").await?;
    factory::create_policy(db, "admin", "*", "*").await?;

    let service = RbacService::new(db);

    assert!(service.check(user.id, "posts", "delete").await?);
    assert!(service.check(user.id, "backups", "read").await?);
    assert!(!service.check(user.id, "backups", "create").await?);

    let denied = service.enforce(user.id, "users", Action::Delete).await;
    assert!(matches!(
        denied,
        Err(AppError::AuthErr(AuthError::AccessDenied { .. }))
    ));

    Ok(())
}

/// Tests that a user without roles is denied everything.
///
/// Expected: Ok(false)
#[tokio::test]
async fn no_roles_no_access() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    factory::create_policy(db, "admin", "*", "*").await?;

    let permissions = RbacService::new(db).user_permissions(user.id).await?;

    assert!(permissions.roles.is_empty());
    assert!(!permissions.allows("posts", "read"));

    Ok(())
}

/// Tests that deleting a role revokes what it granted.
///
/// Expected: allowed before, denied after
#[tokio::test]
async fn role_delete_revokes() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let role = factory::role::create_role_named(db, "moderator").await?;
    factory::assign_role(db, user.id, role.id).await?;

    let rbac = RbacService::new(db);
    rbac.add_policy(Policy {
        subject: "moderator".to_string(),
        object: "comments".to_string(),
        action: "update".to_string(),
    })
    .await?;
    assert!(rbac.check(user.id, "comments", "update").await?);

    RoleService::new(db).delete(role.id).await?;

    assert!(!rbac.check(user.id, "comments", "update").await?);
    assert!(rbac.get_policies().await?.is_empty());

    Ok(())
}

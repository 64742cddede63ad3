use super::*;

/// Tests that seeding twice creates the admin role and policy once.
///
/// Expected: same role id both times, one policy
#[tokio::test]
async fn seed_is_repeatable() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let service = RbacService::new(db);
    let first = service.seed().await?;
    let second = service.seed().await?;

    assert_eq!(first.id, second.id);
    assert_eq!(service.get_policies().await?.len(), 1);
    assert!(service.admin_policy_present().await?);

    Ok(())
}

/// Tests adding a policy for a role that does not exist.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn policy_requires_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let result = RbacService::new(db)
        .add_policy(Policy {
            subject: "ghost".to_string(),
            object: "*".to_string(),
            action: "read".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests duplicate role names.
///
/// Expected: Err(AppError::Conflict)
#[tokio::test]
async fn role_names_are_unique() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::role::create_role_named(db, "editor").await?;

    let result = RoleService::new(db)
        .create(crate::server::model::role::CreateRoleParams {
            name: " editor ".to_string(),
            description: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

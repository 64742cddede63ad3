use super::*;

/// Tests that deleting a role removes its assignments and policies.
///
/// Expected: Ok(true) with no user_role or rbac_policy rows left for the role
#[tokio::test]
async fn removes_assignments_and_policies() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let role = factory::role::create_role_named(db, "editor").await?;
    factory::assign_role(db, user.id, role.id).await?;
    factory::create_policy(db, "editor", "posts", "update").await?;
    factory::create_policy(db, "viewer", "posts", "read").await?;

    let repo = RoleRepository::new(db);
    assert!(repo.delete(role.id).await?);

    assert_eq!(entity::prelude::UserRole::find().count(db).await?, 0);
    let policies = entity::prelude::RbacPolicy::find().all(db).await?;
    assert_eq!(policies.len(), 1);
    assert_eq!(policies[0].subject, "viewer");

    Ok(())
}

/// Tests deleting a missing role.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_for_missing_role() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RoleRepository::new(db);
    assert!(!repo.delete(uuid::Uuid::new_v4()).await?);

    Ok(())
}

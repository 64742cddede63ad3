use super::*;

/// Tests that assigning the same role twice is a no-op.
///
/// Expected: first assign Ok(true), second Ok(false), one role listed
#[tokio::test]
async fn assign_is_idempotent() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let role = factory::create_role(db).await?;

    let repo = RoleRepository::new(db);
    assert!(repo.assign(user.id, role.id).await?);
    assert!(!repo.assign(user.id, role.id).await?);

    let roles = repo.get_by_user(user.id).await?;
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].id, role.id);

    Ok(())
}

/// Tests unassigning a role.
///
/// Expected: Ok(true) then Ok(false) once nothing is left to remove
#[tokio::test]
async fn unassigns_role() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let role = factory::create_role(db).await?;
    factory::assign_role(db, user.id, role.id).await?;

    let repo = RoleRepository::new(db);
    assert!(repo.unassign(user.id, role.id).await?);
    assert!(!repo.unassign(user.id, role.id).await?);
    assert!(repo.get_by_user(user.id).await?.is_empty());

    Ok(())
}

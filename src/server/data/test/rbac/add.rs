use super::*;

/// Tests that adding an identical policy twice stores it once.
///
/// Expected: Ok(true), then Ok(false), one row
#[tokio::test]
async fn add_is_idempotent() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RbacRepository::new(db);
    assert!(repo.add(policy("editor", "posts", "update")).await?);
    assert!(!repo.add(policy("editor", "posts", "update")).await?);

    assert_eq!(repo.get_all().await?.len(), 1);

    Ok(())
}

/// Tests removing a policy.
///
/// Expected: Ok(true) then Ok(false)
#[tokio::test]
async fn removes_policy() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_policy(db, "editor", "posts", "update").await?;

    let repo = RbacRepository::new(db);
    let rule = policy("editor", "posts", "update");
    assert!(repo.remove(&rule).await?);
    assert!(!repo.remove(&rule).await?);
    assert!(repo.get_all().await?.is_empty());

    Ok(())
}

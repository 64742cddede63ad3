use super::*;

/// Tests that only policies of the requested subjects are returned.
///
/// Expected: Ok with the editor and viewer rules, not the admin rule
#[tokio::test]
async fn returns_policies_for_subjects() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_policy(db, "admin", "*", "*").await?;
    factory::create_policy(db, "editor", "posts", "update").await?;
    factory::create_policy(db, "viewer", "posts", "read").await?;

    let repo = RbacRepository::new(db);
    let policies = repo
        .get_for_subjects(&["editor".to_string(), "viewer".to_string()])
        .await?;

    assert_eq!(policies.len(), 2);
    assert!(policies.iter().all(|p| p.subject != "admin"));

    assert!(repo.get_for_subjects(&[]).await?.is_empty());

    Ok(())
}

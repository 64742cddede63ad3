use super::*;

/// Tests slug uniqueness checks with and without an excluded id.
///
/// Expected: taken for other rows, free for the owner itself
#[tokio::test]
async fn detects_taken_slug() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::organization::OrganizationFactory::new(db)
        .slug("acme")
        .build()
        .await?;

    let repo = OrganizationRepository::new(db);
    assert!(repo.slug_taken("acme", None).await?);
    assert!(!repo.slug_taken("acme", Some(org.id)).await?);
    assert!(!repo.slug_taken("globex", None).await?);

    Ok(())
}

use super::*;

/// Tests that ancestors are returned root-first and exclude the entity.
///
/// Expected: Ok with [root, level 1, level 2] for the level 3 row
#[tokio::test]
async fn returns_root_first_chain() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let chain = factory::helpers::create_organization_chain(db, 4).await?;

    let repo = HierarchyRepository::<entity::organization::Entity>::new(db);
    let ancestors = repo.ancestors(chain[3].id).await?;

    let ids: Vec<_> = ancestors.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![chain[0].id, chain[1].id, chain[2].id]);

    Ok(())
}

/// Tests ancestors of a root.
///
/// Expected: Ok with empty result
#[tokio::test]
async fn returns_empty_for_root() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let root = factory::create_taxonomy(db).await?;

    let repo = HierarchyRepository::<entity::taxonomy::Entity>::new(db);
    let ancestors = repo.ancestors(root.id).await?;

    assert!(ancestors.is_empty());

    Ok(())
}

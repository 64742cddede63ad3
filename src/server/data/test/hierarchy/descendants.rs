use super::*;

/// Tests that descendants cover every level but never the entity itself.
///
/// Expected: Ok with the 3 rows below the root of a 4-level chain
#[tokio::test]
async fn returns_all_levels_excluding_self() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let chain = factory::helpers::create_organization_chain(db, 4).await?;

    let repo = HierarchyRepository::<entity::organization::Entity>::new(db);
    let descendants = repo.descendant_ids(chain[0].id).await?;

    assert_eq!(descendants.len(), 3);
    assert!(!descendants.contains(&chain[0].id));
    for org in &chain[1..] {
        assert!(descendants.contains(&org.id));
    }

    Ok(())
}

/// Tests descendants of a leaf.
///
/// Expected: Ok with empty result
#[tokio::test]
async fn returns_empty_for_leaf() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let chain = factory::helpers::create_organization_chain(db, 2).await?;

    let repo = HierarchyRepository::<entity::organization::Entity>::new(db);
    let descendants = repo.descendants(chain[1].id).await?;

    assert!(descendants.is_empty());

    Ok(())
}

/// Tests that the generic repository works for menus as well.
///
/// Expected: Ok with child and grandchild
#[tokio::test]
async fn works_for_menus() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let root = factory::create_menu(db).await?;
    let child = factory::menu::MenuFactory::new(db)
        .parent_id(Some(root.id))
        .build()
        .await?;
    let grandchild = factory::menu::MenuFactory::new(db)
        .parent_id(Some(child.id))
        .build()
        .await?;

    let repo = HierarchyRepository::<entity::menu::Entity>::new(db);
    let ids = repo.descendant_ids(root.id).await?;

    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&child.id));
    assert!(ids.contains(&grandchild.id));

    Ok(())
}

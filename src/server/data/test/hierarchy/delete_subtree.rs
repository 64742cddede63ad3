use super::*;

/// Tests soft-deleting a subtree of root, two children and one grandchild.
///
/// Verifies that all four rows get `deleted_at` while an unrelated root stays live.
///
/// Expected: Ok(4)
#[tokio::test]
async fn marks_whole_subtree_deleted() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (root, children) = factory::helpers::create_organization_with_children(db, 2).await?;
    let grandchild = factory::organization::OrganizationFactory::new(db)
        .parent_id(Some(children[0].id))
        .build()
        .await?;
    let unrelated = factory::create_organization(db).await?;

    let repo = HierarchyRepository::<entity::organization::Entity>::new(db);
    let deleted = repo.delete_subtree(root.id).await?;

    assert_eq!(deleted, 4);
    for id in [root.id, children[0].id, children[1].id, grandchild.id] {
        let row = entity::prelude::Organization::find_by_id(id)
            .one(db)
            .await?
            .unwrap();
        assert!(row.deleted_at.is_some());
        assert!(repo.find_live(id).await?.is_none());
    }

    let unrelated = entity::prelude::Organization::find_by_id(unrelated.id)
        .one(db)
        .await?
        .unwrap();
    assert!(unrelated.deleted_at.is_none());

    Ok(())
}

/// Tests deleting a subtree that does not exist.
///
/// Expected: Ok(0)
#[tokio::test]
async fn returns_zero_for_missing_root() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = HierarchyRepository::<entity::organization::Entity>::new(db);
    let deleted = repo.delete_subtree(uuid::Uuid::new_v4()).await?;

    assert_eq!(deleted, 0);

    Ok(())
}

use super::*;
use test_utils::factory::organization::OrganizationFactory;

/// Tests that children come back in sibling order.
///
/// Verifies ordering by `record_ordering` first, then `created_at`.
///
/// Expected: Ok with children ordered [ordering 0 older, ordering 0 newer, ordering 1]
#[tokio::test]
async fn orders_children_by_ordering_then_creation() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let root = factory::create_organization(db).await?;
    let now = Utc::now();
    let late = OrganizationFactory::new(db)
        .parent_id(Some(root.id))
        .record_ordering(1)
        .created_at(now - Duration::hours(3))
        .build()
        .await?;
    let newer = OrganizationFactory::new(db)
        .parent_id(Some(root.id))
        .created_at(now)
        .build()
        .await?;
    let older = OrganizationFactory::new(db)
        .parent_id(Some(root.id))
        .created_at(now - Duration::hours(1))
        .build()
        .await?;

    let repo = HierarchyRepository::<entity::organization::Entity>::new(db);
    let children = repo.children(Some(root.id)).await?;

    let ids: Vec<_> = children.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![older.id, newer.id, late.id]);

    Ok(())
}

/// Tests that roots are the children of `None`.
///
/// Expected: Ok with only the parentless rows
#[tokio::test]
async fn lists_roots_for_none_parent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (root, _children) = factory::helpers::create_organization_with_children(db, 2).await?;
    let other_root = factory::create_organization(db).await?;

    let repo = HierarchyRepository::<entity::organization::Entity>::new(db);
    let roots = repo.children(None).await?;

    assert_eq!(roots.len(), 2);
    assert!(roots.iter().any(|r| r.id == root.id));
    assert!(roots.iter().any(|r| r.id == other_root.id));

    Ok(())
}

/// Tests that soft-deleted children are excluded.
///
/// Expected: Ok with the remaining live child only
#[tokio::test]
async fn excludes_soft_deleted_children() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (root, children) = factory::helpers::create_organization_with_children(db, 2).await?;

    let repo = HierarchyRepository::<entity::organization::Entity>::new(db);
    repo.delete_subtree(children[0].id).await?;

    let live = repo.children(Some(root.id)).await?;
    assert_eq!(live.len(), 1);
    assert_eq!(live[0].id, children[1].id);

    Ok(())
}

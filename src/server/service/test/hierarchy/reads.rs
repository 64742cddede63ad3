use super::*;

/// Tests path, ancestors and siblings on a small tree.
///
/// Expected: root-first path ending with the entity; siblings exclude the entity
#[tokio::test]
async fn path_ancestors_and_siblings() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (root, children) = factory::helpers::create_organization_with_children(db, 3).await?;
    let leaf = factory::organization::OrganizationFactory::new(db)
        .parent_id(Some(children[1].id))
        .build()
        .await?;
    let service = HierarchyService::<Organization>::new(db);

    let path: Vec<_> = service.path(leaf.id).await?.into_iter().map(|o| o.id).collect();
    assert_eq!(path, vec![root.id, children[1].id, leaf.id]);

    let ancestors: Vec<_> = service
        .ancestors(leaf.id)
        .await?
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(ancestors, vec![root.id, children[1].id]);

    let siblings: Vec<_> = service
        .siblings(children[1].id)
        .await?
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(siblings, vec![children[0].id, children[2].id]);

    Ok(())
}

/// Tests that the tree nests every live organization once.
///
/// Expected: two roots, the first holding its three children
#[tokio::test]
async fn tree_nests_forest() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (root, _) = factory::helpers::create_organization_with_children(db, 3).await?;
    let second = factory::organization::OrganizationFactory::new(db)
        .record_ordering(1)
        .build()
        .await?;
    let service = HierarchyService::<Organization>::new(db);

    let tree = service.tree().await?;

    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].item.id, root.id);
    assert_eq!(tree[0].size(), 4);
    assert_eq!(tree[1].item.id, second.id);

    Ok(())
}

/// Tests reads on an unknown id.
///
/// Expected: Err(AppError::NotFound) for children, descendants and path
#[tokio::test]
async fn unknown_id_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = HierarchyService::<Organization>::new(db);
    let id = uuid::Uuid::new_v4();

    assert!(matches!(service.children(id).await, Err(AppError::NotFound(_))));
    assert!(matches!(service.descendants(id).await, Err(AppError::NotFound(_))));
    assert!(matches!(service.path(id).await, Err(AppError::NotFound(_))));

    Ok(())
}

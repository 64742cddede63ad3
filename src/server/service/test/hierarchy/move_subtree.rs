use super::*;

/// Tests that moving an organization under its own descendant is refused.
///
/// Expected: Err(AppError::Validation) and the parent link unchanged
#[tokio::test]
async fn refuses_cycle() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let chain = factory::helpers::create_organization_chain(db, 3).await?;
    let service = HierarchyService::<Organization>::new(db);

    let result = service.move_subtree(chain[0].id, Some(chain[2].id)).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let root = service.get(chain[0].id).await?;
    assert_eq!(root.parent_id, None);

    Ok(())
}

/// Tests that an entity cannot become its own parent.
///
/// Expected: Err(AppError::Validation)
#[tokio::test]
async fn refuses_self_parent() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let service = HierarchyService::<Organization>::new(db);

    let result = service.validate_hierarchy(org.id, org.id).await;

    assert!(matches!(result, Err(AppError::Validation(_))));

    Ok(())
}

/// Tests moving a subtree to another parent and back to the root level.
///
/// Expected: Ok, with the child's descendants following it
#[tokio::test]
async fn moves_and_detaches() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let chain = factory::helpers::create_organization_chain(db, 3).await?;
    let other = factory::create_organization(db).await?;
    let service = HierarchyService::<Organization>::new(db);

    let moved = service.move_subtree(chain[1].id, Some(other.id)).await?;
    assert_eq!(moved.parent_id, Some(other.id));

    let descendants = service.descendants(other.id).await?;
    let ids: Vec<_> = descendants.iter().map(|o| o.id).collect();
    assert!(ids.contains(&chain[1].id));
    assert!(ids.contains(&chain[2].id));

    let detached = service.move_subtree(chain[1].id, None).await?;
    assert_eq!(detached.parent_id, None);

    Ok(())
}

/// Tests moving under a missing parent.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn missing_parent_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;
    let service = HierarchyService::<Organization>::new(db);

    let result = service.move_subtree(org.id, Some(uuid::Uuid::new_v4())).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

use super::*;

fn child_params(slug: &str) -> CreateOrganizationParams {
    CreateOrganizationParams {
        parent_id: None,
        name: slug.to_string(),
        slug: slug.to_string(),
        description: None,
        email: None,
        phone: None,
        website: None,
        status: OrganizationStatus::Active,
        record_ordering: 0,
    }
}

/// Tests creating a child under a live parent.
///
/// Expected: Ok with `parent_id` set
#[tokio::test]
async fn create_child_under_live_parent() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let parent = factory::create_organization(db).await?;

    let child = OrganizationService::new(db)
        .create_child(parent.id, child_params("branch"))
        .await?;

    assert_eq!(child.parent_id, Some(parent.id));

    Ok(())
}

/// Tests creating a child under a parent removed with a plain delete.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn create_child_under_deleted_parent() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let parent = factory::create_organization(db).await?;
    let service = OrganizationService::new(db);
    service.hierarchy().delete(parent.id).await?;

    let result = service
        .create_child(parent.id, child_params("branch"))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests moving a subtree under a parent removed with a subtree delete.
///
/// Expected: Err(AppError::NotFound), the moved entity keeps its parent
#[tokio::test]
async fn move_under_deleted_parent() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let chain = factory::helpers::create_organization_chain(db, 2).await?;
    let org = factory::create_organization(db).await?;
    let service = HierarchyService::<Organization>::new(db);
    service.delete_subtree(chain[0].id).await?;

    let result = service.move_subtree(org.id, Some(chain[1].id)).await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert_eq!(service.get(org.id).await?.parent_id, None);

    Ok(())
}

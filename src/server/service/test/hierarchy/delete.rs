use super::*;

/// Tests deleting a subtree of a root, two children and one grandchild.
///
/// Expected: Ok(4), and none of the four appear in the organization list
#[tokio::test]
async fn delete_subtree_hides_all_four() -> Result<(), AppError> {
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
    let bystander = factory::create_organization(db).await?;

    let service = OrganizationService::new(db);
    let deleted = service.hierarchy().delete_subtree(root.id).await?;
    assert_eq!(deleted, 4);

    let listed = service
        .get_paginated(OrganizationFilter::default(), Pagination::default())
        .await?;
    assert_eq!(listed.total, 1);
    assert_eq!(listed.items[0].id, bystander.id);

    for id in [root.id, children[0].id, children[1].id, grandchild.id] {
        assert!(matches!(
            service.hierarchy().get(id).await,
            Err(AppError::NotFound(_))
        ));
    }

    Ok(())
}

/// Tests that a plain delete moves the children up to the deleted entity's parent.
///
/// Expected: Ok, grandchild now a child of the root
#[tokio::test]
async fn delete_reparents_children() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let chain = factory::helpers::create_organization_chain(db, 3).await?;
    let service = HierarchyService::<Organization>::new(db);

    service.delete(chain[1].id).await?;

    let children = service.children(chain[0].id).await?;
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].id, chain[2].id);

    Ok(())
}

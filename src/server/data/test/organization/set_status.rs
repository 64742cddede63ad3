use super::*;

/// Tests that setting a status leaves children untouched.
///
/// Expected: Ok with parent inactive and child still active
#[tokio::test]
async fn does_not_cascade_to_children() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (root, children) = factory::helpers::create_organization_with_children(db, 1).await?;

    let repo = OrganizationRepository::new(db);
    let updated = repo
        .set_status(root.id, OrganizationStatus::Inactive)
        .await?
        .unwrap();
    assert_eq!(updated.status, OrganizationStatus::Inactive);

    let child = repo.find_by_id(children[0].id).await?.unwrap();
    assert_eq!(child.status, OrganizationStatus::Active);

    Ok(())
}

/// Tests setting the status of a missing organization.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = OrganizationRepository::new(db);
    let result = repo
        .set_status(uuid::Uuid::new_v4(), OrganizationStatus::Suspended)
        .await?;

    assert!(result.is_none());

    Ok(())
}

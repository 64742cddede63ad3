use super::*;

/// Tests that setting the same status twice succeeds and leaves children alone.
///
/// Expected: Ok(Suspended) both times, child still active
#[tokio::test]
async fn idempotent_and_local() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let (root, children) = factory::helpers::create_organization_with_children(db, 1).await?;
    let service = OrganizationService::new(db);

    let first = service
        .set_status(root.id, OrganizationStatus::Suspended)
        .await?;
    let second = service
        .set_status(root.id, OrganizationStatus::Suspended)
        .await?;
    assert_eq!(first.status, OrganizationStatus::Suspended);
    assert_eq!(second.status, OrganizationStatus::Suspended);

    let child = service.hierarchy().get(children[0].id).await?;
    assert_eq!(child.status, OrganizationStatus::Active);

    Ok(())
}

use super::*;

/// Tests creating a root organization.
///
/// Expected: Ok with the provided fields and no deletion marker
#[tokio::test]
async fn creates_root_organization() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = OrganizationRepository::new(db);
    let org = repo.create(create_params("Acme", "acme")).await?;

    assert_eq!(org.name, "Acme");
    assert_eq!(org.slug, "acme");
    assert_eq!(org.parent_id, None);
    assert_eq!(org.status, OrganizationStatus::Active);

    let found = repo.find_by_id(org.id).await?.unwrap();
    assert_eq!(found.id, org.id);
    assert_eq!(found.slug, "acme");

    Ok(())
}

/// Tests creating a child organization.
///
/// Expected: Ok with parent_id set
#[tokio::test]
async fn creates_child_organization() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let parent = factory::create_organization(db).await?;

    let repo = OrganizationRepository::new(db);
    let mut params = create_params("Branch", "branch");
    params.parent_id = Some(parent.id);
    let child = repo.create(params).await?;

    assert_eq!(child.parent_id, Some(parent.id));

    Ok(())
}

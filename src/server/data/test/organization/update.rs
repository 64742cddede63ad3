use super::*;

/// Tests partial update.
///
/// Expected: Ok with only the provided fields changed
#[tokio::test]
async fn updates_only_provided_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let org = factory::create_organization(db).await?;

    let repo = OrganizationRepository::new(db);
    let updated = repo
        .update(
            org.id,
            UpdateOrganizationParams {
                name: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.slug, org.slug);
    assert!(updated.updated_at >= org.updated_at);

    Ok(())
}

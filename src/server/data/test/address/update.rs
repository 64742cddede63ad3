use super::*;

/// Tests promoting an existing address to primary.
///
/// Expected: Ok with the promoted address primary and the old one demoted
#[tokio::test]
async fn promotes_to_primary() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let repo = AddressRepository::new(db);
    let primary = repo.create(params(user.id, true)).await?;
    let secondary = repo.create(params(user.id, false)).await?;

    let promoted = repo
        .update(
            secondary.id,
            UpdateAddressParams {
                is_primary: Some(true),
                city: Some("Shelbyville".to_string()),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert!(promoted.is_primary);
    assert_eq!(promoted.city, "Shelbyville");
    assert!(!repo.find_by_id(primary.id).await?.unwrap().is_primary);

    Ok(())
}

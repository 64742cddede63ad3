use super::*;

/// Tests that a new primary address demotes the previous primary.
///
/// Expected: Ok with exactly one primary address for the owner
#[tokio::test]
async fn new_primary_clears_previous() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let repo = AddressRepository::new(db);
    let first = repo.create(params(user.id, true)).await?;
    let second = repo.create(params(user.id, true)).await?;

    let addresses = repo.get_by_owner(AddressableType::User, user.id).await?;
    assert_eq!(addresses.len(), 2);
    assert_eq!(addresses[0].id, second.id);
    assert!(addresses[0].is_primary);
    assert!(!repo.find_by_id(first.id).await?.unwrap().is_primary);

    Ok(())
}

/// Tests that primaries of other owners are untouched.
///
/// Expected: Ok with both owners keeping a primary address
#[tokio::test]
async fn leaves_other_owners_alone() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_all_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let alice = factory::create_user(db).await?;
    let bob = factory::create_user(db).await?;

    let repo = AddressRepository::new(db);
    let alice_address = repo.create(params(alice.id, true)).await?;
    repo.create(params(bob.id, true)).await?;

    assert!(repo.find_by_id(alice_address.id).await?.unwrap().is_primary);

    Ok(())
}

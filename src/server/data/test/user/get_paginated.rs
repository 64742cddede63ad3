use super::*;

/// Tests search filtering and total count.
///
/// Expected: Ok with only matching users
#[tokio::test]
async fn filters_by_search_term() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .username("alice")
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .username("alina")
        .build()
        .await?;
    factory::user::UserFactory::new(db)
        .username("bob")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let page = repo
        .get_paginated(Some("ali"), Pagination::default())
        .await?;

    assert_eq!(page.total, 2);
    let names: Vec<_> = page.items.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["alice", "alina"]);

    Ok(())
}

use super::*;

/// Tests that a failing engine falls back to the database.
///
/// Expected: Ok with source Database and the matching user
#[tokio::test]
async fn engine_failure_uses_database() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::user::UserFactory::new(db)
        .username("searchable")
        .build()
        .await?;
    factory::create_user(db).await?;

    let engine = StubEngine { fail: true };
    let service = SearchService::new(db, Some(&engine));
    let query = SearchQuery::new("searchable", None, None)?;

    let page = service.search(SearchKind::Users, &query).await?;

    assert_eq!(page.source, SearchSource::Database);
    assert_eq!(page.total, 1);
    assert_eq!(page.hits[0].id, user.id);

    Ok(())
}

/// Tests that a healthy engine answers directly.
///
/// Expected: Ok with source Engine
#[tokio::test]
async fn healthy_engine_answers() -> Result<(), AppError> {
    let test = TestBuilder::new().with_auth_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let engine = StubEngine { fail: false };
    let service = SearchService::new(db, Some(&engine));
    let query = SearchQuery::new("anything", None, None)?;

    let page = service.search(SearchKind::Posts, &query).await?;

    assert_eq!(page.source, SearchSource::Engine);
    assert_eq!(page.hits[0].title, "from engine");

    Ok(())
}

/// Tests that fan-out reports a failing type instead of dropping it.
///
/// The tag table is absent, so the database search for tags fails.
///
/// Expected: every type present in statuses, only tags failed
#[tokio::test]
async fn fan_out_reports_failures() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .with_table(entity::prelude::Post)
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = SearchService::new(db, None);
    let query = SearchQuery::new("rust", None, None)?;

    let fan_out = service.search_all(&query).await;

    assert_eq!(fan_out.statuses.len(), SearchKind::ALL.len());
    for kind in SearchKind::ALL {
        assert_eq!(fan_out.statuses[&kind], kind != SearchKind::Tags, "{}", kind);
    }
    assert!(fan_out.results[&SearchKind::Tags].is_empty());

    Ok(())
}

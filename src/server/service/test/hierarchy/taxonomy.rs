use super::*;

fn params(parent_id: Option<uuid::Uuid>, slug: &str, kind: &str) -> CreateTaxonomyParams {
    CreateTaxonomyParams {
        parent_id,
        name: slug.to_string(),
        slug: slug.to_string(),
        kind: kind.to_string(),
        description: None,
        record_ordering: 0,
    }
}

/// Tests that a taxonomy term must share its parent's kind.
///
/// Expected: Err(AppError::Validation)
#[tokio::test]
async fn child_must_match_parent_kind() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = TaxonomyService::new(db);
    let parent = service.create(params(None, "news", "category")).await?;

    let result = service
        .create_child(parent.id, params(None, "rust", "tag"))
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));

    Ok(())
}

/// Tests that slugs are unique per kind only.
///
/// Expected: Ok for the same slug in another kind, Err(AppError::Conflict) within a kind
#[tokio::test]
async fn slug_unique_per_kind() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = TaxonomyService::new(db);
    service.create(params(None, "rust", "category")).await?;
    service.create(params(None, "rust", "tag")).await?;

    let result = service.create(params(None, "rust", "category")).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    Ok(())
}

/// Tests creating a child under a missing parent.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn missing_parent_is_not_found() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = TaxonomyService::new(db)
        .create_child(uuid::Uuid::new_v4(), params(None, "orphan", "category"))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests that a move across kinds is refused like a cross-kind create.
///
/// Expected: Err(AppError::Validation), parent unchanged
#[tokio::test]
async fn move_refuses_other_kind() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_hierarchy_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let service = TaxonomyService::new(db);
    let category = service.create(params(None, "guides", "category")).await?;
    let tag = service.create(params(None, "async", "tag")).await?;

    let result = service
        .hierarchy()
        .move_subtree(tag.id, Some(category.id))
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(service.hierarchy().get(tag.id).await?.parent_id, None);

    Ok(())
}

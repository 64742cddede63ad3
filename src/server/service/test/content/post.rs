use super::*;

/// Tests that publishing stamps `published_at` once and unpublish returns to draft.
///
/// Expected: published_at unchanged after a second publish
#[tokio::test]
async fn publish_cycle() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_auth_tables()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let service = PostService::new(db);
    let post = service
        .create(post_params(author.id, "hello", vec![]))
        .await?;
    assert_eq!(post.status, PostStatus::Draft);

    let published = service.publish(post.id).await?;
    let stamped = published.published_at;
    assert!(stamped.is_some());

    let draft = service.unpublish(post.id).await?;
    assert_eq!(draft.status, PostStatus::Draft);

    let republished = service.publish(post.id).await?;
    assert_eq!(republished.published_at, stamped);

    Ok(())
}

/// Tests slug conflicts and unknown tags on create.
///
/// Expected: Err(AppError::Conflict) then Err(AppError::NotFound)
#[tokio::test]
async fn create_checks_slug_and_tags() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_auth_tables()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let service = PostService::new(db);
    service
        .create(post_params(author.id, "taken", vec![]))
        .await?;

    let duplicate = service
        .create(post_params(author.id, "taken", vec![]))
        .await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));

    let unknown_tag = service
        .create(post_params(author.id, "fresh", vec![uuid::Uuid::new_v4()]))
        .await;
    assert!(matches!(unknown_tag, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests that deleting a tag detaches it from posts.
///
/// Expected: post still found by slug, without the tag
#[tokio::test]
async fn tag_delete_detaches() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_auth_tables()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let tag = factory::create_tag(db).await?;
    let service = PostService::new(db);
    service
        .create(post_params(author.id, "tagged", vec![tag.id]))
        .await?;

    TagService::new(db).delete(tag.id).await?;

    let post = service.get_by_slug("tagged").await?;
    assert!(post.tags.is_empty());

    Ok(())
}

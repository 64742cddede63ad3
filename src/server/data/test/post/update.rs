use super::*;

/// Tests that publishing stamps `published_at` only the first time.
///
/// Expected: Ok with the original publish timestamp kept after unpublish and republish
#[tokio::test]
async fn stamps_published_at_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_auth_tables()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let post = factory::create_post(db, author.id).await?;

    let repo = PostRepository::new(db);
    let publish = || UpdatePostParams {
        status: Some(PostStatus::Published),
        ..Default::default()
    };

    let first = repo.update(post.id, publish()).await?.unwrap();
    let stamped = first.published_at.unwrap();

    repo.update(
        post.id,
        UpdatePostParams {
            status: Some(PostStatus::Draft),
            ..Default::default()
        },
    )
    .await?;
    let again = repo.update(post.id, publish()).await?.unwrap();

    assert_eq!(again.status, PostStatus::Published);
    assert_eq!(again.published_at, Some(stamped));

    Ok(())
}

/// Tests replacing the tag list.
///
/// Expected: Ok with only the new tag attached
#[tokio::test]
async fn replaces_tags() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_auth_tables()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let old_tag = factory::create_tag(db).await?;
    let new_tag = factory::create_tag(db).await?;

    let repo = PostRepository::new(db);
    let post = repo
        .create(CreatePostParams {
            author_id: author.id,
            title: "Post".to_string(),
            slug: "post".to_string(),
            content: "Body".to_string(),
            excerpt: None,
            tag_ids: vec![old_tag.id],
        })
        .await?;

    let updated = repo
        .update(
            post.id,
            UpdatePostParams {
                tag_ids: Some(vec![new_tag.id]),
                ..Default::default()
            },
        )
        .await?
        .unwrap();

    assert_eq!(updated.tags.len(), 1);
    assert_eq!(updated.tags[0].id, new_tag.id);

    Ok(())
}

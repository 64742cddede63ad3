use super::*;

/// Tests filtering posts by tag and by status.
///
/// Expected: Ok with only the tagged post, then only the published post
#[tokio::test]
async fn filters_by_tag_and_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_auth_tables()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let tag = factory::create_tag(db).await?;

    let repo = PostRepository::new(db);
    let tagged = repo
        .create(CreatePostParams {
            author_id: author.id,
            title: "Tagged".to_string(),
            slug: "tagged".to_string(),
            content: "Body".to_string(),
            excerpt: None,
            tag_ids: vec![tag.id],
        })
        .await?;
    let published = factory::post::PostFactory::new(db, author.id)
        .status("published")
        .build()
        .await?;

    let by_tag = repo
        .get_paginated(
            PostFilter {
                tag_id: Some(tag.id),
                ..Default::default()
            },
            Pagination::default(),
        )
        .await?;
    assert_eq!(by_tag.total, 1);
    assert_eq!(by_tag.items[0].id, tagged.id);
    assert_eq!(by_tag.items[0].tags.len(), 1);

    let by_status = repo
        .get_paginated(
            PostFilter {
                status: Some(PostStatus::Published),
                ..Default::default()
            },
            Pagination::default(),
        )
        .await?;
    assert_eq!(by_status.total, 1);
    assert_eq!(by_status.items[0].id, published.id);

    Ok(())
}

/// Tests that soft-deleted posts are not listed.
///
/// Expected: Ok with total 0
#[tokio::test]
async fn excludes_deleted_posts() -> Result<(), DbErr> {
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
    assert!(repo.soft_delete(post.id).await?);

    let page = repo
        .get_paginated(PostFilter::default(), Pagination::default())
        .await?;
    assert_eq!(page.total, 0);
    assert!(repo.find_by_id(post.id).await?.is_none());

    Ok(())
}

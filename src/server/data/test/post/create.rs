use super::*;

/// Tests creating a post with tags.
///
/// Expected: Ok with draft status and tags attached in name order
#[tokio::test]
async fn creates_draft_with_tags() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_auth_tables()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let rust = factory::tag::create_tag_named(db, "Rust", "rust").await?;
    let axum = factory::tag::create_tag_named(db, "Axum", "axum").await?;

    let repo = PostRepository::new(db);
    let post = repo
        .create(CreatePostParams {
            author_id: author.id,
            title: "Hello".to_string(),
            slug: "hello".to_string(),
            content: "World".to_string(),
            excerpt: None,
            tag_ids: vec![rust.id, axum.id, rust.id],
        })
        .await?;

    assert_eq!(post.status, PostStatus::Draft);
    assert!(post.published_at.is_none());
    let tag_names: Vec<_> = post.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(tag_names, vec!["Axum", "Rust"]);
    assert!(repo.slug_taken("hello", None).await?);

    Ok(())
}

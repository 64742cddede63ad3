use super::*;

/// Tests that only the author may edit or delete a comment.
///
/// Expected: Err(AuthError::NotOwner) for another user, Ok for the author
#[tokio::test]
async fn only_author_may_modify() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_auth_tables()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let stranger = factory::create_user(db).await?;
    let post = factory::create_post(db, author.id).await?;

    let service = CommentService::new(db);
    let comment = service
        .create(CreateCommentParams {
            post_id: post.id,
            author_id: author.id,
            parent_id: None,
            content: "First".to_string(),
        })
        .await?;

    let edit = service
        .update(stranger.id, comment.id, "Hijacked".to_string())
        .await;
    assert!(matches!(edit, Err(AppError::AuthErr(AuthError::NotOwner(_)))));

    let delete = service.delete(stranger.id, comment.id).await;
    assert!(matches!(delete, Err(AppError::AuthErr(AuthError::NotOwner(_)))));

    let edited = service
        .update(author.id, comment.id, "Edited".to_string())
        .await?;
    assert_eq!(edited.content, "Edited");

    service.delete(author.id, comment.id).await?;
    assert!(matches!(
        service.get(comment.id).await,
        Err(AppError::NotFound(_))
    ));

    Ok(())
}

/// Tests that a reply must target a comment on the same post.
///
/// Expected: Err(AppError::Validation)
#[tokio::test]
async fn parent_must_share_post() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_auth_tables()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let first = factory::create_post(db, author.id).await?;
    let second = factory::create_post(db, author.id).await?;

    let service = CommentService::new(db);
    let parent = service
        .create(CreateCommentParams {
            post_id: first.id,
            author_id: author.id,
            parent_id: None,
            content: "Parent".to_string(),
        })
        .await?;

    let result = service
        .create(CreateCommentParams {
            post_id: second.id,
            author_id: author.id,
            parent_id: Some(parent.id),
            content: "Reply".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AppError::Validation(_))));

    Ok(())
}

/// Tests that listing shows approved comments unless a status is requested.
///
/// Expected: pending comment hidden by default, visible with status=pending
#[tokio::test]
async fn lists_approved_by_default() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_auth_tables()
        .with_content_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let author = factory::create_user(db).await?;
    let post = factory::create_post(db, author.id).await?;

    let service = CommentService::new(db);
    let pending = service
        .create(CreateCommentParams {
            post_id: post.id,
            author_id: author.id,
            parent_id: None,
            content: "Pending".to_string(),
        })
        .await?;
    let approved = service
        .create(CreateCommentParams {
            post_id: post.id,
            author_id: author.id,
            parent_id: None,
            content: "Approved".to_string(),
        })
        .await?;
    service
        .set_status(approved.id, CommentStatus::Approved)
        .await?;

    let visible = service
        .get_by_post(post.id, None, Pagination::default())
        .await?;
    assert_eq!(visible.total, 1);
    assert_eq!(visible.items[0].id, approved.id);

    let queued = service
        .get_by_post(post.id, Some(CommentStatus::Pending), Pagination::default())
        .await?;
    assert_eq!(queued.items[0].id, pending.id);

    Ok(())
}

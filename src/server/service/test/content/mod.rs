use super::*;
use crate::server::{
    model::{
        comment::{CommentStatus, CreateCommentParams},
        pagination::Pagination,
        post::{CreatePostParams, PostStatus},
    },
    service::{comment::CommentService, post::PostService, tag::TagService},
};

mod comment;
mod post;

fn post_params(author_id: uuid::Uuid, slug: &str, tag_ids: Vec<uuid::Uuid>) -> CreatePostParams {
    CreatePostParams {
        author_id,
        title: slug.to_string(),
        slug: slug.to_string(),
        content: "Body".to_string(),
        excerpt: None,
        tag_ids,
    }
}

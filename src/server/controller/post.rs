use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        post::{CreatePostDto, PostDto, UpdatePostDto},
    },
    server::{
        controller::{comment, PaginationParams},
        error::AppError,
        middleware::auth::{AuthGuard, AuthUser, Permission},
        model::{
            post::{CreatePostParams, Post, PostFilter, UpdatePostParams},
            rbac::Action,
        },
        service::post::PostService,
        state::AppState,
        util::parse::{parse_optional_uuid, parse_uuid},
    },
};

pub static POST_TAG: &str = "posts";
const RESOURCE: &str = "posts";

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_posts, create_post))
        .routes(routes!(get_post, update_post, delete_post))
        .routes(routes!(get_post_by_slug))
        .routes(routes!(publish_post))
        .routes(routes!(unpublish_post))
        .merge(comment::post_routes())
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PostQuery {
    /// `draft`, `published` or `archived`.
    pub status: Option<String>,
    pub author_id: Option<String>,
    pub tag_id: Option<String>,
}

impl PostQuery {
    fn into_filter(self) -> Result<PostFilter, AppError> {
        Ok(PostFilter {
            status: self.status.as_deref().map(str::parse).transpose()?,
            author_id: parse_optional_uuid(self.author_id.as_deref())?,
            tag_id: parse_optional_uuid(self.tag_id.as_deref())?,
        })
    }
}

/// GET /api/v1/posts - List posts
#[utoipa::path(
    get,
    path = "/",
    tag = POST_TAG,
    params(PaginationParams, PostQuery),
    responses(
        (status = 200, description = "Page of posts", body = [PostDto]),
        (status = 400, description = "Malformed filter", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_posts(
    State(state): State<AppState>,
    user: AuthUser,
    Query(page): Query<PaginationParams>,
    Query(query): Query<PostQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = query.into_filter()?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Read)])
        .await?;

    let posts = PostService::new(&state.db)
        .get_paginated(filter, page.pagination())
        .await?;

    let (posts, pagination) = posts.into_dto(Post::into_dto);

    Ok((
        StatusCode::OK,
        Json(ApiResponse::paginated("Posts retrieved", posts, pagination)),
    ))
}

/// POST /api/v1/posts - Create a draft authored by the caller
#[utoipa::path(
    post,
    path = "/",
    tag = POST_TAG,
    request_body = CreatePostDto,
    responses(
        (status = 201, description = "Post created", body = PostDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 404, description = "Unknown tag", body = ErrorDto),
        (status = 409, description = "Slug taken", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_post(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreatePostDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Create)])
        .await?;

    let post = PostService::new(&state.db)
        .create(CreatePostParams::from_dto(user.id(), payload)?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Post created", post.into_dto())),
    ))
}

/// GET /api/v1/posts/{id}
#[utoipa::path(
    get,
    path = "/{id}",
    tag = POST_TAG,
    params(("id" = String, Path, description = "Post UUID")),
    responses(
        (status = 200, description = "Post", body = PostDto),
        (status = 404, description = "Post not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_post(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Read)])
        .await?;

    let post = PostService::new(&state.db).get(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Post retrieved", post.into_dto())),
    ))
}

/// GET /api/v1/posts/slug/{slug}
#[utoipa::path(
    get,
    path = "/slug/{slug}",
    tag = POST_TAG,
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Post", body = PostDto),
        (status = 404, description = "Post not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_post_by_slug(
    State(state): State<AppState>,
    user: AuthUser,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Read)])
        .await?;

    let post = PostService::new(&state.db).get_by_slug(&slug).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Post retrieved", post.into_dto())),
    ))
}

/// PUT /api/v1/posts/{id} - Update; `tag_ids` replaces the tag set when present
#[utoipa::path(
    put,
    path = "/{id}",
    tag = POST_TAG,
    params(("id" = String, Path, description = "Post UUID")),
    request_body = UpdatePostDto,
    responses(
        (status = 200, description = "Post updated", body = PostDto),
        (status = 404, description = "Post or tag not found", body = ErrorDto),
        (status = 409, description = "Slug taken", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_post(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdatePostDto>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Update)])
        .await?;

    let post = PostService::new(&state.db)
        .update(id, UpdatePostParams::from_dto(payload)?)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Post updated", post.into_dto())),
    ))
}

/// DELETE /api/v1/posts/{id} - Soft-delete a post
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = POST_TAG,
    params(("id" = String, Path, description = "Post UUID")),
    responses(
        (status = 200, description = "Post deleted"),
        (status = 404, description = "Post not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_post(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Delete)])
        .await?;

    PostService::new(&state.db).delete(id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::empty("Post deleted"))))
}

/// POST /api/v1/posts/{id}/publish
///
/// `published_at` is set on the first publish and kept afterwards.
#[utoipa::path(
    post,
    path = "/{id}/publish",
    tag = POST_TAG,
    params(("id" = String, Path, description = "Post UUID")),
    responses(
        (status = 200, description = "Post published", body = PostDto),
        (status = 404, description = "Post not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn publish_post(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Update)])
        .await?;

    let post = PostService::new(&state.db).publish(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Post published", post.into_dto())),
    ))
}

/// POST /api/v1/posts/{id}/unpublish - Back to draft
#[utoipa::path(
    post,
    path = "/{id}/unpublish",
    tag = POST_TAG,
    params(("id" = String, Path, description = "Post UUID")),
    responses(
        (status = 200, description = "Post unpublished", body = PostDto),
        (status = 404, description = "Post not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn unpublish_post(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Update)])
        .await?;

    let post = PostService::new(&state.db).unpublish(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Post unpublished", post.into_dto())),
    ))
}

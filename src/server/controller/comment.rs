//! Comments are reached two ways: listed and created under their post, and addressed
//! directly by id for edits and moderation.

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
        comment::{CommentDto, CommentStatusDto, CreateCommentDto, UpdateCommentDto},
    },
    server::{
        controller::{post::POST_TAG, PaginationParams},
        error::AppError,
        middleware::auth::{AuthGuard, AuthUser, Permission},
        model::{
            comment::{Comment, CommentStatus, CreateCommentParams},
            rbac::Action,
        },
        service::comment::CommentService,
        state::AppState,
        util::parse::parse_uuid,
    },
};

pub static COMMENT_TAG: &str = "comments";
const RESOURCE: &str = "comments";

/// Routes mounted under `/api/v1/comments`.
pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_comment, update_comment, delete_comment))
        .routes(routes!(set_comment_status))
}

/// Routes merged into the posts router.
pub fn post_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(get_post_comments, create_comment))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CommentQuery {
    /// `pending`, `approved` or `rejected`; defaults to `approved`.
    pub status: Option<String>,
}

/// GET /api/v1/posts/{id}/comments
#[utoipa::path(
    get,
    path = "/{id}/comments",
    tag = POST_TAG,
    params(
        ("id" = String, Path, description = "Post UUID"),
        PaginationParams,
        CommentQuery
    ),
    responses(
        (status = 200, description = "Page of comments", body = [CommentDto]),
        (status = 404, description = "Post not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_post_comments(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
    Query(page): Query<PaginationParams>,
    Query(query): Query<CommentQuery>,
) -> Result<impl IntoResponse, AppError> {
    let post_id = parse_uuid(&id)?;
    let status: Option<CommentStatus> = query.status.as_deref().map(str::parse).transpose()?;

    let comments = CommentService::new(&state.db)
        .get_by_post(post_id, status, page.pagination())
        .await?;

    let (comments, pagination) = comments.into_dto(Comment::into_dto);

    Ok((
        StatusCode::OK,
        Json(ApiResponse::paginated(
            "Comments retrieved",
            comments,
            pagination,
        )),
    ))
}

/// POST /api/v1/posts/{id}/comments - Comment on a post, optionally as a reply
#[utoipa::path(
    post,
    path = "/{id}/comments",
    tag = POST_TAG,
    params(("id" = String, Path, description = "Post UUID")),
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment created", body = CommentDto),
        (status = 400, description = "Blank content or parent on another post", body = ErrorDto),
        (status = 404, description = "Post or parent not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<CreateCommentDto>,
) -> Result<impl IntoResponse, AppError> {
    let post_id = parse_uuid(&id)?;

    let comment = CommentService::new(&state.db)
        .create(CreateCommentParams {
            post_id,
            author_id: user.id(),
            parent_id: payload.parent_id,
            content: payload.content,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Comment created", comment.into_dto())),
    ))
}

/// GET /api/v1/comments/{id}
#[utoipa::path(
    get,
    path = "/{id}",
    tag = COMMENT_TAG,
    params(("id" = String, Path, description = "Comment UUID")),
    responses(
        (status = 200, description = "Comment", body = CommentDto),
        (status = 404, description = "Comment not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_comment(
    State(state): State<AppState>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    let comment = CommentService::new(&state.db).get(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Comment retrieved", comment.into_dto())),
    ))
}

/// PUT /api/v1/comments/{id} - Edit the content; author only
#[utoipa::path(
    put,
    path = "/{id}",
    tag = COMMENT_TAG,
    params(("id" = String, Path, description = "Comment UUID")),
    request_body = UpdateCommentDto,
    responses(
        (status = 200, description = "Comment updated", body = CommentDto),
        (status = 403, description = "Not the author", body = ErrorDto),
        (status = 404, description = "Comment not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateCommentDto>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    let comment = CommentService::new(&state.db)
        .update(user.id(), id, payload.content)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Comment updated", comment.into_dto())),
    ))
}

/// DELETE /api/v1/comments/{id} - Soft-delete; author only
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = COMMENT_TAG,
    params(("id" = String, Path, description = "Comment UUID")),
    responses(
        (status = 200, description = "Comment deleted"),
        (status = 403, description = "Not the author", body = ErrorDto),
        (status = 404, description = "Comment not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    CommentService::new(&state.db).delete(user.id(), id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::empty("Comment deleted"))))
}

/// PUT /api/v1/comments/{id}/status - Moderate a comment
#[utoipa::path(
    put,
    path = "/{id}/status",
    tag = COMMENT_TAG,
    params(("id" = String, Path, description = "Comment UUID")),
    request_body = CommentStatusDto,
    responses(
        (status = 200, description = "Status set", body = CommentDto),
        (status = 400, description = "Unknown status", body = ErrorDto),
        (status = 403, description = "Missing comments:update", body = ErrorDto),
        (status = 404, description = "Comment not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_comment_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<CommentStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;
    let status: CommentStatus = payload.status.parse()?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Update)])
        .await?;

    let comment = CommentService::new(&state.db).set_status(id, status).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Comment status updated", comment.into_dto())),
    ))
}

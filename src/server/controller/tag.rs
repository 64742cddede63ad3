use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        tag::{CreateTagDto, TagDto, UpdateTagDto},
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::{AuthGuard, AuthUser, Permission},
        model::{
            rbac::Action,
            tag::{CreateTagParams, Tag, UpdateTagParams},
        },
        service::tag::TagService,
        state::AppState,
        util::parse::parse_uuid,
    },
};

pub static TAG_TAG: &str = "tags";
const RESOURCE: &str = "tags";

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_tags, create_tag))
        .routes(routes!(get_tag, update_tag, delete_tag))
        .routes(routes!(get_tag_by_slug))
}

/// GET /api/v1/tags
#[utoipa::path(
    get,
    path = "/",
    tag = TAG_TAG,
    params(PaginationParams),
    responses((status = 200, description = "Page of tags", body = [TagDto])),
    security(("bearer_auth" = []))
)]
pub async fn get_tags(
    State(state): State<AppState>,
    user: AuthUser,
    Query(page): Query<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Read)])
        .await?;

    let tags = TagService::new(&state.db)
        .get_paginated(page.pagination())
        .await?;

    let (tags, pagination) = tags.into_dto(Tag::into_dto);

    Ok((
        StatusCode::OK,
        Json(ApiResponse::paginated("Tags retrieved", tags, pagination)),
    ))
}

/// POST /api/v1/tags
#[utoipa::path(
    post,
    path = "/",
    tag = TAG_TAG,
    request_body = CreateTagDto,
    responses(
        (status = 201, description = "Tag created", body = TagDto),
        (status = 400, description = "Blank name", body = ErrorDto),
        (status = 409, description = "Slug taken", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_tag(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateTagDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Create)])
        .await?;

    let tag = TagService::new(&state.db)
        .create(CreateTagParams::from_dto(payload)?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Tag created", tag.into_dto())),
    ))
}

/// GET /api/v1/tags/{id}
#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG_TAG,
    params(("id" = String, Path, description = "Tag UUID")),
    responses(
        (status = 200, description = "Tag", body = TagDto),
        (status = 404, description = "Tag not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_tag(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Read)])
        .await?;

    let tag = TagService::new(&state.db).get(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Tag retrieved", tag.into_dto())),
    ))
}

/// GET /api/v1/tags/slug/{slug}
#[utoipa::path(
    get,
    path = "/slug/{slug}",
    tag = TAG_TAG,
    params(("slug" = String, Path, description = "Tag slug")),
    responses(
        (status = 200, description = "Tag", body = TagDto),
        (status = 404, description = "Tag not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_tag_by_slug(
    State(state): State<AppState>,
    user: AuthUser,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Read)])
        .await?;

    let tag = TagService::new(&state.db).get_by_slug(&slug).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Tag retrieved", tag.into_dto())),
    ))
}

/// PUT /api/v1/tags/{id}
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAG_TAG,
    params(("id" = String, Path, description = "Tag UUID")),
    request_body = UpdateTagDto,
    responses(
        (status = 200, description = "Tag updated", body = TagDto),
        (status = 404, description = "Tag not found", body = ErrorDto),
        (status = 409, description = "Slug taken", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_tag(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTagDto>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Update)])
        .await?;

    let tag = TagService::new(&state.db)
        .update(id, UpdateTagParams::from_dto(payload)?)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Tag updated", tag.into_dto())),
    ))
}

/// DELETE /api/v1/tags/{id} - Delete a tag and detach it from posts
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = TAG_TAG,
    params(("id" = String, Path, description = "Tag UUID")),
    responses(
        (status = 200, description = "Tag deleted"),
        (status = 404, description = "Tag not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_tag(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Delete)])
        .await?;

    TagService::new(&state.db).delete(id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::empty("Tag deleted"))))
}

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, Query, State},
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
        media::{MediaDto, UploadMediaForm},
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::{AuthGuard, AuthUser, Permission},
        model::{
            media::{Media, UploadParams},
            rbac::Action,
        },
        service::media::MediaService,
        state::AppState,
        util::parse::{parse_optional_uuid, parse_uuid},
    },
};

pub static MEDIA_TAG: &str = "media";
const RESOURCE: &str = "media";

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_media_list, upload_media))
        .routes(routes!(get_media, delete_media))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MediaQuery {
    pub uploaded_by: Option<String>,
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::validation(format!("Malformed multipart body: {}", err.body_text()))
    }
}

/// GET /api/v1/media
#[utoipa::path(
    get,
    path = "/",
    tag = MEDIA_TAG,
    params(PaginationParams, MediaQuery),
    responses((status = 200, description = "Page of media", body = [MediaDto])),
    security(("bearer_auth" = []))
)]
pub async fn get_media_list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(page): Query<PaginationParams>,
    Query(query): Query<MediaQuery>,
) -> Result<impl IntoResponse, AppError> {
    let uploaded_by = parse_optional_uuid(query.uploaded_by.as_deref())?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Read)])
        .await?;

    let media = MediaService::new(&state.db, &*state.storage)
        .get_paginated(uploaded_by, page.pagination())
        .await?;

    let (media, pagination) = media.into_dto(Media::into_dto);

    Ok((
        StatusCode::OK,
        Json(ApiResponse::paginated("Media retrieved", media, pagination)),
    ))
}

/// POST /api/v1/media - Upload one file
///
/// Expects a multipart body with a `file` part and an optional `alt_text` part. The
/// content type of the `file` part decides acceptance.
#[utoipa::path(
    post,
    path = "/",
    tag = MEDIA_TAG,
    request_body(content = UploadMediaForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Media stored", body = MediaDto),
        (status = 400, description = "Missing or empty file part", body = ErrorDto),
        (status = 413, description = "File larger than 50 MiB", body = ErrorDto),
        (status = 415, description = "Content type not allowed", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn upload_media(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Create)])
        .await?;

    let mut file = None;
    let mut alt_text = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;

                file = Some((file_name, content_type, bytes.to_vec()));
            }
            Some("alt_text") => {
                let text = field.text().await.map_err(multipart_error)?;
                alt_text = Some(text).filter(|t| !t.trim().is_empty());
            }
            _ => {}
        }
    }

    let Some((file_name, content_type, bytes)) = file else {
        return Err(AppError::validation("Multipart field 'file' is required"));
    };

    let media = MediaService::new(&state.db, &*state.storage)
        .upload(UploadParams {
            uploaded_by: user.id(),
            file_name,
            content_type,
            bytes,
            alt_text,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Media uploaded", media.into_dto())),
    ))
}

/// GET /api/v1/media/{id}
#[utoipa::path(
    get,
    path = "/{id}",
    tag = MEDIA_TAG,
    params(("id" = String, Path, description = "Media UUID")),
    responses(
        (status = 200, description = "Media metadata", body = MediaDto),
        (status = 404, description = "Media not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_media(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Read)])
        .await?;

    let media = MediaService::new(&state.db, &*state.storage).get(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Media retrieved", media.into_dto())),
    ))
}

/// DELETE /api/v1/media/{id} - Remove the stored object and its row
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = MEDIA_TAG,
    params(("id" = String, Path, description = "Media UUID")),
    responses(
        (status = 200, description = "Media deleted"),
        (status = 404, description = "Media not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_media(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Delete)])
        .await?;

    MediaService::new(&state.db, &*state.storage)
        .delete(id)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::empty("Media deleted"))))
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        backup::{BackupCleanupDto, BackupDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, AuthUser, Permission},
        model::{backup::BackupFile, rbac::Action},
        service::backup::BackupService,
        state::AppState,
    },
};

pub static BACKUP_TAG: &str = "backups";
const RESOURCE: &str = "backups";

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_backups, create_backup))
        .routes(routes!(cleanup_backups))
        .routes(routes!(delete_backup))
}

fn service(state: &AppState) -> BackupService<'_> {
    BackupService::new(
        &state.db,
        &state.config.backup_dir,
        state.config.backup_retention_days,
    )
}

/// GET /api/v1/backups - Newest first
#[utoipa::path(
    get,
    path = "/",
    tag = BACKUP_TAG,
    responses((status = 200, description = "Backup files", body = [BackupDto])),
    security(("bearer_auth" = []))
)]
pub async fn get_backups(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Read)])
        .await?;

    let backups = service(&state).list().await?;
    let backups: Vec<BackupDto> = backups.into_iter().map(BackupFile::into_dto).collect();

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Backups retrieved", backups)),
    ))
}

/// POST /api/v1/backups - Snapshot the database
#[utoipa::path(
    post,
    path = "/",
    tag = BACKUP_TAG,
    responses(
        (status = 201, description = "Backup created", body = BackupDto),
        (status = 409, description = "A backup with this timestamp exists", body = ErrorDto),
        (status = 503, description = "Database backend cannot be backed up", body = ErrorDto),
        (status = 504, description = "Backup timed out", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_backup(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Create)])
        .await?;

    let backup = service(&state).create().await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Backup created", backup.into_dto())),
    ))
}

/// POST /api/v1/backups/cleanup - Remove backups past the retention window
#[utoipa::path(
    post,
    path = "/cleanup",
    tag = BACKUP_TAG,
    responses((status = 200, description = "Number of files removed", body = BackupCleanupDto)),
    security(("bearer_auth" = []))
)]
pub async fn cleanup_backups(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Delete)])
        .await?;

    let removed = service(&state).cleanup().await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Backup cleanup finished",
            BackupCleanupDto { removed },
        )),
    ))
}

/// DELETE /api/v1/backups/{name}
#[utoipa::path(
    delete,
    path = "/{name}",
    tag = BACKUP_TAG,
    params(("name" = String, Path, description = "Backup file name, e.g. backup-20240101-030000.db")),
    responses(
        (status = 200, description = "Backup deleted"),
        (status = 400, description = "Not a backup file name", body = ErrorDto),
        (status = 404, description = "Backup not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_backup(
    State(state): State<AppState>,
    user: AuthUser,
    Path(name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Delete)])
        .await?;

    service(&state).delete(&name).await?;

    Ok((StatusCode::OK, Json(ApiResponse::empty("Backup deleted"))))
}

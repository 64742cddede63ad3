//! In-app notifications. Every endpoint except creation is scoped to the caller's own
//! notifications; another user's id behaves as if it did not exist.

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
        notification::{CreateNotificationDto, MarkedReadDto, NotificationDto, UnreadCountDto},
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::{AuthGuard, AuthUser, Permission},
        model::{
            notification::{CreateNotificationParams, Notification},
            rbac::Action,
        },
        service::notification::NotificationService,
        state::AppState,
        util::parse::parse_uuid,
    },
};

pub static NOTIFICATION_TAG: &str = "notifications";
const RESOURCE: &str = "notifications";

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_notifications, create_notification))
        .routes(routes!(get_unread_count))
        .routes(routes!(mark_all_read))
        .routes(routes!(mark_read))
        .routes(routes!(delete_notification))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NotificationQuery {
    #[serde(default)]
    pub unread_only: bool,
}

/// GET /api/v1/notifications - The caller's notifications, newest first
#[utoipa::path(
    get,
    path = "/",
    tag = NOTIFICATION_TAG,
    params(PaginationParams, NotificationQuery),
    responses((status = 200, description = "Page of notifications", body = [NotificationDto])),
    security(("bearer_auth" = []))
)]
pub async fn get_notifications(
    State(state): State<AppState>,
    user: AuthUser,
    Query(page): Query<PaginationParams>,
    Query(query): Query<NotificationQuery>,
) -> Result<impl IntoResponse, AppError> {
    let notifications = NotificationService::new(&state.db)
        .get_for_user(user.id(), query.unread_only, page.pagination())
        .await?;

    let (notifications, pagination) = notifications.into_dto(Notification::into_dto);

    Ok((
        StatusCode::OK,
        Json(ApiResponse::paginated(
            "Notifications retrieved",
            notifications,
            pagination,
        )),
    ))
}

/// POST /api/v1/notifications - Notify a user
#[utoipa::path(
    post,
    path = "/",
    tag = NOTIFICATION_TAG,
    request_body = CreateNotificationDto,
    responses(
        (status = 201, description = "Notification created", body = NotificationDto),
        (status = 403, description = "Missing notifications:create", body = ErrorDto),
        (status = 404, description = "Recipient not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_notification(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateNotificationDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Create)])
        .await?;

    let notification = NotificationService::new(&state.db)
        .create(CreateNotificationParams::from_dto(payload)?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Notification created",
            notification.into_dto(),
        )),
    ))
}

/// GET /api/v1/notifications/unread-count
#[utoipa::path(
    get,
    path = "/unread-count",
    tag = NOTIFICATION_TAG,
    responses((status = 200, description = "Unread count", body = UnreadCountDto)),
    security(("bearer_auth" = []))
)]
pub async fn get_unread_count(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let unread = NotificationService::new(&state.db)
        .unread_count(user.id())
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Unread count",
            UnreadCountDto { unread },
        )),
    ))
}

/// PUT /api/v1/notifications/read-all
#[utoipa::path(
    put,
    path = "/read-all",
    tag = NOTIFICATION_TAG,
    responses((status = 200, description = "Number of notifications marked", body = MarkedReadDto)),
    security(("bearer_auth" = []))
)]
pub async fn mark_all_read(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let updated = NotificationService::new(&state.db)
        .mark_all_read(user.id())
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Notifications marked as read",
            MarkedReadDto { updated },
        )),
    ))
}

/// PUT /api/v1/notifications/{id}/read
#[utoipa::path(
    put,
    path = "/{id}/read",
    tag = NOTIFICATION_TAG,
    params(("id" = String, Path, description = "Notification UUID")),
    responses(
        (status = 200, description = "Notification marked", body = NotificationDto),
        (status = 404, description = "Notification not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn mark_read(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    let notification = NotificationService::new(&state.db)
        .mark_read(user.id(), id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Notification marked as read",
            notification.into_dto(),
        )),
    ))
}

/// DELETE /api/v1/notifications/{id}
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = NOTIFICATION_TAG,
    params(("id" = String, Path, description = "Notification UUID")),
    responses(
        (status = 200, description = "Notification deleted"),
        (status = 404, description = "Notification not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_notification(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    NotificationService::new(&state.db)
        .delete(user.id(), id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::empty("Notification deleted")),
    ))
}

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
        rbac::{CheckPermissionDto, PermissionCheckResultDto, PolicyDto, UserPermissionsDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, AuthUser, Permission},
        model::rbac::{Action, Policy},
        service::rbac::RbacService,
        state::AppState,
        util::parse::parse_uuid,
    },
};

pub static RBAC_TAG: &str = "rbac";
const RESOURCE: &str = "rbac";

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_policies, add_policy, remove_policy))
        .routes(routes!(check_permission))
        .routes(routes!(get_user_permissions))
}

/// GET /api/v1/rbac/policies - List every policy rule
#[utoipa::path(
    get,
    path = "/policies",
    tag = RBAC_TAG,
    responses((status = 200, description = "All policies", body = [PolicyDto])),
    security(("bearer_auth" = []))
)]
pub async fn get_policies(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Read)])
        .await?;

    let policies = RbacService::new(&state.db).get_policies().await?;
    let policies: Vec<PolicyDto> = policies.into_iter().map(Policy::into_dto).collect();

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Policies retrieved", policies)),
    ))
}

/// POST /api/v1/rbac/policies - Grant a role a permission
#[utoipa::path(
    post,
    path = "/policies",
    tag = RBAC_TAG,
    request_body = PolicyDto,
    responses(
        (status = 201, description = "Policy added", body = PolicyDto),
        (status = 400, description = "Unknown action", body = ErrorDto),
        (status = 404, description = "Subject role not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_policy(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<PolicyDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Create)])
        .await?;

    let policy = RbacService::new(&state.db)
        .add_policy(Policy::from_dto(payload)?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Policy added", policy.into_dto())),
    ))
}

/// DELETE /api/v1/rbac/policies - Revoke a policy given in the body
#[utoipa::path(
    delete,
    path = "/policies",
    tag = RBAC_TAG,
    request_body = PolicyDto,
    responses(
        (status = 200, description = "Policy removed"),
        (status = 404, description = "Policy not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove_policy(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<PolicyDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Delete)])
        .await?;

    RbacService::new(&state.db)
        .remove_policy(&Policy::from_dto(payload)?)
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::empty("Policy removed"))))
}

/// POST /api/v1/rbac/check - Evaluate a permission for a user
#[utoipa::path(
    post,
    path = "/check",
    tag = RBAC_TAG,
    request_body = CheckPermissionDto,
    responses(
        (status = 200, description = "Evaluation result", body = PermissionCheckResultDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn check_permission(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CheckPermissionDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Read)])
        .await?;

    let allowed = RbacService::new(&state.db)
        .check(payload.user_id, &payload.object, &payload.action)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Permission evaluated",
            PermissionCheckResultDto { allowed },
        )),
    ))
}

/// GET /api/v1/rbac/users/{id}/permissions - Roles and effective policies of a user
#[utoipa::path(
    get,
    path = "/users/{id}/permissions",
    tag = RBAC_TAG,
    params(("id" = String, Path, description = "User UUID")),
    responses(
        (status = 200, description = "Effective permissions", body = UserPermissionsDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user_permissions(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Read)])
        .await?;

    let permissions = RbacService::new(&state.db).user_permissions(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "User permissions retrieved",
            permissions.into_dto(),
        )),
    ))
}

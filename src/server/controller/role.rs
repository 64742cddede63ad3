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
        role::{CreateRoleDto, RoleDto, UpdateRoleDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, AuthUser, Permission},
        model::{
            rbac::Action,
            role::{CreateRoleParams, Role, UpdateRoleParams},
        },
        service::role::RoleService,
        state::AppState,
        util::parse::parse_uuid,
    },
};

pub static ROLE_TAG: &str = "roles";
const RESOURCE: &str = "roles";

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_roles, create_role))
        .routes(routes!(get_role, update_role, delete_role))
}

/// GET /api/v1/roles - List all roles
#[utoipa::path(
    get,
    path = "/",
    tag = ROLE_TAG,
    responses((status = 200, description = "All roles", body = [RoleDto])),
    security(("bearer_auth" = []))
)]
pub async fn get_roles(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Read)])
        .await?;

    let roles = RoleService::new(&state.db).get_all().await?;
    let roles: Vec<RoleDto> = roles.into_iter().map(Role::into_dto).collect();

    Ok((StatusCode::OK, Json(ApiResponse::success("Roles retrieved", roles))))
}

/// POST /api/v1/roles - Create a role
#[utoipa::path(
    post,
    path = "/",
    tag = ROLE_TAG,
    request_body = CreateRoleDto,
    responses(
        (status = 201, description = "Role created", body = RoleDto),
        (status = 400, description = "Blank name", body = ErrorDto),
        (status = 409, description = "Name taken", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_role(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Create)])
        .await?;

    let role = RoleService::new(&state.db)
        .create(CreateRoleParams {
            name: payload.name,
            description: payload.description,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Role created", role.into_dto())),
    ))
}

/// GET /api/v1/roles/{id} - Get a role
#[utoipa::path(
    get,
    path = "/{id}",
    tag = ROLE_TAG,
    params(("id" = String, Path, description = "Role UUID")),
    responses(
        (status = 200, description = "Role", body = RoleDto),
        (status = 404, description = "Role not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_role(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Read)])
        .await?;

    let role = RoleService::new(&state.db).get(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Role retrieved", role.into_dto())),
    ))
}

/// PUT /api/v1/roles/{id} - Rename or describe a role
#[utoipa::path(
    put,
    path = "/{id}",
    tag = ROLE_TAG,
    params(("id" = String, Path, description = "Role UUID")),
    request_body = UpdateRoleDto,
    responses(
        (status = 200, description = "Role updated", body = RoleDto),
        (status = 404, description = "Role not found", body = ErrorDto),
        (status = 409, description = "Name taken", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_role(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Update)])
        .await?;

    let role = RoleService::new(&state.db)
        .update(
            id,
            UpdateRoleParams {
                name: payload.name,
                description: payload.description,
            },
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Role updated", role.into_dto())),
    ))
}

/// DELETE /api/v1/roles/{id} - Delete a role with its assignments and policies
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = ROLE_TAG,
    params(("id" = String, Path, description = "Role UUID")),
    responses(
        (status = 200, description = "Role deleted"),
        (status = 404, description = "Role not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_role(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Delete)])
        .await?;

    RoleService::new(&state.db).delete(id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::empty("Role deleted"))))
}

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
        role::RoleDto,
        user::{AssignRoleDto, UpdateUserDto, UserDto},
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::{AuthGuard, AuthUser, Permission},
        model::{rbac::Action, role::Role, user::UpdateUserParams, user::User},
        service::user::UserService,
        state::AppState,
        util::parse::parse_uuid,
    },
};

pub static USER_TAG: &str = "users";
const RESOURCE: &str = "users";

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_users))
        .routes(routes!(get_user, update_user, delete_user))
        .routes(routes!(get_user_roles, assign_role))
        .routes(routes!(unassign_role))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    /// Case-insensitive match on username or email.
    pub search: Option<String>,
}

/// GET /api/v1/users - List users
#[utoipa::path(
    get,
    path = "/",
    tag = USER_TAG,
    params(PaginationParams, UserQuery),
    responses(
        (status = 200, description = "Page of users", body = [UserDto]),
        (status = 403, description = "Missing users:read", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_users(
    State(state): State<AppState>,
    user: AuthUser,
    Query(page): Query<PaginationParams>,
    Query(query): Query<UserQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Read)])
        .await?;

    let users = UserService::new(&state.db)
        .get_paginated(query.search.as_deref(), page.pagination())
        .await?;

    let (users, pagination) = users.into_dto(User::into_dto);

    Ok((
        StatusCode::OK,
        Json(ApiResponse::paginated("Users retrieved", users, pagination)),
    ))
}

/// GET /api/v1/users/{id} - Get a user
#[utoipa::path(
    get,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = String, Path, description = "User UUID")),
    responses(
        (status = 200, description = "User", body = UserDto),
        (status = 400, description = "Malformed id", body = ErrorDto),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Read)])
        .await?;

    let found = UserService::new(&state.db).get(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("User retrieved", found.into_dto())),
    ))
}

/// PUT /api/v1/users/{id} - Update profile fields or the active flag
#[utoipa::path(
    put,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = String, Path, description = "User UUID")),
    request_body = UpdateUserDto,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 409, description = "Email already in use", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateUserDto>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Update)])
        .await?;

    let updated = UserService::new(&state.db)
        .update(id, UpdateUserParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("User updated", updated.into_dto())),
    ))
}

/// DELETE /api/v1/users/{id} - Soft-delete a user
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = USER_TAG,
    params(("id" = String, Path, description = "User UUID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_user(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Delete)])
        .await?;

    UserService::new(&state.db).delete(id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::empty("User deleted"))))
}

/// GET /api/v1/users/{id}/roles - Roles assigned to a user
#[utoipa::path(
    get,
    path = "/{id}/roles",
    tag = USER_TAG,
    params(("id" = String, Path, description = "User UUID")),
    responses(
        (status = 200, description = "Assigned roles", body = [RoleDto]),
        (status = 404, description = "User not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_user_roles(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Read)])
        .await?;

    let roles = UserService::new(&state.db).get_roles(id).await?;
    let roles: Vec<RoleDto> = roles.into_iter().map(Role::into_dto).collect();

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("User roles retrieved", roles)),
    ))
}

/// POST /api/v1/users/{id}/roles - Assign a role
///
/// Assigning a role the user already holds succeeds without change.
#[utoipa::path(
    post,
    path = "/{id}/roles",
    tag = USER_TAG,
    params(("id" = String, Path, description = "User UUID")),
    request_body = AssignRoleDto,
    responses(
        (status = 200, description = "Roles after assignment", body = [RoleDto]),
        (status = 404, description = "User or role not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn assign_role(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<AssignRoleDto>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Update)])
        .await?;

    let roles = UserService::new(&state.db)
        .assign_role(id, payload.role_id)
        .await?;
    let roles: Vec<RoleDto> = roles.into_iter().map(Role::into_dto).collect();

    Ok((StatusCode::OK, Json(ApiResponse::success("Role assigned", roles))))
}

/// DELETE /api/v1/users/{id}/roles/{role_id} - Remove a role assignment
#[utoipa::path(
    delete,
    path = "/{id}/roles/{role_id}",
    tag = USER_TAG,
    params(
        ("id" = String, Path, description = "User UUID"),
        ("role_id" = String, Path, description = "Role UUID")
    ),
    responses(
        (status = 200, description = "Role removed"),
        (status = 404, description = "User not found or role not assigned", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn unassign_role(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, role_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;
    let role_id = parse_uuid(&role_id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Update)])
        .await?;

    UserService::new(&state.db).unassign_role(id, role_id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::empty("Role removed"))))
}

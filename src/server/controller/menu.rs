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
        menu::{CreateMenuDto, MenuActiveDto, MenuDto, MenuVisibleDto, UpdateMenuDto},
    },
    server::{
        controller::{hierarchy, PaginationParams},
        error::AppError,
        middleware::auth::{AuthGuard, AuthUser, Permission},
        model::{
            hierarchy::HierarchyModel,
            menu::{CreateMenuParams, Menu, MenuFilter, UpdateMenuParams},
            rbac::Action,
        },
        service::menu::MenuService,
        state::AppState,
        util::parse::parse_uuid,
    },
};

pub static MENU_TAG: &str = "menus";
const RESOURCE: &str = "menus";

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_menus, create_menu))
        .routes(routes!(update_menu))
        .routes(routes!(create_child_menu))
        .routes(routes!(set_menu_active))
        .routes(routes!(set_menu_visible))
        .merge(tree::routes())
}

hierarchy::hierarchy_endpoints!(Menu, MenuDto, MENU_TAG, "menus");

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MenuQuery {
    pub is_active: Option<bool>,
}

/// GET /api/v1/menus - List menu entries
#[utoipa::path(
    get,
    path = "/",
    tag = MENU_TAG,
    params(PaginationParams, MenuQuery),
    responses((status = 200, description = "Page of menu entries", body = [MenuDto])),
    security(("bearer_auth" = []))
)]
pub async fn get_menus(
    State(state): State<AppState>,
    user: AuthUser,
    Query(page): Query<PaginationParams>,
    Query(query): Query<MenuQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Read)])
        .await?;

    let menus = MenuService::new(&state.db)
        .get_paginated(
            MenuFilter {
                is_active: query.is_active,
            },
            page.pagination(),
        )
        .await?;

    let (menus, pagination) = menus.into_dto(Menu::into_dto);

    Ok((
        StatusCode::OK,
        Json(ApiResponse::paginated("Menus retrieved", menus, pagination)),
    ))
}

/// POST /api/v1/menus - Create a menu entry
#[utoipa::path(
    post,
    path = "/",
    tag = MENU_TAG,
    request_body = CreateMenuDto,
    responses(
        (status = 201, description = "Menu created", body = MenuDto),
        (status = 400, description = "Blank name", body = ErrorDto),
        (status = 404, description = "Parent not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_menu(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateMenuDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Create)])
        .await?;

    let menu = MenuService::new(&state.db)
        .create(CreateMenuParams::from_dto(payload)?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Menu created", menu.into_dto())),
    ))
}

/// PUT /api/v1/menus/{id}
#[utoipa::path(
    put,
    path = "/{id}",
    tag = MENU_TAG,
    params(("id" = String, Path, description = "Menu UUID")),
    request_body = UpdateMenuDto,
    responses(
        (status = 200, description = "Menu updated", body = MenuDto),
        (status = 404, description = "Menu not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_menu(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateMenuDto>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Update)])
        .await?;

    let menu = MenuService::new(&state.db)
        .update(id, UpdateMenuParams::from_dto(payload)?)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Menu updated", menu.into_dto())),
    ))
}

/// POST /api/v1/menus/{id}/children - Create an entry under `id`
#[utoipa::path(
    post,
    path = "/{id}/children",
    tag = MENU_TAG,
    params(("id" = String, Path, description = "Parent menu UUID")),
    request_body = CreateMenuDto,
    responses(
        (status = 201, description = "Child created", body = MenuDto),
        (status = 404, description = "Parent not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_child_menu(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<CreateMenuDto>,
) -> Result<impl IntoResponse, AppError> {
    let parent_id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Create)])
        .await?;

    let menu = MenuService::new(&state.db)
        .create_child(parent_id, CreateMenuParams::from_dto(payload)?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Menu created", menu.into_dto())),
    ))
}

/// PUT /api/v1/menus/{id}/active
#[utoipa::path(
    put,
    path = "/{id}/active",
    tag = MENU_TAG,
    params(("id" = String, Path, description = "Menu UUID")),
    request_body = MenuActiveDto,
    responses(
        (status = 200, description = "Flag set", body = MenuDto),
        (status = 404, description = "Menu not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_menu_active(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<MenuActiveDto>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Update)])
        .await?;

    let menu = MenuService::new(&state.db)
        .set_active(id, payload.is_active)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Menu updated", menu.into_dto())),
    ))
}

/// PUT /api/v1/menus/{id}/visible
#[utoipa::path(
    put,
    path = "/{id}/visible",
    tag = MENU_TAG,
    params(("id" = String, Path, description = "Menu UUID")),
    request_body = MenuVisibleDto,
    responses(
        (status = 200, description = "Flag set", body = MenuDto),
        (status = 404, description = "Menu not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_menu_visible(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<MenuVisibleDto>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Update)])
        .await?;

    let menu = MenuService::new(&state.db)
        .set_visible(id, payload.is_visible)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Menu updated", menu.into_dto())),
    ))
}

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
        organization::{
            CreateOrganizationDto, OrganizationDto, OrganizationStatusDto, UpdateOrganizationDto,
        },
    },
    server::{
        controller::{hierarchy, PaginationParams},
        error::AppError,
        middleware::auth::{AuthGuard, AuthUser, Permission},
        model::{
            hierarchy::HierarchyModel,
            organization::{
                CreateOrganizationParams, Organization, OrganizationFilter, OrganizationStatus,
                UpdateOrganizationParams,
            },
            rbac::Action,
        },
        service::organization::OrganizationService,
        state::AppState,
        util::parse::parse_uuid,
    },
};

pub static ORGANIZATION_TAG: &str = "organizations";
const RESOURCE: &str = "organizations";

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_organizations, create_organization))
        .routes(routes!(update_organization))
        .routes(routes!(create_child_organization))
        .routes(routes!(set_organization_status))
        .merge(tree::routes())
}

hierarchy::hierarchy_endpoints!(
    Organization,
    OrganizationDto,
    ORGANIZATION_TAG,
    "organizations"
);

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrganizationQuery {
    /// `active`, `inactive` or `suspended`.
    pub status: Option<String>,
}

/// GET /api/v1/organizations - List organizations
#[utoipa::path(
    get,
    path = "/",
    tag = ORGANIZATION_TAG,
    params(PaginationParams, OrganizationQuery),
    responses(
        (status = 200, description = "Page of organizations", body = [OrganizationDto]),
        (status = 400, description = "Unknown status filter", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_organizations(
    State(state): State<AppState>,
    user: AuthUser,
    Query(page): Query<PaginationParams>,
    Query(query): Query<OrganizationQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Read)])
        .await?;

    let filter = OrganizationFilter {
        status: query.status.as_deref().map(str::parse).transpose()?,
    };

    let organizations = OrganizationService::new(&state.db)
        .get_paginated(filter, page.pagination())
        .await?;

    let (organizations, pagination) = organizations.into_dto(Organization::into_dto);

    Ok((
        StatusCode::OK,
        Json(ApiResponse::paginated(
            "Organizations retrieved",
            organizations,
            pagination,
        )),
    ))
}

/// POST /api/v1/organizations - Create an organization, optionally under a parent
#[utoipa::path(
    post,
    path = "/",
    tag = ORGANIZATION_TAG,
    request_body = CreateOrganizationDto,
    responses(
        (status = 201, description = "Organization created", body = OrganizationDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 404, description = "Parent not found", body = ErrorDto),
        (status = 409, description = "Slug taken", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_organization(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateOrganizationDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Create)])
        .await?;

    let organization = OrganizationService::new(&state.db)
        .create(CreateOrganizationParams::from_dto(payload)?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Organization created",
            organization.into_dto(),
        )),
    ))
}

/// PUT /api/v1/organizations/{id} - Update fields; the parent changes only via `/move`
#[utoipa::path(
    put,
    path = "/{id}",
    tag = ORGANIZATION_TAG,
    params(("id" = String, Path, description = "Organization UUID")),
    request_body = UpdateOrganizationDto,
    responses(
        (status = 200, description = "Organization updated", body = OrganizationDto),
        (status = 404, description = "Organization not found", body = ErrorDto),
        (status = 409, description = "Slug taken", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_organization(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateOrganizationDto>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Update)])
        .await?;

    let organization = OrganizationService::new(&state.db)
        .update(id, UpdateOrganizationParams::from_dto(payload)?)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Organization updated",
            organization.into_dto(),
        )),
    ))
}

/// POST /api/v1/organizations/{id}/children - Create an organization under `id`
#[utoipa::path(
    post,
    path = "/{id}/children",
    tag = ORGANIZATION_TAG,
    params(("id" = String, Path, description = "Parent organization UUID")),
    request_body = CreateOrganizationDto,
    responses(
        (status = 201, description = "Child created", body = OrganizationDto),
        (status = 404, description = "Parent not found", body = ErrorDto),
        (status = 409, description = "Slug taken", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_child_organization(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<CreateOrganizationDto>,
) -> Result<impl IntoResponse, AppError> {
    let parent_id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Create)])
        .await?;

    let organization = OrganizationService::new(&state.db)
        .create_child(parent_id, CreateOrganizationParams::from_dto(payload)?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Organization created",
            organization.into_dto(),
        )),
    ))
}

/// PUT /api/v1/organizations/{id}/status - Set the status; children are unaffected
#[utoipa::path(
    put,
    path = "/{id}/status",
    tag = ORGANIZATION_TAG,
    params(("id" = String, Path, description = "Organization UUID")),
    request_body = OrganizationStatusDto,
    responses(
        (status = 200, description = "Status set", body = OrganizationDto),
        (status = 400, description = "Unknown status", body = ErrorDto),
        (status = 404, description = "Organization not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_organization_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<OrganizationStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;
    let status: OrganizationStatus = payload.status.parse()?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Update)])
        .await?;

    let organization = OrganizationService::new(&state.db)
        .set_status(id, status)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Organization status updated",
            organization.into_dto(),
        )),
    ))
}

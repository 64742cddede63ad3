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
        taxonomy::{CreateTaxonomyDto, TaxonomyDto, UpdateTaxonomyDto},
    },
    server::{
        controller::{hierarchy, PaginationParams},
        error::AppError,
        middleware::auth::{AuthGuard, AuthUser, Permission},
        model::{
            hierarchy::HierarchyModel,
            rbac::Action,
            taxonomy::{CreateTaxonomyParams, Taxonomy, TaxonomyFilter, UpdateTaxonomyParams},
        },
        service::taxonomy::TaxonomyService,
        state::AppState,
        util::parse::parse_uuid,
    },
};

pub static TAXONOMY_TAG: &str = "taxonomies";
const RESOURCE: &str = "taxonomies";

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_taxonomies, create_taxonomy))
        .routes(routes!(update_taxonomy))
        .routes(routes!(create_child_taxonomy))
        .merge(tree::routes())
}

hierarchy::hierarchy_endpoints!(Taxonomy, TaxonomyDto, TAXONOMY_TAG, "taxonomies");

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TaxonomyQuery {
    /// Restrict to one kind, e.g. `category`.
    pub kind: Option<String>,
}

/// GET /api/v1/taxonomies - List taxonomy terms
#[utoipa::path(
    get,
    path = "/",
    tag = TAXONOMY_TAG,
    params(PaginationParams, TaxonomyQuery),
    responses((status = 200, description = "Page of terms", body = [TaxonomyDto])),
    security(("bearer_auth" = []))
)]
pub async fn get_taxonomies(
    State(state): State<AppState>,
    user: AuthUser,
    Query(page): Query<PaginationParams>,
    Query(query): Query<TaxonomyQuery>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Read)])
        .await?;

    let filter = TaxonomyFilter {
        kind: query.kind.map(|kind| kind.trim().to_lowercase()),
    };

    let taxonomies = TaxonomyService::new(&state.db)
        .get_paginated(filter, page.pagination())
        .await?;

    let (taxonomies, pagination) = taxonomies.into_dto(Taxonomy::into_dto);

    Ok((
        StatusCode::OK,
        Json(ApiResponse::paginated(
            "Taxonomies retrieved",
            taxonomies,
            pagination,
        )),
    ))
}

/// POST /api/v1/taxonomies - Create a term; a parent must be of the same kind
#[utoipa::path(
    post,
    path = "/",
    tag = TAXONOMY_TAG,
    request_body = CreateTaxonomyDto,
    responses(
        (status = 201, description = "Taxonomy created", body = TaxonomyDto),
        (status = 400, description = "Invalid input or kind mismatch", body = ErrorDto),
        (status = 404, description = "Parent not found", body = ErrorDto),
        (status = 409, description = "Slug taken within the kind", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_taxonomy(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateTaxonomyDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Create)])
        .await?;

    let taxonomy = TaxonomyService::new(&state.db)
        .create(CreateTaxonomyParams::from_dto(payload)?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Taxonomy created", taxonomy.into_dto())),
    ))
}

/// PUT /api/v1/taxonomies/{id}
#[utoipa::path(
    put,
    path = "/{id}",
    tag = TAXONOMY_TAG,
    params(("id" = String, Path, description = "Taxonomy UUID")),
    request_body = UpdateTaxonomyDto,
    responses(
        (status = 200, description = "Taxonomy updated", body = TaxonomyDto),
        (status = 404, description = "Taxonomy not found", body = ErrorDto),
        (status = 409, description = "Slug taken within the kind", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_taxonomy(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateTaxonomyDto>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Update)])
        .await?;

    let taxonomy = TaxonomyService::new(&state.db)
        .update(id, UpdateTaxonomyParams::from_dto(payload)?)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Taxonomy updated", taxonomy.into_dto())),
    ))
}

/// POST /api/v1/taxonomies/{id}/children - Create a term under `id`
#[utoipa::path(
    post,
    path = "/{id}/children",
    tag = TAXONOMY_TAG,
    params(("id" = String, Path, description = "Parent taxonomy UUID")),
    request_body = CreateTaxonomyDto,
    responses(
        (status = 201, description = "Child created", body = TaxonomyDto),
        (status = 400, description = "Kind mismatch", body = ErrorDto),
        (status = 404, description = "Parent not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_child_taxonomy(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<CreateTaxonomyDto>,
) -> Result<impl IntoResponse, AppError> {
    let parent_id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Create)])
        .await?;

    let taxonomy = TaxonomyService::new(&state.db)
        .create_child(parent_id, CreateTaxonomyParams::from_dto(payload)?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Taxonomy created", taxonomy.into_dto())),
    ))
}

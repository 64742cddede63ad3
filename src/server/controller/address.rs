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
        address::{AddressDto, CreateAddressDto, UpdateAddressDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, AuthUser, Permission},
        model::{
            address::{Address, AddressableType, CreateAddressParams, UpdateAddressParams},
            rbac::Action,
        },
        service::address::AddressService,
        state::AppState,
        util::parse::parse_uuid,
    },
};

pub static ADDRESS_TAG: &str = "addresses";
const RESOURCE: &str = "addresses";

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_addresses, create_address))
        .routes(routes!(get_address, update_address, delete_address))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AddressOwnerQuery {
    /// `user` or `organization`.
    pub addressable_type: String,
    pub addressable_id: String,
}

/// GET /api/v1/addresses - Addresses of one owner
#[utoipa::path(
    get,
    path = "/",
    tag = ADDRESS_TAG,
    params(AddressOwnerQuery),
    responses(
        (status = 200, description = "Owner's addresses, primary first", body = [AddressDto]),
        (status = 400, description = "Unknown owner type or malformed id", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_addresses(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<AddressOwnerQuery>,
) -> Result<impl IntoResponse, AppError> {
    let addressable_type: AddressableType = query.addressable_type.parse()?;
    let addressable_id = parse_uuid(&query.addressable_id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Read)])
        .await?;

    let addresses = AddressService::new(&state.db)
        .get_by_owner(addressable_type, addressable_id)
        .await?;
    let addresses: Vec<AddressDto> = addresses.into_iter().map(Address::into_dto).collect();

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Addresses retrieved", addresses)),
    ))
}

/// POST /api/v1/addresses
#[utoipa::path(
    post,
    path = "/",
    tag = ADDRESS_TAG,
    request_body = CreateAddressDto,
    responses(
        (status = 201, description = "Address created", body = AddressDto),
        (status = 400, description = "Invalid input", body = ErrorDto),
        (status = 404, description = "Owner not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_address(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateAddressDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Create)])
        .await?;

    let address = AddressService::new(&state.db)
        .create(CreateAddressParams::from_dto(payload)?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Address created", address.into_dto())),
    ))
}

/// GET /api/v1/addresses/{id}
#[utoipa::path(
    get,
    path = "/{id}",
    tag = ADDRESS_TAG,
    params(("id" = String, Path, description = "Address UUID")),
    responses(
        (status = 200, description = "Address", body = AddressDto),
        (status = 404, description = "Address not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_address(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Read)])
        .await?;

    let address = AddressService::new(&state.db).get(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Address retrieved", address.into_dto())),
    ))
}

/// PUT /api/v1/addresses/{id} - Setting `is_primary` clears it on the owner's other addresses
#[utoipa::path(
    put,
    path = "/{id}",
    tag = ADDRESS_TAG,
    params(("id" = String, Path, description = "Address UUID")),
    request_body = UpdateAddressDto,
    responses(
        (status = 200, description = "Address updated", body = AddressDto),
        (status = 404, description = "Address not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_address(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateAddressDto>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Update)])
        .await?;

    let address = AddressService::new(&state.db)
        .update(id, UpdateAddressParams::from_dto(payload)?)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Address updated", address.into_dto())),
    ))
}

/// DELETE /api/v1/addresses/{id}
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = ADDRESS_TAG,
    params(("id" = String, Path, description = "Address UUID")),
    responses(
        (status = 200, description = "Address deleted"),
        (status = 404, description = "Address not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_address(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Delete)])
        .await?;

    AddressService::new(&state.db).delete(id).await?;

    Ok((StatusCode::OK, Json(ApiResponse::empty("Address deleted"))))
}

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        auth::{ChangePasswordDto, LoginDto, RegisterDto, TokenDto},
        user::UserDto,
    },
    server::{
        error::AppError,
        middleware::auth::AuthUser,
        model::user::RegisterParams,
        service::auth::AuthService,
        state::AppState,
    },
};

pub static AUTH_TAG: &str = "auth";

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(register))
        .routes(routes!(login))
        .routes(routes!(me))
        .routes(routes!(change_password))
}

/// POST /api/v1/auth/register - Create a local account
///
/// The first account ever registered receives the `admin` role.
#[utoipa::path(
    post,
    path = "/register",
    tag = AUTH_TAG,
    request_body = RegisterDto,
    responses(
        (status = 201, description = "Account created", body = UserDto),
        (status = 400, description = "Invalid input or password mismatch", body = ErrorDto),
        (status = 409, description = "Username or email already registered", body = ErrorDto)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterDto>,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = AuthService::new(&state.db, &state.config);

    let user = auth_service
        .register(RegisterParams::from_dto(payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("User registered", user.into_dto())),
    ))
}

/// POST /api/v1/auth/login - Exchange credentials for a bearer token
#[utoipa::path(
    post,
    path = "/login",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Token issued", body = TokenDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto),
        (status = 403, description = "Account inactive", body = ErrorDto)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = AuthService::new(&state.db, &state.config);

    let result = auth_service.login(&payload.login, &payload.password).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Login successful", result.into_dto())),
    ))
}

/// GET /api/v1/auth/me - Current user
#[utoipa::path(
    get,
    path = "/me",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Authenticated user", body = UserDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = AuthService::new(&state.db, &state.config);

    let user = auth_service.me(user.id()).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Current user", user.into_dto())),
    ))
}

/// PUT /api/v1/auth/password - Change the current user's password
#[utoipa::path(
    put,
    path = "/password",
    tag = AUTH_TAG,
    request_body = ChangePasswordDto,
    responses(
        (status = 200, description = "Password changed"),
        (status = 400, description = "Wrong current password or invalid new password", body = ErrorDto),
        (status = 401, description = "Not authenticated", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn change_password(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ChangePasswordDto>,
) -> Result<impl IntoResponse, AppError> {
    let auth_service = AuthService::new(&state.db, &state.config);

    auth_service
        .change_password(
            user.id(),
            &payload.current_password,
            &payload.new_password,
            &payload.confirm_password,
        )
        .await?;

    Ok((StatusCode::OK, Json(ApiResponse::empty("Password changed"))))
}

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{
    model::{api::ApiResponse, health::HealthDto},
    server::{service::health::HealthService, state::AppState},
};

pub static HEALTH_TAG: &str = "health";

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(healthz))
}

/// GET /healthz - Probe the database, storage, RBAC and search engine
///
/// Integrations that are not configured are left out of the report.
#[utoipa::path(
    get,
    path = "/healthz",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Every probe is up", body = HealthDto),
        (status = 503, description = "At least one probe is down", body = HealthDto)
    )
)]
pub async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    let report = HealthService::new(
        &state.db,
        &*state.storage,
        state.search_engine.as_deref(),
    )
    .check()
    .await;

    if report.is_healthy() {
        (
            StatusCode::OK,
            Json(ApiResponse::success("Service healthy", report.into_dto())),
        )
    } else {
        tracing::warn!("Health check failed");

        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse::failure("Service unhealthy", report.into_dto())),
        )
    }
}

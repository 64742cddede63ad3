use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa_axum::router::OpenApiRouter;
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        address, auth, backup, comment, health, job, media, menu, notification, organization,
        post, rbac, role, search, tag, taxonomy, user,
    },
    model::media::MAX_UPLOAD_BYTES,
    state::AppState,
};

/// Headroom above the upload limit for multipart framing, so oversized files reach the
/// upload handler and fail with a proper 413 body.
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Builds the full application router: versioned API, health probe, Swagger UI, tracing
/// and CORS.
pub fn router(state: AppState) -> Router {
    let cors = cors_layer(state.config.cors_allowed_origin.as_deref());

    let (router, mut openapi) = OpenApiRouter::new()
        .nest("/api/v1/auth", auth::router())
        .nest("/api/v1/users", user::router())
        .nest("/api/v1/roles", role::router())
        .nest("/api/v1/rbac", rbac::router())
        .nest("/api/v1/organizations", organization::router())
        .nest("/api/v1/menus", menu::router())
        .nest("/api/v1/taxonomies", taxonomy::router())
        .nest("/api/v1/posts", post::router())
        .nest("/api/v1/comments", comment::router())
        .nest("/api/v1/tags", tag::router())
        .nest("/api/v1/addresses", address::router())
        .nest("/api/v1/media", media::router())
        .nest("/api/v1/notifications", notification::router())
        .nest("/api/v1/search", search::router())
        .nest("/api/v1/jobs", job::router())
        .nest("/api/v1/backups", backup::router())
        .merge(health::router())
        .split_for_parts();

    openapi.info.title = "Atrium API".to_string();
    openapi.info.version = env!("CARGO_PKG_VERSION").to_string();
    openapi.info.description = Some("Content management REST API".to_string());
    if let Some(components) = openapi.components.as_mut() {
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }

    router
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", openapi))
        .layer(DefaultBodyLimit::max(
            MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD_BYTES,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Restricts CORS to the configured origin, or allows any origin when none is set.
fn cors_layer(allowed_origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    match allowed_origin.map(HeaderValue::from_str) {
        Some(Ok(origin)) => layer.allow_origin(origin),
        Some(Err(e)) => {
            tracing::warn!("Ignoring invalid CORS origin: {}", e);
            layer
        }
        None => layer.allow_origin(tower_http::cors::Any),
    }
}

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use utoipa_axum::{router::OpenApiRouter, routes};

use crate::{
    model::{
        api::{ApiResponse, ErrorDto},
        search::{SearchAllDto, SearchResultDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthUser,
        model::search::{SearchQuery, SearchScope},
        service::search::SearchService,
        state::AppState,
    },
};

pub static SEARCH_TAG: &str = "search";

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(search))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Search text, required.
    #[serde(default)]
    pub q: String,
    /// `users`, `posts`, `tags`, `taxonomies`, `menus`, `organizations` or `all`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// 1-based page, default 1.
    pub page: Option<u64>,
    /// Default 10, max 100.
    pub page_size: Option<u64>,
}

/// GET /api/v1/search - Search one type or fan out to all of them
///
/// Single-type searches try the search engine first when one is configured and fall back
/// to the database. `type=all` returns up to five hits per type along with a per-type
/// status.
#[utoipa::path(
    get,
    path = "/",
    tag = SEARCH_TAG,
    params(SearchParams),
    responses(
        (status = 200, description = "Single-type result page", body = SearchResultDto),
        (status = 200, description = "Fan-out result for type=all", body = SearchAllDto),
        (status = 400, description = "Blank query or unknown type", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn search(
    State(state): State<AppState>,
    _user: AuthUser,
    Query(params): Query<SearchParams>,
) -> Result<Response, AppError> {
    let scope: SearchScope = params.kind.as_deref().unwrap_or("all").parse()?;
    let query = SearchQuery::new(&params.q, params.page, params.page_size)?;

    let service = SearchService::new(&state.db, state.search_engine.as_deref());

    let response = match scope {
        SearchScope::One(kind) => {
            let page = service.search(kind, &query).await?;

            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    "Search completed",
                    page.into_dto(query.q),
                )),
            )
                .into_response()
        }
        SearchScope::All => {
            let fan_out = service.search_all(&query).await;

            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    "Search completed",
                    fan_out.into_dto(query.q),
                )),
            )
                .into_response()
        }
    };

    Ok(response)
}

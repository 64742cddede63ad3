//! Tree endpoints shared by organizations, menus and taxonomies.
//!
//! The handlers are generic over the hierarchy model. Each resource controller expands
//! [`hierarchy_endpoints!`] to get documented per-resource wrappers and mounts them next
//! to its entity-specific endpoints (create, list, update, status flags).

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ApiResponse,
        hierarchy::{HierarchyValidationDto, MoveDto, SubtreeDeletedDto, ValidateHierarchyDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, AuthUser, Permission},
        model::{
            hierarchy::HierarchyModel, menu::Menu, organization::Organization, rbac::Action,
            taxonomy::Taxonomy,
        },
        service::hierarchy::HierarchyService,
        state::AppState,
        util::parse::parse_uuid,
    },
};

/// A hierarchy model exposed over HTTP.
pub trait HierarchyResource: HierarchyModel + 'static {
    /// Permission object and path segment, e.g. `organizations`.
    const RESOURCE: &'static str;
    /// Singular name used in response messages.
    const NAME: &'static str;
}

impl HierarchyResource for Organization {
    const RESOURCE: &'static str = "organizations";
    const NAME: &'static str = "Organization";
}

impl HierarchyResource for Menu {
    const RESOURCE: &'static str = "menus";
    const NAME: &'static str = "Menu";
}

impl HierarchyResource for Taxonomy {
    const RESOURCE: &'static str = "taxonomies";
    const NAME: &'static str = "Taxonomy";
}

/// Declares the shared tree endpoints for one resource.
///
/// Expands to a `tree` module holding documented wrappers around the generic handlers
/// in this module and a `routes()` function that mounts them. Expand it inside the
/// resource's controller, next to its entity-specific handlers.
macro_rules! hierarchy_endpoints {
    ($model:ident, $dto:ident, $tag:ident, $resource:literal) => {
        pub mod tree {
            use axum::{
                extract::{Path, State},
                response::IntoResponse,
                Json,
            };
            use utoipa_axum::{router::OpenApiRouter, routes};

            use $crate::{
                model::{
                    api::ErrorDto,
                    hierarchy::{
                        HierarchyValidationDto, MoveDto, SubtreeDeletedDto, ValidateHierarchyDto,
                    },
                },
                server::{
                    controller::hierarchy as handlers, error::AppError, middleware::auth::AuthUser,
                    state::AppState,
                },
            };

            use super::{$dto, $model, $tag};

            pub fn routes() -> OpenApiRouter<AppState> {
                OpenApiRouter::new()
                    .routes(routes!(get_one, delete_one))
                    .routes(routes!(tree))
                    .routes(routes!(roots))
                    .routes(routes!(validate_hierarchy))
                    .routes(routes!(children))
                    .routes(routes!(descendants))
                    .routes(routes!(ancestors))
                    .routes(routes!(siblings))
                    .routes(routes!(path))
                    .routes(routes!(move_subtree))
                    .routes(routes!(delete_subtree))
            }

            #[utoipa::path(
                get,
                path = "/{id}",
                tag = $tag,
                operation_id = concat!($resource, "_get"),
                params(("id" = String, Path, description = "UUID")),
                responses(
                    (status = 200, description = "Entity", body = $dto),
                    (status = 400, description = "Malformed id", body = ErrorDto),
                    (status = 404, description = "Not found", body = ErrorDto)
                ),
                security(("bearer_auth" = []))
            )]
            pub async fn get_one(
                state: State<AppState>,
                user: AuthUser,
                id: Path<String>,
            ) -> Result<impl IntoResponse, AppError> {
                handlers::get_one::<$model>(state, user, id).await
            }

            #[utoipa::path(
                delete,
                path = "/{id}",
                tag = $tag,
                operation_id = concat!($resource, "_delete"),
                params(("id" = String, Path, description = "UUID")),
                responses(
                    (status = 200, description = "Deleted; children move up a level"),
                    (status = 404, description = "Not found", body = ErrorDto)
                ),
                security(("bearer_auth" = []))
            )]
            pub async fn delete_one(
                state: State<AppState>,
                user: AuthUser,
                id: Path<String>,
            ) -> Result<impl IntoResponse, AppError> {
                handlers::delete_one::<$model>(state, user, id).await
            }

            #[utoipa::path(
                get,
                path = "/tree",
                tag = $tag,
                operation_id = concat!($resource, "_tree"),
                responses((status = 200, description = "Nested forest; each node carries `children`")),
                security(("bearer_auth" = []))
            )]
            pub async fn tree(
                state: State<AppState>,
                user: AuthUser,
            ) -> Result<impl IntoResponse, AppError> {
                handlers::tree::<$model>(state, user).await
            }

            #[utoipa::path(
                get,
                path = "/roots",
                tag = $tag,
                operation_id = concat!($resource, "_roots"),
                responses((status = 200, description = "Entities without a parent", body = [$dto])),
                security(("bearer_auth" = []))
            )]
            pub async fn roots(
                state: State<AppState>,
                user: AuthUser,
            ) -> Result<impl IntoResponse, AppError> {
                handlers::roots::<$model>(state, user).await
            }

            #[utoipa::path(
                post,
                path = "/validate-hierarchy",
                tag = $tag,
                operation_id = concat!($resource, "_validate_hierarchy"),
                request_body = ValidateHierarchyDto,
                responses(
                    (status = 200, description = "Move is valid", body = HierarchyValidationDto),
                    (status = 400, description = "Cycle or self-parent", body = ErrorDto),
                    (status = 404, description = "Either entity missing", body = ErrorDto)
                ),
                security(("bearer_auth" = []))
            )]
            pub async fn validate_hierarchy(
                state: State<AppState>,
                user: AuthUser,
                payload: Json<ValidateHierarchyDto>,
            ) -> Result<impl IntoResponse, AppError> {
                handlers::validate_hierarchy::<$model>(state, user, payload)
                    .await
            }

            #[utoipa::path(
                get,
                path = "/{id}/children",
                tag = $tag,
                operation_id = concat!($resource, "_children"),
                params(("id" = String, Path, description = "UUID")),
                responses(
                    (status = 200, description = "Direct children", body = [$dto]),
                    (status = 404, description = "Not found", body = ErrorDto)
                ),
                security(("bearer_auth" = []))
            )]
            pub async fn children(
                state: State<AppState>,
                user: AuthUser,
                id: Path<String>,
            ) -> Result<impl IntoResponse, AppError> {
                handlers::children::<$model>(state, user, id).await
            }

            #[utoipa::path(
                get,
                path = "/{id}/descendants",
                tag = $tag,
                operation_id = concat!($resource, "_descendants"),
                params(("id" = String, Path, description = "UUID")),
                responses(
                    (status = 200, description = "Every transitive child", body = [$dto]),
                    (status = 404, description = "Not found", body = ErrorDto)
                ),
                security(("bearer_auth" = []))
            )]
            pub async fn descendants(
                state: State<AppState>,
                user: AuthUser,
                id: Path<String>,
            ) -> Result<impl IntoResponse, AppError> {
                handlers::descendants::<$model>(state, user, id).await
            }

            #[utoipa::path(
                get,
                path = "/{id}/ancestors",
                tag = $tag,
                operation_id = concat!($resource, "_ancestors"),
                params(("id" = String, Path, description = "UUID")),
                responses(
                    (status = 200, description = "Ancestors, root first", body = [$dto]),
                    (status = 404, description = "Not found", body = ErrorDto)
                ),
                security(("bearer_auth" = []))
            )]
            pub async fn ancestors(
                state: State<AppState>,
                user: AuthUser,
                id: Path<String>,
            ) -> Result<impl IntoResponse, AppError> {
                handlers::ancestors::<$model>(state, user, id).await
            }

            #[utoipa::path(
                get,
                path = "/{id}/siblings",
                tag = $tag,
                operation_id = concat!($resource, "_siblings"),
                params(("id" = String, Path, description = "UUID")),
                responses(
                    (status = 200, description = "Other children of the same parent", body = [$dto]),
                    (status = 404, description = "Not found", body = ErrorDto)
                ),
                security(("bearer_auth" = []))
            )]
            pub async fn siblings(
                state: State<AppState>,
                user: AuthUser,
                id: Path<String>,
            ) -> Result<impl IntoResponse, AppError> {
                handlers::siblings::<$model>(state, user, id).await
            }

            #[utoipa::path(
                get,
                path = "/{id}/path",
                tag = $tag,
                operation_id = concat!($resource, "_path"),
                params(("id" = String, Path, description = "UUID")),
                responses(
                    (status = 200, description = "Root first, ending with the entity", body = [$dto]),
                    (status = 404, description = "Not found", body = ErrorDto)
                ),
                security(("bearer_auth" = []))
            )]
            pub async fn path(
                state: State<AppState>,
                user: AuthUser,
                id: Path<String>,
            ) -> Result<impl IntoResponse, AppError> {
                handlers::path::<$model>(state, user, id).await
            }

            #[utoipa::path(
                put,
                path = "/{id}/move",
                tag = $tag,
                operation_id = concat!($resource, "_move"),
                params(("id" = String, Path, description = "UUID")),
                request_body = MoveDto,
                responses(
                    (status = 200, description = "Moved", body = $dto),
                    (status = 400, description = "Cycle or self-parent", body = ErrorDto),
                    (status = 404, description = "Entity or parent missing", body = ErrorDto)
                ),
                security(("bearer_auth" = []))
            )]
            pub async fn move_subtree(
                state: State<AppState>,
                user: AuthUser,
                id: Path<String>,
                payload: Json<MoveDto>,
            ) -> Result<impl IntoResponse, AppError> {
                handlers::move_subtree::<$model>(state, user, id, payload)
                    .await
            }

            #[utoipa::path(
                delete,
                path = "/{id}/subtree",
                tag = $tag,
                operation_id = concat!($resource, "_delete_subtree"),
                params(("id" = String, Path, description = "UUID")),
                responses(
                    (status = 200, description = "Rows deleted", body = SubtreeDeletedDto),
                    (status = 404, description = "Not found", body = ErrorDto)
                ),
                security(("bearer_auth" = []))
            )]
            pub async fn delete_subtree(
                state: State<AppState>,
                user: AuthUser,
                id: Path<String>,
            ) -> Result<impl IntoResponse, AppError> {
                handlers::delete_subtree::<$model>(state, user, id).await
            }
        }
    };
}

pub(crate) use hierarchy_endpoints;

async fn require<M: HierarchyResource>(
    state: &AppState,
    user: &AuthUser,
    action: Action,
) -> Result<(), AppError> {
    AuthGuard::new(&state.db, user)
        .require(&[Permission::new(M::RESOURCE, action)])
        .await
}

fn list<M: HierarchyResource>(message: String, items: Vec<M>) -> impl IntoResponse {
    let items: Vec<M::Dto> = items.into_iter().map(M::into_dto).collect();

    (StatusCode::OK, Json(ApiResponse::success(message, items)))
}

/// GET /{resource}/{id}
pub async fn get_one<M: HierarchyResource>(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;
    require::<M>(&state, &user, Action::Read).await?;

    let item = HierarchyService::<M>::new(&state.db).get(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            format!("{} retrieved", M::NAME),
            item.into_dto(),
        )),
    ))
}

/// DELETE /{resource}/{id} - Soft-delete one entity; its children move up a level
pub async fn delete_one<M: HierarchyResource>(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;
    require::<M>(&state, &user, Action::Delete).await?;

    HierarchyService::<M>::new(&state.db).delete(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::empty(format!("{} deleted", M::NAME))),
    ))
}

/// GET /{resource}/tree - Whole forest, nested
pub async fn tree<M: HierarchyResource>(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    require::<M>(&state, &user, Action::Read).await?;

    let forest = HierarchyService::<M>::new(&state.db).tree().await?;
    let forest: Vec<_> = forest
        .into_iter()
        .map(|node| node.map(&M::into_dto))
        .collect();

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(format!("{} tree", M::NAME), forest)),
    ))
}

/// GET /{resource}/roots
pub async fn roots<M: HierarchyResource>(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    require::<M>(&state, &user, Action::Read).await?;

    let items = HierarchyService::<M>::new(&state.db).roots().await?;

    Ok(list(format!("Root {} entries", M::RESOURCE), items))
}

/// GET /{resource}/{id}/children - Direct children only
pub async fn children<M: HierarchyResource>(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;
    require::<M>(&state, &user, Action::Read).await?;

    let items = HierarchyService::<M>::new(&state.db).children(id).await?;

    Ok(list(format!("{} children", M::NAME), items))
}

/// GET /{resource}/{id}/descendants
pub async fn descendants<M: HierarchyResource>(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;
    require::<M>(&state, &user, Action::Read).await?;

    let items = HierarchyService::<M>::new(&state.db).descendants(id).await?;

    Ok(list(format!("{} descendants", M::NAME), items))
}

/// GET /{resource}/{id}/ancestors - Root first, ending at the parent
pub async fn ancestors<M: HierarchyResource>(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;
    require::<M>(&state, &user, Action::Read).await?;

    let items = HierarchyService::<M>::new(&state.db).ancestors(id).await?;

    Ok(list(format!("{} ancestors", M::NAME), items))
}

/// GET /{resource}/{id}/siblings
pub async fn siblings<M: HierarchyResource>(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;
    require::<M>(&state, &user, Action::Read).await?;

    let items = HierarchyService::<M>::new(&state.db).siblings(id).await?;

    Ok(list(format!("{} siblings", M::NAME), items))
}

/// GET /{resource}/{id}/path - Root first, ending with the entity itself
pub async fn path<M: HierarchyResource>(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;
    require::<M>(&state, &user, Action::Read).await?;

    let items = HierarchyService::<M>::new(&state.db).path(id).await?;

    Ok(list(format!("{} path", M::NAME), items))
}

/// PUT /{resource}/{id}/move - Re-parent a subtree; `parent_id: null` makes it a root
pub async fn move_subtree<M: HierarchyResource>(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<MoveDto>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;
    require::<M>(&state, &user, Action::Update).await?;

    let item = HierarchyService::<M>::new(&state.db)
        .move_subtree(id, payload.parent_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            format!("{} moved", M::NAME),
            item.into_dto(),
        )),
    ))
}

/// DELETE /{resource}/{id}/subtree - Soft-delete an entity and every descendant
pub async fn delete_subtree<M: HierarchyResource>(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;
    require::<M>(&state, &user, Action::Delete).await?;

    let deleted = HierarchyService::<M>::new(&state.db)
        .delete_subtree(id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            format!("{} subtree deleted", M::NAME),
            SubtreeDeletedDto { deleted },
        )),
    ))
}

/// POST /{resource}/validate-hierarchy - Pre-check a move without performing it
pub async fn validate_hierarchy<M: HierarchyResource>(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ValidateHierarchyDto>,
) -> Result<impl IntoResponse, AppError> {
    require::<M>(&state, &user, Action::Read).await?;

    HierarchyService::<M>::new(&state.db)
        .validate_hierarchy(payload.parent_id, payload.child_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Hierarchy is valid",
            HierarchyValidationDto { valid: true },
        )),
    ))
}

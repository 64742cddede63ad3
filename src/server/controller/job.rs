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
        job::{EnqueueJobDto, JobDto, JobStatsDto},
    },
    server::{
        controller::PaginationParams,
        error::AppError,
        middleware::auth::{AuthGuard, AuthUser, Permission},
        model::{
            job::{EnqueueJobParams, Job, JobStatus},
            rbac::Action,
        },
        service::job::JobService,
        state::AppState,
        util::parse::parse_uuid,
    },
};

pub static JOB_TAG: &str = "jobs";
const RESOURCE: &str = "jobs";

pub fn router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(get_jobs, enqueue_job))
        .routes(routes!(get_job_stats))
        .routes(routes!(get_job))
        .routes(routes!(retry_job))
        .routes(routes!(cancel_job))
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct JobQuery {
    /// `pending`, `running`, `completed`, `failed` or `cancelled`.
    pub status: Option<String>,
}

/// GET /api/v1/jobs
#[utoipa::path(
    get,
    path = "/",
    tag = JOB_TAG,
    params(PaginationParams, JobQuery),
    responses(
        (status = 200, description = "Page of jobs", body = [JobDto]),
        (status = 400, description = "Unknown status", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_jobs(
    State(state): State<AppState>,
    user: AuthUser,
    Query(page): Query<PaginationParams>,
    Query(query): Query<JobQuery>,
) -> Result<impl IntoResponse, AppError> {
    let status: Option<JobStatus> = query.status.as_deref().map(str::parse).transpose()?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Read)])
        .await?;

    let jobs = JobService::new(&state.db)
        .get_paginated(status, page.pagination())
        .await?;

    let (jobs, pagination) = jobs.into_dto(Job::into_dto);

    Ok((
        StatusCode::OK,
        Json(ApiResponse::paginated("Jobs retrieved", jobs, pagination)),
    ))
}

/// POST /api/v1/jobs - Enqueue a job for the background worker
#[utoipa::path(
    post,
    path = "/",
    tag = JOB_TAG,
    request_body = EnqueueJobDto,
    responses(
        (status = 201, description = "Job enqueued", body = JobDto),
        (status = 400, description = "Unknown job type", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn enqueue_job(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<EnqueueJobDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Create)])
        .await?;

    let job = JobService::new(&state.db)
        .enqueue(EnqueueJobParams::from_dto(payload)?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Job enqueued", job.into_dto())),
    ))
}

/// GET /api/v1/jobs/stats - Job count per status
#[utoipa::path(
    get,
    path = "/stats",
    tag = JOB_TAG,
    responses((status = 200, description = "Counts per status", body = JobStatsDto)),
    security(("bearer_auth" = []))
)]
pub async fn get_job_stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Read)])
        .await?;

    let stats = JobService::new(&state.db).stats().await?;
    let counts = stats
        .into_iter()
        .map(|(status, count)| (status.to_string(), count))
        .collect();

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Job statistics",
            JobStatsDto { counts },
        )),
    ))
}

/// GET /api/v1/jobs/{id}
#[utoipa::path(
    get,
    path = "/{id}",
    tag = JOB_TAG,
    params(("id" = String, Path, description = "Job UUID")),
    responses(
        (status = 200, description = "Job", body = JobDto),
        (status = 404, description = "Job not found", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Read)])
        .await?;

    let job = JobService::new(&state.db).get(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Job retrieved", job.into_dto())),
    ))
}

/// POST /api/v1/jobs/{id}/retry - Requeue a failed or cancelled job
#[utoipa::path(
    post,
    path = "/{id}/retry",
    tag = JOB_TAG,
    params(("id" = String, Path, description = "Job UUID")),
    responses(
        (status = 200, description = "Job requeued", body = JobDto),
        (status = 404, description = "Job not found", body = ErrorDto),
        (status = 409, description = "Job is not failed or cancelled", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn retry_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Update)])
        .await?;

    let job = JobService::new(&state.db).retry(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Job requeued", job.into_dto())),
    ))
}

/// POST /api/v1/jobs/{id}/cancel - Cancel a pending job
#[utoipa::path(
    post,
    path = "/{id}/cancel",
    tag = JOB_TAG,
    params(("id" = String, Path, description = "Job UUID")),
    responses(
        (status = 200, description = "Job cancelled", body = JobDto),
        (status = 404, description = "Job not found", body = ErrorDto),
        (status = 409, description = "Job is not pending", body = ErrorDto)
    ),
    security(("bearer_auth" = []))
)]
pub async fn cancel_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid(&id)?;

    AuthGuard::new(&state.db, &user)
        .require(&[Permission::new(RESOURCE, Action::Update)])
        .await?;

    let job = JobService::new(&state.db).cancel(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Job cancelled", job.into_dto())),
    ))
}

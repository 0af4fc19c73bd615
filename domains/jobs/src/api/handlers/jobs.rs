//! Job posting API handlers
//!
//! Every handler returns `Result`; failures from the auth gate, request
//! validation, or the store propagate unchanged to `Error::into_response`.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use jobly_auth::AdminUser;
use jobly_common::{Error, Result, ValidatedJson, ValidatedPath};
use serde::Serialize;

use crate::api::middleware::JobsState;
use crate::domain::entities::{Job, JobUpdate, JobWithCompany, NewJob};
use crate::domain::search::JobFilters;

/// `{ "job": ... }`
#[derive(Debug, Serialize)]
pub struct JobEnvelope<T> {
    pub job: T,
}

/// `{ "jobs": [...] }`
#[derive(Debug, Serialize)]
pub struct JobsEnvelope {
    pub jobs: Vec<JobWithCompany>,
}

/// `{ "deleted": id }`
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: i32,
}

/// Create a job posting
///
/// **POST /jobs** (admin)
pub async fn create_job(
    AdminUser(admin): AdminUser,
    State(state): State<JobsState>,
    ValidatedJson(data): ValidatedJson<NewJob>,
) -> Result<(StatusCode, Json<JobEnvelope<Job>>)> {
    let job = state.store.create(data).await?;

    tracing::info!(job_id = job.id, company = %job.company_handle, by = %admin.username, "Job created");

    Ok((StatusCode::CREATED, Json(JobEnvelope { job })))
}

/// List job postings
///
/// **GET /jobs**
///
/// Optional query filters: `minSalary`, `hasEquity` (only the literal
/// `true` enables it), `title` (case-insensitive partial match).
pub async fn list_jobs(
    State(state): State<JobsState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<JobsEnvelope>> {
    let filters = JobFilters::from_query(&params).map_err(Error::BadRequest)?;

    let jobs = state.store.find_all(&filters).await?;
    Ok(Json(JobsEnvelope { jobs }))
}

/// Get a single job posting
///
/// **GET /jobs/{id}**
pub async fn get_job(
    State(state): State<JobsState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> Result<Json<JobEnvelope<JobWithCompany>>> {
    let job = state.store.get(id).await?;
    Ok(Json(JobEnvelope { job }))
}

/// Update title, salary, or equity of a job posting
///
/// **PATCH /jobs/{id}** (admin)
pub async fn update_job(
    AdminUser(admin): AdminUser,
    State(state): State<JobsState>,
    ValidatedPath(id): ValidatedPath<i32>,
    ValidatedJson(data): ValidatedJson<JobUpdate>,
) -> Result<Json<JobEnvelope<Job>>> {
    let job = state.store.update(id, data).await?;

    tracing::info!(job_id = job.id, by = %admin.username, "Job updated");

    Ok(Json(JobEnvelope { job }))
}

/// Delete a job posting
///
/// **DELETE /jobs/{id}** (admin)
pub async fn delete_job(
    AdminUser(admin): AdminUser,
    State(state): State<JobsState>,
    ValidatedPath(id): ValidatedPath<i32>,
) -> Result<Json<DeletedResponse>> {
    state.store.remove(id).await?;

    tracing::info!(job_id = id, by = %admin.username, "Job deleted");

    Ok(Json(DeletedResponse { deleted: id }))
}

//! Jobly application composition root
//!
//! Composes the domain routers and shared infrastructure routes into a
//! single application.

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use jobly_auth::{AuthBackend, AuthConfig};
use jobly_common::Config;
use jobly_jobs::{JobRepository, JobsState};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer};

/// Largest request body accepted, in bytes
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Create the main application router backed by PostgreSQL
pub async fn create_app(config: &Config, pool: PgPool) -> Result<Router, anyhow::Error> {
    let auth = AuthBackend::new(AuthConfig::from(config));
    let jobs_state = JobsState::new(Arc::new(JobRepository::new(pool)), auth);

    Ok(build_router(jobs_state))
}

/// Compose domain routers with shared infrastructure routes
pub fn build_router(jobs_state: JobsState) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check))
        .merge(jobly_jobs::routes().with_state(jobs_state))
}

/// Apply pending migrations from `migrations/`
pub async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    Ok(())
}

/// CORS policy for a comma-separated list of allowed origins
pub fn build_cors_layer(origins: &str) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .filter_map(|o| match o.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Reject request bodies larger than [`MAX_BODY_BYTES`]
pub fn body_limit_layer() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(MAX_BODY_BYTES)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

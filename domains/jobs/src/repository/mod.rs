//! Storage for the Jobs domain
//!
//! `JobStore` is the contract handlers depend on. `JobRepository` backs it
//! with PostgreSQL; `MockJobStore` keeps everything in memory for tests
//! and local demos.

pub mod jobs;
pub mod mock;

use async_trait::async_trait;
use jobly_common::Result;

use crate::domain::entities::{Job, JobUpdate, JobWithCompany, NewJob};
use crate::domain::search::JobFilters;

pub use jobs::JobRepository;
pub use mock::MockJobStore;

/// Persistence operations for job postings.
///
/// Implementations report a missing id as `Error::NotFound("No job: {id}")`
/// and an unknown company handle on create as `Error::BadRequest`.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// Insert a new job and return it with its generated id
    async fn create(&self, data: NewJob) -> Result<Job>;

    /// All jobs matching `filters`, ordered by title
    async fn find_all(&self, filters: &JobFilters) -> Result<Vec<JobWithCompany>>;

    /// A single job with its company name
    async fn get(&self, id: i32) -> Result<JobWithCompany>;

    /// Apply a partial update; an empty update is rejected
    async fn update(&self, id: i32, data: JobUpdate) -> Result<Job>;

    /// Delete a job
    async fn remove(&self, id: i32) -> Result<()>;
}

pub(crate) fn not_found(id: i32) -> jobly_common::RepositoryError {
    jobly_common::RepositoryError::NotFound(format!("No job: {}", id))
}

//! In-memory `JobStore`
//!
//! Mirrors the PostgreSQL repository's semantics (serial ids, company
//! foreign key, title ordering) without a database.
//! Thread-safe via `Arc<Mutex<>>`.

use async_trait::async_trait;
use jobly_common::{Error, RepositoryError, Result};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::{not_found, JobStore};
use crate::domain::entities::{Job, JobUpdate, JobWithCompany, NewJob};
use crate::domain::search::JobFilters;

#[derive(Debug, Default)]
struct MockState {
    /// handle -> company name
    companies: BTreeMap<String, String>,
    jobs: BTreeMap<i32, Job>,
    last_id: i32,
}

impl MockState {
    fn with_company(&self, job: &Job) -> Result<JobWithCompany> {
        let company_name = self
            .companies
            .get(&job.company_handle)
            .cloned()
            .ok_or_else(|| Error::Internal(format!("Orphaned job: {}", job.id)))?;
        Ok(JobWithCompany {
            job: job.clone(),
            company_name,
        })
    }
}

/// In-memory job store for tests and local development.
#[derive(Debug, Clone, Default)]
pub struct MockJobStore {
    state: Arc<Mutex<MockState>>,
}

impl MockJobStore {
    /// Create an empty store with no companies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`MockJobStore::add_company`].
    pub fn with_company(self, handle: &str, name: &str) -> Self {
        self.add_company(handle, name);
        self
    }

    /// Register a company that jobs may reference.
    pub fn add_company(&self, handle: &str, name: &str) {
        self.state
            .lock()
            .expect("mock store lock poisoned")
            .companies
            .insert(handle.to_string(), name.to_string());
    }

    /// Remove a company and, like `ON DELETE CASCADE`, its jobs.
    pub fn remove_company(&self, handle: &str) {
        let mut state = self
            .state
            .lock()
            .expect("mock store lock poisoned");
        state.companies.remove(handle);
        state.jobs.retain(|_, job| job.company_handle != handle);
    }

    /// Snapshot of all stored jobs, ordered by id.
    pub fn jobs(&self) -> Vec<Job> {
        self.state
            .lock()
            .expect("mock store lock poisoned")
            .jobs
            .values()
            .cloned()
            .collect()
    }

    fn lock(&self) -> Result<MutexGuard<'_, MockState>> {
        self.state
            .lock()
            .map_err(|e| Error::Internal(format!("mock store lock poisoned: {e}")))
    }
}

fn matches(job: &Job, filters: &JobFilters) -> bool {
    if let Some(min_salary) = filters.min_salary {
        if !job.salary.is_some_and(|s| i64::from(s) >= min_salary) {
            return false;
        }
    }
    if filters.has_equity && !job.equity.is_some_and(|e| e.is_sign_positive() && !e.is_zero()) {
        return false;
    }
    if let Some(title) = &filters.title {
        if !job.title.to_lowercase().contains(&title.to_lowercase()) {
            return false;
        }
    }
    true
}

#[async_trait]
impl JobStore for MockJobStore {
    async fn create(&self, data: NewJob) -> Result<Job> {
        let mut state = self.lock()?;
        if !state.companies.contains_key(&data.company_handle) {
            return Err(
                RepositoryError::InvalidData(format!("No company: {}", data.company_handle)).into(),
            );
        }

        state.last_id += 1;
        let job = Job {
            id: state.last_id,
            title: data.title,
            salary: data.salary,
            equity: data.equity,
            company_handle: data.company_handle,
        };
        state.jobs.insert(job.id, job.clone());
        tracing::debug!(job_id = job.id, "Mock store: created job");
        Ok(job)
    }

    async fn find_all(&self, filters: &JobFilters) -> Result<Vec<JobWithCompany>> {
        let state = self.lock()?;
        let mut found = state
            .jobs
            .values()
            .filter(|job| matches(job, filters))
            .map(|job| state.with_company(job))
            .collect::<Result<Vec<_>>>()?;
        found.sort_by(|a, b| (&a.job.title, a.job.id).cmp(&(&b.job.title, b.job.id)));
        Ok(found)
    }

    async fn get(&self, id: i32) -> Result<JobWithCompany> {
        let state = self.lock()?;
        let job = state.jobs.get(&id).ok_or_else(|| not_found(id))?;
        state.with_company(job)
    }

    async fn update(&self, id: i32, data: JobUpdate) -> Result<Job> {
        if data.is_empty() {
            return Err(Error::bad_request("No data"));
        }

        let mut state = self.lock()?;
        let job = state.jobs.get_mut(&id).ok_or_else(|| not_found(id))?;
        data.apply_to(job);
        Ok(job.clone())
    }

    async fn remove(&self, id: i32) -> Result<()> {
        let mut state = self.lock()?;
        state.jobs.remove(&id).ok_or_else(|| not_found(id))?;
        Ok(())
    }
}

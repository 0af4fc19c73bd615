//! Jobs domain: job postings, search filters, storage, HTTP routes

pub mod api;
pub mod domain;
pub mod repository;

// Re-export domain types at the crate root for convenience
pub use api::{routes, JobsState};
pub use domain::entities::*;
pub use domain::search::JobFilters;
pub use repository::{JobRepository, JobStore, MockJobStore};

//! Jobs domain state and auth backend integration

use crate::repository::JobStore;
use axum::extract::FromRef;
use jobly_auth::AuthBackend;
use std::sync::Arc;

/// Application state for the Jobs domain
#[derive(Clone)]
pub struct JobsState {
    pub store: Arc<dyn JobStore>,
    pub auth: AuthBackend,
}

impl JobsState {
    pub fn new(store: Arc<dyn JobStore>, auth: AuthBackend) -> Self {
        Self { store, auth }
    }
}

impl FromRef<JobsState> for AuthBackend {
    fn from_ref(state: &JobsState) -> Self {
        state.auth.clone()
    }
}

//! Shared database types for Jobly
//!
//! This module provides common database-related types used across domain repositories.

use crate::error::Error;

/// PostgreSQL SQLSTATE for `foreign_key_violation`
const FOREIGN_KEY_VIOLATION: &str = "23503";

/// PostgreSQL SQLSTATE for `unique_violation`
const UNIQUE_VIOLATION: &str = "23505";

/// Database-specific error types
#[derive(thiserror::Error, Debug)]
pub enum RepositoryError {
    #[error("{0}")]
    NotFound(String),

    #[error("Record already exists")]
    AlreadyExists,

    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Classify a raw sqlx error by its constraint SQLSTATE.
    ///
    /// `on_foreign_key` supplies the message used when a referenced row
    /// is missing.
    pub fn classify(err: sqlx::Error, on_foreign_key: impl FnOnce() -> String) -> Self {
        let code = err
            .as_database_error()
            .and_then(|db| db.code())
            .map(|c| c.into_owned());

        match code.as_deref() {
            Some(FOREIGN_KEY_VIOLATION) => RepositoryError::InvalidData(on_foreign_key()),
            Some(UNIQUE_VIOLATION) => RepositoryError::AlreadyExists,
            _ => RepositoryError::Connection(err),
        }
    }
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => Error::NotFound(msg),
            RepositoryError::AlreadyExists => Error::Conflict("Record already exists".to_string()),
            RepositoryError::Connection(e) => Error::Database(e),
            RepositoryError::InvalidData(msg) => Error::BadRequest(vec![msg]),
        }
    }
}

//! Shared utilities, configuration, and error handling for Jobly
//!
//! This crate provides common functionality used across the Jobly API:
//! - Configuration management following 12-factor principles
//! - Error types and their HTTP mapping
//! - Request body shapes and extractors that run declarative validation

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod schema;

pub use config::Config;
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::{validation_messages, ValidatedJson, ValidatedPath};
pub use schema::{Field, FieldKind, RequestSchema};

//! Domain types for the Jobs domain

pub mod entities;
pub mod search;

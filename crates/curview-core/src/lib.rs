//! Core types, traits, and utilities for curview
//!
//! This crate provides the foundational types, error handling, cost parsing,
//! source configuration and the record source trait used by all other
//! curview crates.

pub mod aggregation_types;
pub mod config;
pub mod cost_parser;
pub mod error;
pub mod provider;
pub mod types;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{CurviewError, Result};
pub use types::{Amount, LineItem, Report};

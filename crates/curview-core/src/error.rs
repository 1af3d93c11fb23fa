//! Error types for curview
//!
//! This module defines the error types used throughout the curview crates.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! # Example
//!
//! ```
//! use curview_core::error::{CurviewError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to CurviewError
//!     let _file = std::fs::read_to_string("nonexistent.json")?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for curview operations
///
/// Only fetching a report can fail in a way the dashboard surfaces. Cost and
/// date parsing fall back silently and never produce one of these.
#[derive(Error, Debug)]
pub enum CurviewError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Parse error with file context
    #[error("Parse error in {file}: {error}")]
    Parse {
        /// The file that caused the error
        file: PathBuf,
        /// The error message
        error: String,
    },

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The report endpoint answered with a non-success status
    #[error("Report endpoint {url} returned HTTP {status}")]
    HttpStatus {
        /// Requested URL
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// No report path or URL was configured and no default report exists
    #[error("No report source configured (use --report, --url or CURVIEW_REPORT)")]
    NoReportSource,

    /// Report file extension is not one of the supported formats
    #[error("Unsupported report format: {0}")]
    UnsupportedFormat(PathBuf),

    /// Invalid date format
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The session could not load its report
    #[error("Report unavailable: {0}")]
    ReportUnavailable(String),
}

/// Convenience type alias for Results in curview
///
/// # Example
///
/// ```
/// use curview_core::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, CurviewError>;

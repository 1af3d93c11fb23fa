//! curview - Aggregate and browse AWS Cost and Usage Report line items
//!
//! This library provides functionality to:
//! - Load report line items from JSON, JSON Lines or CSV files, or over HTTP
//! - Derive monthly and daily cost trends, per-service breakdowns and a
//!   month comparison series
//! - Filter the detail table by an inclusive date range
//! - Hold per-session dashboard state and answer dashboard events
//! - Render the result as terminal tables or JSON
//!
//! # Examples
//!
//! ```no_run
//! use curview::{
//!     filters::FilterUpdate,
//!     session::ViewState,
//!     source::build_source,
//!     config::SourceConfig,
//! };
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> curview::Result<()> {
//!     let config = SourceConfig::from_cli(Some(Path::new("cur.csv")), None)?;
//!     let source = build_source(&config)?;
//!
//!     let mut state = ViewState::load(source.as_ref()).await;
//!     state.update_filters(FilterUpdate {
//!         date_from: Some("2024-02-01".to_string()),
//!         date_to: None,
//!     });
//!
//!     println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
//!     Ok(())
//! }
//! ```

pub mod aggregation;
pub mod cli;
pub mod error;
pub mod filters;
pub mod output;
pub mod serve;
pub mod session;
pub mod source;
pub mod types;

pub use curview_core::config;

// Re-export commonly used types
pub use error::{CurviewError, Result};
pub use types::{Amount, LineItem, Report};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

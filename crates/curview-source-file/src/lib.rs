//! Report file source for curview
//!
//! This crate implements the record source trait for report exports stored
//! on disk as JSON, JSON Lines or CSV.

pub mod data_loader;

pub use data_loader::{DataLoader, ReportFormat};

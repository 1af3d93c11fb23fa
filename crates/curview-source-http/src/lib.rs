//! HTTP report source for curview
//!
//! This crate implements the record source trait for reports served as JSON
//! by an HTTP endpoint (a billing API or a static export bucket).

pub mod data_loader;

pub use data_loader::DataLoader;

//! Record source trait
//!
//! This module defines the `RecordSource` trait that every source crate
//! implements. A source is called once per dashboard session and either
//! returns the whole report or fails with a reason.

use crate::error::Result;
use crate::types::Report;
use async_trait::async_trait;

/// Trait for report sources (files, HTTP endpoints, fixtures).
///
/// The session layer only ever talks to this trait, so the binary can pick a
/// source from configuration and tests can substitute in-memory reports.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch all line items plus the source's opaque summary.
    async fn fetch_report(&self) -> Result<Report>;

    /// Human readable description used in logs.
    fn describe(&self) -> String;
}

/// A source that serves a report already held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    report: Report,
}

impl StaticSource {
    pub fn new(report: Report) -> Self {
        Self { report }
    }
}

#[async_trait]
impl RecordSource for StaticSource {
    async fn fetch_report(&self) -> Result<Report> {
        Ok(self.report.clone())
    }

    fn describe(&self) -> String {
        format!("in-memory report ({} line items)", self.report.line_items.len())
    }
}

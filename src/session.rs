//! Per-session dashboard state
//!
//! A [`ViewState`] is created once per dashboard session. It fetches the
//! report exactly once, derives the chart views from the full line item list,
//! and afterwards only changes in response to filter events. Filter events
//! rebuild the detail table; they never touch the derived views and never
//! re-fetch the report.
//!
//! A failed fetch is terminal for the session: the state records the error,
//! holds no line items and reports empty views until the session is replaced.

use crate::aggregation::{Aggregator, DashboardViews};
use crate::filters::{FilterSpec, FilterUpdate, apply_filters};
use crate::types::{LineItem, Report};
use curview_core::provider::RecordSource;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

/// Events a presentation layer can send to a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DashboardEvent {
    /// Change one or both filter bounds
    UpdateFilters(FilterUpdate),
    /// Reset both bounds to empty
    ClearFilters,
    /// The user asked for an export; rendering it is the caller's job
    RequestExport,
    /// Ask for the current state without changing it
    Snapshot,
}

/// What a session answers to an event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventOutcome {
    Snapshot(Box<DashboardSnapshot>),
    Export(ExportAck),
}

/// Acknowledgement of an export request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportAck {
    /// Always true; the export itself happens outside the session
    pub acknowledged: bool,
    /// Rows the detail table held when the export was requested
    pub filtered_items: usize,
    /// Exports requested so far in this session
    pub requests: usize,
}

/// Serializable view of a session for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Chart views, always derived from the unfiltered line items
    #[serde(flatten)]
    pub views: DashboardViews,
    /// Detail table rows after filtering
    pub filtered_items: Vec<LineItem>,
    /// Number of line items before filtering
    pub total_items: usize,
    /// Current filter bounds
    pub filters: FilterSpec,
    /// Source summary, passed through untouched
    pub aggregate: Value,
    /// Fetch error, if the report could not be loaded
    pub error: Option<String>,
}

/// State of one dashboard session
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    items: Vec<LineItem>,
    filtered: Vec<LineItem>,
    views: DashboardViews,
    filters: FilterSpec,
    aggregate: Value,
    error: Option<String>,
    export_requests: usize,
}

impl ViewState {
    /// Fetch the report once and build the initial state
    ///
    /// Never fails: a fetch error is stored in the state instead.
    pub async fn load(source: &dyn RecordSource) -> Self {
        info!("Loading {}", source.describe());
        match source.fetch_report().await {
            Ok(report) => Self::from_report(report),
            Err(e) => {
                warn!("Failed to load {}: {}", source.describe(), e);
                Self::failed(e.to_string())
            }
        }
    }

    /// Build a state from an already fetched report, unfiltered
    pub fn from_report(report: Report) -> Self {
        Self::from_report_with_filters(report, FilterSpec::default())
    }

    /// Build a state from a report with initial filter bounds
    pub fn from_report_with_filters(report: Report, filters: FilterSpec) -> Self {
        let views = Aggregator::aggregate(&report.line_items);
        let filtered = apply_filters(&report.line_items, &filters);
        info!(
            "Session loaded with {} line items ({} after filtering)",
            report.line_items.len(),
            filtered.len()
        );
        Self {
            items: report.line_items,
            filtered,
            views,
            filters,
            aggregate: report.aggregate,
            error: None,
            export_requests: 0,
        }
    }

    /// State for a session whose fetch failed
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// Merge a partial filter update and rebuild the detail table
    pub fn update_filters(&mut self, update: FilterUpdate) {
        self.filters.apply_update(update);
        self.refilter();
    }

    /// Reset the filter and show every line item again
    pub fn clear_filters(&mut self) {
        self.filters = FilterSpec::default();
        self.refilter();
    }

    /// Acknowledge an export request
    pub fn request_export(&mut self) -> ExportAck {
        self.export_requests += 1;
        info!(
            "Export requested ({} rows, request #{})",
            self.filtered.len(),
            self.export_requests
        );
        ExportAck {
            acknowledged: true,
            filtered_items: self.filtered.len(),
            requests: self.export_requests,
        }
    }

    /// Apply one event and produce the response for the caller
    pub fn handle(&mut self, event: DashboardEvent) -> EventOutcome {
        match event {
            DashboardEvent::UpdateFilters(update) => self.update_filters(update),
            DashboardEvent::ClearFilters => self.clear_filters(),
            DashboardEvent::RequestExport => return EventOutcome::Export(self.request_export()),
            DashboardEvent::Snapshot => {}
        }
        EventOutcome::Snapshot(Box::new(self.snapshot()))
    }

    fn refilter(&mut self) {
        self.filtered = apply_filters(&self.items, &self.filters);
        info!(
            "Filter {:?}..{:?} keeps {} of {} line items",
            self.filters.date_from,
            self.filters.date_to,
            self.filtered.len(),
            self.items.len()
        );
    }

    /// Current state as plain structured data
    pub fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            views: self.views.clone(),
            filtered_items: self.filtered.clone(),
            total_items: self.items.len(),
            filters: self.filters.clone(),
            aggregate: self.aggregate.clone(),
            error: self.error.clone(),
        }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn filtered_items(&self) -> &[LineItem] {
        &self.filtered
    }

    pub fn views(&self) -> &DashboardViews {
        &self.views
    }

    pub fn filters(&self) -> &FilterSpec {
        &self.filters
    }

    pub fn aggregate(&self) -> &Value {
        &self.aggregate
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

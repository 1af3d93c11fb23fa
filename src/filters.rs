//! Filtering module for the detail table
//!
//! Applies an inclusive date-range predicate to line items. Filtering is
//! lenient: a bound that is empty is ignored, and a comparison where either
//! the bound or the record's date can't be parsed passes. Malformed dates in
//! the report therefore stay visible instead of silently disappearing.
//!
//! # Examples
//!
//! ```
//! use curview::filters::{FilterSpec, apply_filters};
//! use curview::types::LineItem;
//!
//! let items = vec![
//!     LineItem::new().with_period("2024-01-15", "2024-01-31"),
//!     LineItem::new().with_period("2024-02-01", "2024-02-29"),
//! ];
//!
//! let filter = FilterSpec::new().with_from("2024-02-01").with_to("2024-02-29");
//! let filtered = apply_filters(&items, &filter);
//! assert_eq!(filtered.len(), 1);
//! ```

use crate::types::LineItem;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Date range for the detail table
///
/// Bounds are kept as the raw strings the user entered; an empty string means
/// the bound is not set.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Lower bound on period start (inclusive)
    #[serde(default)]
    pub date_from: String,
    /// Upper bound on period end (inclusive)
    #[serde(default)]
    pub date_to: String,
}

/// Partial update to a [`FilterSpec`]; `None` fields keep their current value
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterUpdate {
    #[serde(default)]
    pub date_from: Option<String>,
    #[serde(default)]
    pub date_to: Option<String>,
}

impl FilterSpec {
    /// Create a new filter with no restrictions
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the lower bound
    pub fn with_from(mut self, date: impl Into<String>) -> Self {
        self.date_from = date.into();
        self
    }

    /// Set the upper bound
    pub fn with_to(mut self, date: impl Into<String>) -> Self {
        self.date_to = date.into();
        self
    }

    /// Whether any bound is set
    pub fn is_active(&self) -> bool {
        !self.date_from.is_empty() || !self.date_to.is_empty()
    }

    /// Merge a partial update into this filter
    pub fn apply_update(&mut self, update: FilterUpdate) {
        if let Some(from) = update.date_from {
            self.date_from = from;
        }
        if let Some(to) = update.date_to {
            self.date_to = to;
        }
    }

    /// Check if an item passes the filter
    pub fn matches(&self, item: &LineItem) -> bool {
        let after_from = self.date_from.is_empty()
            || compare_dates(item.period_start.as_deref(), &self.date_from)
                .is_none_or(|(date, bound)| date >= bound);

        let before_to = self.date_to.is_empty()
            || compare_dates(item.period_end.as_deref(), &self.date_to)
                .is_none_or(|(date, bound)| date <= bound);

        after_from && before_to
    }
}

/// Keep the items that pass `filter`, in their original order
pub fn apply_filters(items: &[LineItem], filter: &FilterSpec) -> Vec<LineItem> {
    if !filter.is_active() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| filter.matches(item))
        .cloned()
        .collect()
}

/// Parse both sides of a comparison, or `None` if either side is unusable
fn compare_dates(field: Option<&str>, bound: &str) -> Option<(NaiveDate, NaiveDate)> {
    let Some(date) = field.and_then(parse_iso_date) else {
        trace!("Unparsable record date {:?}, keeping record", field);
        return None;
    };
    let Some(bound) = parse_iso_date(bound) else {
        trace!("Unparsable filter bound {:?}, ignoring bound", bound);
        return None;
    };
    Some((date, bound))
}

/// Parse an ISO-8601 calendar date or timestamp down to its date
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive
/// `YYYY-MM-DDTHH:MM:SS[.f]` timestamps.
pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

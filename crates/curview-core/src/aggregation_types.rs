//! Aggregation data types for curview
//!
//! Pure data structures for the chart-ready views derived from a report.
//! These types have no dependencies on the aggregator or the record sources.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Month key used for records whose period start is not `YYYY-MM...`
pub const UNKNOWN_MONTH: &str = "unknown";

/// Breakdown key used for records without a product code
pub const UNKNOWN_PRODUCT: &str = "Unknown";

/// Number of months in the comparison series
pub const COMPARISON_MONTHS: usize = 3;

/// Total cost for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPoint {
    /// Month in `YYYY-MM` format, or `"unknown"`
    pub month: String,
    /// Cost for the month, rounded to cents
    pub cost: f64,
}

/// Total cost for one raw period start value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    /// Period start exactly as it appears in the report
    pub date: String,
    /// Cost for the period start, rounded to cents
    pub cost: f64,
}

/// Cost per product code
///
/// Consumers must not rely on the iteration order; a `BTreeMap` is used only so
/// serialized output is stable between runs.
pub type CostBreakdown = BTreeMap<String, f64>;

/// Parallel label and value sequences for the month comparison chart
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSeries {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

impl ComparisonSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Every derived view the dashboard charts are drawn from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardViews {
    /// Monthly trend, ascending by month string
    pub monthly: Vec<MonthlyPoint>,
    /// Daily trend, ascending by raw period start
    pub daily: Vec<DailyPoint>,
    /// Cost per product code
    pub breakdown: CostBreakdown,
    /// First months of the monthly trend side by side
    pub comparison: ComparisonSeries,
    /// Cost of the lexically last month, 0.0 when there are no months
    pub latest_total: f64,
    /// Number of textual costs that had no numeric prefix and counted as 0.0
    #[serde(default)]
    pub unparsed_costs: usize,
}

impl DashboardViews {
    /// Sum of all monthly points
    pub fn total_cost(&self) -> f64 {
        self.monthly.iter().map(|m| m.cost).sum()
    }
}

//! Aggregation module for deriving dashboard views from line items
//!
//! Every view is a single pass over the unfiltered line items:
//!
//! - **Monthly trend**: costs grouped by the `YYYY-MM` prefix of the period
//!   start, with anything not shaped like that grouped under `"unknown"`.
//! - **Daily trend**: costs grouped by the raw period start string.
//! - **Breakdown**: costs grouped by product code (`"Unknown"` when missing).
//! - **Comparison**: the first three months of the monthly trend.
//! - **Latest total**: the cost of the lexically last month.
//!
//! Keys are ordered lexically, not chronologically. For well-formed `YYYY-MM`
//! keys the two agree; `"unknown"` sorts after every numeric month and so can
//! become the latest month when malformed dates are present.
//!
//! # Examples
//!
//! ```
//! use curview::aggregation::Aggregator;
//! use curview::types::{Amount, LineItem};
//!
//! let items = vec![
//!     LineItem::new()
//!         .with_cost(Amount::Number(10.0))
//!         .with_period("2024-01-05", "2024-01-05"),
//!     LineItem::new()
//!         .with_cost(Amount::Text("5.5".to_string()))
//!         .with_period("2024-01-20", "2024-01-20"),
//! ];
//!
//! let views = Aggregator::aggregate(&items);
//! assert_eq!(views.monthly.len(), 1);
//! assert_eq!(views.monthly[0].month, "2024-01");
//! assert_eq!(views.monthly[0].cost, 15.5);
//! assert_eq!(views.latest_total, 15.5);
//! ```

use crate::types::LineItem;
use curview_core::cost_parser;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use tracing::debug;

pub use curview_core::aggregation_types::{
    COMPARISON_MONTHS, ComparisonSeries, CostBreakdown, DailyPoint, DashboardViews, MonthlyPoint,
    UNKNOWN_MONTH, UNKNOWN_PRODUCT,
};

/// Key used by the daily trend for records without a period start
///
/// Daily keys are raw period start strings, so a record whose period start is
/// literally `"unknown"` lands in the same bucket as records without one.
pub const MISSING_PERIOD: &str = "unknown";

/// Round to two decimal places, ties to even
///
/// Rounds the exact binary value, so `2.675` (stored slightly below) becomes
/// `2.67` and the exactly representable `0.125` becomes `0.12`.
pub fn round_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Month key for a period start: the `YYYY-MM` prefix or `"unknown"`
///
/// Only the shape is checked (four digits, a hyphen, two digits); the month
/// number itself is not range-checked.
pub fn month_key(period_start: Option<&str>) -> &str {
    period_start
        .and_then(|start| MONTH_PREFIX.as_ref()?.find(start))
        .map_or(UNKNOWN_MONTH, |prefix| prefix.as_str())
}

static MONTH_PREFIX: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}").ok());

/// Running cost total for one group
#[derive(Debug, Default)]
struct CostAccumulator {
    total: f64,
    items: usize,
}

impl CostAccumulator {
    fn add(&mut self, cost: f64) {
        self.total += cost;
        self.items += 1;
    }

    fn rounded(&self) -> f64 {
        round_cents(self.total)
    }
}

/// Grouped totals keyed by string, in ascending lexical key order
type Groups = BTreeMap<String, CostAccumulator>;

fn add_to_group(groups: &mut Groups, key: &str, cost: f64) {
    match groups.get_mut(key) {
        Some(acc) => acc.add(cost),
        None => {
            let mut acc = CostAccumulator::default();
            acc.add(cost);
            groups.insert(key.to_string(), acc);
        }
    }
}

/// Derives the dashboard views from line items
pub struct Aggregator;

impl Aggregator {
    /// Compute every derived view in one pass
    pub fn aggregate(items: &[LineItem]) -> DashboardViews {
        let mut monthly = Groups::new();
        let mut daily = Groups::new();
        let mut breakdown = Groups::new();
        let mut unparsed_costs = 0;

        for item in items {
            if item.cost.as_ref().is_some_and(cost_parser::is_unparsable) {
                unparsed_costs += 1;
            }
            let cost = item.cost();

            add_to_group(&mut monthly, month_key(item.period_start.as_deref()), cost);
            add_to_group(&mut daily, daily_key(item), cost);
            add_to_group(&mut breakdown, product_key(item), cost);
        }

        if unparsed_costs > 0 {
            debug!("{} line items had unparsable costs, counted as 0.0", unparsed_costs);
        }

        let monthly = Self::monthly_points(monthly);
        let comparison = Self::comparison_series(&monthly);
        let latest_total = Self::latest_total(&monthly);

        debug!(
            "Aggregated {} line items into {} months, {} periods, {} products",
            items.len(),
            monthly.len(),
            daily.len(),
            breakdown.len()
        );

        DashboardViews {
            monthly,
            daily: Self::daily_points(daily),
            breakdown: Self::breakdown_map(breakdown),
            comparison,
            latest_total,
            unparsed_costs,
        }
    }

    /// Monthly trend, ascending by month string
    pub fn monthly_trend(items: &[LineItem]) -> Vec<MonthlyPoint> {
        let mut groups = Groups::new();
        for item in items {
            add_to_group(&mut groups, month_key(item.period_start.as_deref()), item.cost());
        }
        Self::monthly_points(groups)
    }

    /// Daily trend, ascending by raw period start
    pub fn daily_trend(items: &[LineItem]) -> Vec<DailyPoint> {
        let mut groups = Groups::new();
        for item in items {
            add_to_group(&mut groups, daily_key(item), item.cost());
        }
        Self::daily_points(groups)
    }

    /// Cost per product code
    pub fn cost_breakdown(items: &[LineItem]) -> CostBreakdown {
        let mut groups = Groups::new();
        for item in items {
            add_to_group(&mut groups, product_key(item), item.cost());
        }
        Self::breakdown_map(groups)
    }

    /// First three months of a monthly trend as parallel sequences
    ///
    /// The input is sorted again before slicing so callers may pass points in
    /// any order. Fewer than three months yields a shorter series.
    pub fn comparison_series(monthly: &[MonthlyPoint]) -> ComparisonSeries {
        let mut sorted: Vec<&MonthlyPoint> = monthly.iter().collect();
        sorted.sort_by(|a, b| a.month.cmp(&b.month));

        let (labels, data) = sorted
            .into_iter()
            .take(COMPARISON_MONTHS)
            .map(|point| (point.month.clone(), point.cost))
            .unzip();

        ComparisonSeries { labels, data }
    }

    /// Cost of the lexically last month, or 0.0 without any months
    pub fn latest_total(monthly: &[MonthlyPoint]) -> f64 {
        monthly
            .iter()
            .max_by(|a, b| a.month.cmp(&b.month))
            .map_or(0.0, |point| point.cost)
    }

    fn monthly_points(groups: Groups) -> Vec<MonthlyPoint> {
        groups
            .into_iter()
            .map(|(month, acc)| MonthlyPoint {
                cost: acc.rounded(),
                month,
            })
            .collect()
    }

    fn daily_points(groups: Groups) -> Vec<DailyPoint> {
        groups
            .into_iter()
            .map(|(date, acc)| DailyPoint {
                cost: acc.rounded(),
                date,
            })
            .collect()
    }

    fn breakdown_map(groups: Groups) -> CostBreakdown {
        groups
            .into_iter()
            .map(|(code, acc)| {
                debug!("{}: {} line items", code, acc.items);
                (code, acc.rounded())
            })
            .collect()
    }
}

fn daily_key(item: &LineItem) -> &str {
    item.period_start.as_deref().unwrap_or(MISSING_PERIOD)
}

fn product_key(item: &LineItem) -> &str {
    item.product_code.as_deref().unwrap_or(UNKNOWN_PRODUCT)
}

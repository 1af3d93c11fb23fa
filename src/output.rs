//! Output formatting module for curview
//!
//! This module provides formatters for displaying dashboard data:
//! - Table format for human-readable terminal output
//! - JSON format for chart-rendering and export collaborators
//!
//! # Examples
//!
//! ```
//! use curview::output::get_formatter;
//! use curview::aggregation::MonthlyPoint;
//!
//! let monthly = vec![MonthlyPoint { month: "2024-01".to_string(), cost: 15.5 }];
//!
//! let formatter = get_formatter(false);
//! assert!(formatter.format_monthly(&monthly).contains("2024-01"));
//!
//! let json_formatter = get_formatter(true);
//! assert!(json_formatter.format_monthly(&monthly).contains("\"monthly\""));
//! ```

use crate::aggregation::{ComparisonSeries, CostBreakdown, DailyPoint, MonthlyPoint};
use crate::filters::FilterSpec;
use crate::session::DashboardSnapshot;
use crate::types::LineItem;
use colored::Colorize;
use prettytable::{Table, format, row};
use serde_json::{Value, json};

/// Trait for output formatters
///
/// Each method renders one dashboard view. Implementations decide the
/// concrete format (table, JSON, ...).
pub trait OutputFormatter {
    /// Format the monthly cost trend
    fn format_monthly(&self, data: &[MonthlyPoint]) -> String;

    /// Format the daily cost trend
    fn format_daily(&self, data: &[DailyPoint]) -> String;

    /// Format the per-product cost breakdown
    fn format_breakdown(&self, data: &CostBreakdown) -> String;

    /// Format the month comparison series
    fn format_comparison(&self, data: &ComparisonSeries) -> String;

    /// Format the filtered detail table
    fn format_items(&self, items: &[LineItem], filters: &FilterSpec, total_items: usize)
    -> String;

    /// Format a whole dashboard snapshot
    fn format_summary(&self, snapshot: &DashboardSnapshot) -> String;
}

/// Table formatter for human-readable output
pub struct TableFormatter;

impl TableFormatter {
    /// Format currency with dollar sign
    fn format_currency(amount: f64) -> String {
        format!("${amount:.2}")
    }

    /// Share of `total`, as a percentage string
    fn format_share(amount: f64, total: f64) -> String {
        if total == 0.0 {
            "-".to_string()
        } else {
            format!("{:.1}%", amount / total * 100.0)
        }
    }

    fn new_table() -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table
    }

    fn describe_filters(filters: &FilterSpec) -> String {
        if !filters.is_active() {
            return "no date filter".to_string();
        }
        let from = if filters.date_from.is_empty() {
            "*"
        } else {
            filters.date_from.as_str()
        };
        let to = if filters.date_to.is_empty() {
            "*"
        } else {
            filters.date_to.as_str()
        };
        format!("{from} to {to}")
    }

    fn format_error(message: &str) -> String {
        format!(
            "{} {}\n",
            "Report unavailable:".red().bold(),
            message
        )
    }
}

impl OutputFormatter for TableFormatter {
    fn format_monthly(&self, data: &[MonthlyPoint]) -> String {
        let mut table = Self::new_table();
        table.set_titles(row![b -> "Month", b -> "Cost"]);

        for point in data {
            table.add_row(row![point.month, r -> Self::format_currency(point.cost)]);
        }

        let total: f64 = data.iter().map(|p| p.cost).sum();
        table.add_row(row![b -> "TOTAL", rb -> Self::format_currency(total)]);

        format!("\n=== Monthly Cost Trend ===\n{table}")
    }

    fn format_daily(&self, data: &[DailyPoint]) -> String {
        let mut table = Self::new_table();
        table.set_titles(row![b -> "Period Start", b -> "Cost"]);

        for point in data {
            table.add_row(row![point.date, r -> Self::format_currency(point.cost)]);
        }

        let total: f64 = data.iter().map(|p| p.cost).sum();
        table.add_row(row![b -> "TOTAL", rb -> Self::format_currency(total)]);

        format!("\n=== Daily Cost Trend ===\n{table}")
    }

    fn format_breakdown(&self, data: &CostBreakdown) -> String {
        let mut table = Self::new_table();
        table.set_titles(row![b -> "Product Code", b -> "Cost", b -> "Share"]);

        let total: f64 = data.values().sum();

        // Largest spend first for reading; the breakdown itself is unordered
        let mut entries: Vec<(&String, &f64)> = data.iter().collect();
        entries.sort_by(|a, b| b.1.total_cmp(a.1).then_with(|| a.0.cmp(b.0)));

        for (code, cost) in entries {
            table.add_row(row![
                code,
                r -> Self::format_currency(*cost),
                r -> Self::format_share(*cost, total)
            ]);
        }
        table.add_row(row![b -> "TOTAL", rb -> Self::format_currency(total), ""]);

        format!("\n=== Cost by Service ===\n{table}")
    }

    fn format_comparison(&self, data: &ComparisonSeries) -> String {
        let mut table = Self::new_table();
        table.set_titles(row![b -> "Month", b -> "Cost", b -> "Change"]);

        let mut previous: Option<f64> = None;
        for (label, cost) in data.labels.iter().zip(&data.data) {
            let change = match previous {
                Some(prev) => format!("{:+.2}", cost - prev),
                None => "-".to_string(),
            };
            table.add_row(row![label, r -> Self::format_currency(*cost), r -> change]);
            previous = Some(*cost);
        }

        format!("\n=== Month Comparison ===\n{table}")
    }

    fn format_items(
        &self,
        items: &[LineItem],
        filters: &FilterSpec,
        total_items: usize,
    ) -> String {
        let mut table = Self::new_table();
        table.set_titles(row![
            b -> "Project ID",
            b -> "Product Code",
            b -> "Service Usage Details",
            b -> "Description",
            b -> "Usage Quantity",
            b -> "Cost",
            b -> "Period Start",
            b -> "Period End",
            b -> "Payment Method"
        ]);

        for item in items {
            table.add_row(row![
                item.display_project_id(),
                item.display_product_code(),
                item.display_service_usage_details(),
                item.display_description(),
                r -> item.display_usage_quantity(),
                r -> item.display_cost(),
                item.display_period_start(),
                item.display_period_end(),
                item.display_payment_method()
            ]);
        }

        format!(
            "\n=== Line Items ({} of {}, {}) ===\n{}",
            items.len(),
            total_items,
            Self::describe_filters(filters),
            table
        )
    }

    fn format_summary(&self, snapshot: &DashboardSnapshot) -> String {
        if let Some(error) = &snapshot.error {
            return Self::format_error(error);
        }

        let views = &snapshot.views;
        let mut output = String::new();
        output.push_str(&format!(
            "{} {}\n",
            "Latest month total:".bold(),
            Self::format_currency(views.latest_total)
        ));
        if views.unparsed_costs > 0 {
            output.push_str(&format!(
                "{}\n",
                format!(
                    "{} line items had unreadable costs and were counted as $0.00",
                    views.unparsed_costs
                )
                .yellow()
            ));
        }
        output.push_str(&self.format_monthly(&views.monthly));
        output.push_str(&self.format_comparison(&views.comparison));
        output.push_str(&self.format_breakdown(&views.breakdown));
        output.push_str(&self.format_daily(&views.daily));
        output.push_str(&self.format_items(
            &snapshot.filtered_items,
            &snapshot.filters,
            snapshot.total_items,
        ));
        output
    }
}

/// JSON formatter for machine-readable output
///
/// Field names match the dashboard snapshot so chart and export hooks can
/// consume either.
pub struct JsonFormatter;

impl JsonFormatter {
    fn to_pretty(value: &Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_monthly(&self, data: &[MonthlyPoint]) -> String {
        Self::to_pretty(&json!({ "monthly": data }))
    }

    fn format_daily(&self, data: &[DailyPoint]) -> String {
        Self::to_pretty(&json!({ "daily": data }))
    }

    fn format_breakdown(&self, data: &CostBreakdown) -> String {
        Self::to_pretty(&json!({ "breakdown": data }))
    }

    fn format_comparison(&self, data: &ComparisonSeries) -> String {
        Self::to_pretty(&json!({ "comparison": data }))
    }

    fn format_items(
        &self,
        items: &[LineItem],
        filters: &FilterSpec,
        total_items: usize,
    ) -> String {
        Self::to_pretty(&json!({
            "filtered_items": items,
            "total_items": total_items,
            "filters": filters,
        }))
    }

    fn format_summary(&self, snapshot: &DashboardSnapshot) -> String {
        let value = serde_json::to_value(snapshot).unwrap_or_else(|e| json!({ "error": e.to_string() }));
        Self::to_pretty(&value)
    }
}

/// Get the appropriate formatter based on output preference
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter)
    }
}

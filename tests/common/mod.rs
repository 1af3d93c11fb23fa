//! Common test utilities and helpers for curview tests
//!
//! Builders for line items, a realistic sample report, and helpers that
//! write that report to temporary files in every supported format.

#![allow(dead_code)]

use async_trait::async_trait;
use curview::{
    error::{CurviewError, Result},
    types::{Amount, LineItem, Report},
};
use curview_core::provider::{RecordSource, StaticSource};
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

/// Common test product codes
pub const TEST_PRODUCTS: &[&str] = &["AmazonEC2", "AmazonS3", "AWSLambda", "AmazonRDS"];

/// Builder for creating test LineItem instances
pub struct LineItemBuilder {
    item: LineItem,
}

impl LineItemBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            item: LineItem {
                project_id: Some("123456789012".to_string()),
                service_usage_details: Some("USE1-BoxUsage:t3.micro".to_string()),
                product_code: Some(TEST_PRODUCTS[0].to_string()),
                description: Some("On Demand Linux t3.micro Instance Hour".to_string()),
                cost: Some(Amount::Number(1.0)),
                usage_quantity: Some(Amount::Number(1.0)),
                period_start: Some("2024-01-01".to_string()),
                period_end: Some("2024-01-31".to_string()),
                payment_method: Some("Invoice".to_string()),
            },
        }
    }

    pub fn product(mut self, code: &str) -> Self {
        self.item.product_code = Some(code.to_string());
        self
    }

    pub fn no_product(mut self) -> Self {
        self.item.product_code = None;
        self
    }

    pub fn cost(mut self, cost: f64) -> Self {
        self.item.cost = Some(Amount::Number(cost));
        self
    }

    pub fn cost_text(mut self, cost: &str) -> Self {
        self.item.cost = Some(Amount::Text(cost.to_string()));
        self
    }

    pub fn period(mut self, start: &str, end: &str) -> Self {
        self.item.period_start = Some(start.to_string());
        self.item.period_end = Some(end.to_string());
        self
    }

    pub fn build(self) -> LineItem {
        self.item
    }
}

/// A quarter of billing data with a couple of awkward records
pub fn sample_items() -> Vec<LineItem> {
    vec![
        LineItemBuilder::new()
            .product("AmazonEC2")
            .cost(10.0)
            .period("2024-01-05", "2024-01-05")
            .build(),
        LineItemBuilder::new()
            .product("AmazonS3")
            .cost_text("5.5")
            .period("2024-01-20", "2024-01-20")
            .build(),
        LineItemBuilder::new()
            .product("AmazonEC2")
            .cost(12.25)
            .period("2024-02-01", "2024-02-29")
            .build(),
        LineItemBuilder::new()
            .product("AWSLambda")
            .cost_text("0.75 USD")
            .period("2024-02-10", "2024-02-10")
            .build(),
        LineItemBuilder::new()
            .product("AmazonRDS")
            .cost(30.0)
            .period("2024-03-01", "2024-03-31")
            .build(),
        LineItemBuilder::new()
            .no_product()
            .cost_text("n/a")
            .period("2024-03-15", "2024-03-15")
            .build(),
    ]
}

pub fn sample_report() -> Report {
    Report {
        line_items: sample_items(),
        aggregate: json!({"total_cost": 58.5, "currency": "USD"}),
    }
}

/// Column order used for CSV fixtures
const CSV_COLUMNS: &[&str] = &[
    "Project ID",
    "Service Usage Details",
    "Product Code",
    "Line-item Description",
    "Cost",
    "Usage Quantity",
    "Period Start",
    "Period End",
    "Payment Method",
];

fn csv_cell(value: Option<String>) -> String {
    let value = value.unwrap_or_default();
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value
    }
}

fn amount_text(amount: &Option<Amount>) -> Option<String> {
    amount.as_ref().map(|a| a.to_string())
}

/// Test fixture that writes reports into a temporary directory
pub struct ReportFixture {
    pub dir: TempDir,
}

impl ReportFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, content).expect("write fixture");
        path
    }

    pub fn write_json(&self, report: &Report) -> PathBuf {
        self.write(
            "report.json",
            &serde_json::to_string_pretty(report).expect("serialize report"),
        )
    }

    pub fn write_jsonl(&self, items: &[LineItem]) -> PathBuf {
        let content = items
            .iter()
            .map(|item| serde_json::to_string(item).expect("serialize item"))
            .collect::<Vec<_>>()
            .join("\n");
        self.write("report.jsonl", &content)
    }

    pub fn write_csv(&self, items: &[LineItem]) -> PathBuf {
        let mut lines = vec![CSV_COLUMNS.join(",")];
        for item in items {
            let cells = [
                item.project_id.clone(),
                item.service_usage_details.clone(),
                item.product_code.clone(),
                item.description.clone(),
                amount_text(&item.cost),
                amount_text(&item.usage_quantity),
                item.period_start.clone(),
                item.period_end.clone(),
                item.payment_method.clone(),
            ];
            lines.push(cells.into_iter().map(csv_cell).collect::<Vec<_>>().join(","));
        }
        self.write("report.csv", &lines.join("\n"))
    }
}

/// Record source that always fails, counting how often it was asked
#[derive(Default)]
pub struct FailingSource {
    pub calls: AtomicUsize,
}

#[async_trait]
impl RecordSource for FailingSource {
    async fn fetch_report(&self) -> Result<Report> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CurviewError::HttpStatus {
            url: "https://billing.example.com/cur".to_string(),
            status: 503,
        })
    }

    fn describe(&self) -> String {
        "failing test source".to_string()
    }
}

/// In-memory source that counts how often it was fetched
pub struct CountingSource {
    inner: StaticSource,
    pub calls: AtomicUsize,
}

impl CountingSource {
    pub fn new(report: Report) -> Self {
        Self {
            inner: StaticSource::new(report),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RecordSource for CountingSource {
    async fn fetch_report(&self) -> Result<Report> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch_report().await
    }

    fn describe(&self) -> String {
        format!("counting {}", self.inner.describe())
    }
}

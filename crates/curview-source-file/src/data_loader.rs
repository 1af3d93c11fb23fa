//! Report file loader
//!
//! Reads a Cost and Usage Report export from disk. The format is picked from
//! the file extension:
//!
//! - `.json`: `{"line_items": [...], "aggregate": ...}` or a bare array of items
//! - `.jsonl` / `.ndjson`: one line item object per line
//! - `.csv`: header row with the report column names
//!
//! Line-oriented formats are tolerant: a malformed line or row is logged and
//! skipped instead of failing the whole report.

use async_trait::async_trait;
use curview_core::error::{CurviewError, Result};
use curview_core::provider::RecordSource;
use curview_core::types::{LineItem, Report};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Supported report file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    JsonLines,
    Csv,
}

impl ReportFormat {
    /// Detect the format from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "jsonl" | "ndjson" => Some(Self::JsonLines),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }
}

/// Data loader for report files.
pub struct DataLoader {
    path: PathBuf,
    format: ReportFormat,
}

impl DataLoader {
    /// Create a loader for `path`, rejecting unknown extensions up front
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let format = ReportFormat::from_path(&path)
            .ok_or_else(|| CurviewError::UnsupportedFormat(path.clone()))?;
        Ok(Self { path, format })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> ReportFormat {
        self.format
    }

    fn parse_error(&self, error: impl ToString) -> CurviewError {
        CurviewError::Parse {
            file: self.path.clone(),
            error: error.to_string(),
        }
    }

    fn parse_json(&self, content: &str) -> Result<Report> {
        let value: Value = serde_json::from_str(content).map_err(|e| self.parse_error(e))?;
        Report::from_json_value(value).map_err(|e| self.parse_error(e))
    }

    fn parse_json_lines(&self, content: &str) -> Report {
        let mut items = Vec::new();
        for (line_num, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<LineItem>(line) {
                Ok(item) => items.push(item),
                Err(e) => warn!(
                    "Skipping line {} in {}: {}",
                    line_num + 1,
                    self.path.display(),
                    e
                ),
            }
        }
        Report::new(items)
    }

    fn parse_csv(&self, content: &str) -> Result<Report> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| self.parse_error(e))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect::<Vec<_>>();

        let mut items = Vec::new();
        for (row_num, result) in reader.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    // Header is line 1
                    warn!(
                        "Skipping CSV row {} in {}: {}",
                        row_num + 2,
                        self.path.display(),
                        e
                    );
                    continue;
                }
            };

            // Empty cells are treated as missing columns
            let fields: Map<String, Value> = headers
                .iter()
                .zip(record.iter())
                .filter(|(_, cell)| !cell.is_empty())
                .map(|(header, cell)| (header.clone(), Value::String(cell.to_string())))
                .collect();

            match serde_json::from_value::<LineItem>(Value::Object(fields)) {
                Ok(item) => items.push(item),
                Err(e) => warn!(
                    "Skipping CSV row {} in {}: {}",
                    row_num + 2,
                    self.path.display(),
                    e
                ),
            }
        }
        Ok(Report::new(items))
    }

    /// Parse report content according to the loader's format
    pub fn parse(&self, content: &str) -> Result<Report> {
        let content = content.trim_start_matches('\u{feff}');
        match self.format {
            ReportFormat::Json => self.parse_json(content),
            ReportFormat::JsonLines => Ok(self.parse_json_lines(content)),
            ReportFormat::Csv => self.parse_csv(content),
        }
    }
}

#[async_trait]
impl RecordSource for DataLoader {
    async fn fetch_report(&self) -> Result<Report> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let report = self.parse(&content)?;
        debug!(
            "Loaded {} line items from {}",
            report.line_items.len(),
            self.path.display()
        );
        Ok(report)
    }

    fn describe(&self) -> String {
        format!("report file {}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curview_core::types::Amount;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_report(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            ReportFormat::from_path(Path::new("cur.json")),
            Some(ReportFormat::Json)
        );
        assert_eq!(
            ReportFormat::from_path(Path::new("cur.JSONL")),
            Some(ReportFormat::JsonLines)
        );
        assert_eq!(
            ReportFormat::from_path(Path::new("cur.ndjson")),
            Some(ReportFormat::JsonLines)
        );
        assert_eq!(
            ReportFormat::from_path(Path::new("cur.csv")),
            Some(ReportFormat::Csv)
        );
        assert_eq!(ReportFormat::from_path(Path::new("cur.parquet")), None);
        assert_eq!(ReportFormat::from_path(Path::new("cur")), None);
    }

    #[test]
    fn test_unsupported_extension() {
        let result = DataLoader::new("cur.xlsx");
        assert!(matches!(result, Err(CurviewError::UnsupportedFormat(_))));
    }

    #[tokio::test]
    async fn test_load_json_envelope() {
        let file = write_report(
            ".json",
            r#"{
                "line_items": [
                    {"Product Code": "AmazonEC2", "Cost": "10.0", "Period Start": "2024-01-05"},
                    {"Product Code": "AmazonS3", "Cost": 5.5, "Period Start": "2024-01-20"}
                ],
                "aggregate": {"total_cost": 15.5}
            }"#,
        );

        let loader = DataLoader::new(file.path()).unwrap();
        let report = loader.fetch_report().await.unwrap();

        assert_eq!(report.line_items.len(), 2);
        assert_eq!(report.line_items[1].cost, Some(Amount::Number(5.5)));
        assert_eq!(report.aggregate, json!({"total_cost": 15.5}));
    }

    #[tokio::test]
    async fn test_load_json_array() {
        let file = write_report(".json", r#"[{"Cost": "1"}, {"Cost": "2"}]"#);
        let report = DataLoader::new(file.path())
            .unwrap()
            .fetch_report()
            .await
            .unwrap();
        assert_eq!(report.line_items.len(), 2);
        assert_eq!(report.aggregate, Value::Null);
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_parse_error() {
        let file = write_report(".json", "{\"line_items\": [");
        let result = DataLoader::new(file.path()).unwrap().fetch_report().await;
        assert!(matches!(result, Err(CurviewError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let loader = DataLoader::new(dir.path().join("missing.json")).unwrap();
        let result = loader.fetch_report().await;
        assert!(matches!(result, Err(CurviewError::Io(_))));
    }

    #[tokio::test]
    async fn test_load_json_lines_skips_bad_lines() {
        let file = write_report(
            ".jsonl",
            "{\"Cost\": \"1.5\", \"Period Start\": \"2024-03-01\"}\n\
             \n\
             not json at all\n\
             {\"Cost\": 2}\n",
        );

        let report = DataLoader::new(file.path())
            .unwrap()
            .fetch_report()
            .await
            .unwrap();

        assert_eq!(report.line_items.len(), 2);
        assert_eq!(report.line_items[0].period_start.as_deref(), Some("2024-03-01"));
        assert_eq!(report.line_items[1].cost(), 2.0);
    }

    #[tokio::test]
    async fn test_load_csv() {
        let file = write_report(
            ".csv",
            "\u{feff}Project ID,Product Code,Cost,Usage Quantity,Period Start,Period End,Payment Method\n\
             123456789012,AmazonEC2,10.00,720,2024-01-01,2024-01-31,Invoice\n\
             123456789012,,0.25,,2024-01-02,2024-01-02,\n",
        );

        let report = DataLoader::new(file.path())
            .unwrap()
            .fetch_report()
            .await
            .unwrap();

        assert_eq!(report.line_items.len(), 2);
        let first = &report.line_items[0];
        assert_eq!(first.project_id.as_deref(), Some("123456789012"));
        assert_eq!(first.product_code.as_deref(), Some("AmazonEC2"));
        assert_eq!(first.cost(), 10.0);
        assert_eq!(first.display_usage_quantity(), "720");

        let second = &report.line_items[1];
        assert_eq!(second.product_code, None);
        assert_eq!(second.usage_quantity, None);
        assert_eq!(second.payment_method, None);
        assert_eq!(second.cost(), 0.25);
    }

    #[tokio::test]
    async fn test_csv_short_rows_are_tolerated() {
        let file = write_report(".csv", "Product Code,Cost\nAmazonEC2\nAmazonS3,2.5\n");
        let report = DataLoader::new(file.path())
            .unwrap()
            .fetch_report()
            .await
            .unwrap();

        assert_eq!(report.line_items.len(), 2);
        assert_eq!(report.line_items[0].cost, None);
        assert_eq!(report.line_items[1].cost(), 2.5);
    }
}

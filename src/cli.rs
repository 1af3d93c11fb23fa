//! CLI interface for curview
//!
//! This module defines the command-line interface using clap. Every report
//! subcommand shares the global source and filter flags; with no subcommand
//! the full dashboard summary is printed.
//!
//! # Example
//!
//! ```bash
//! # Full dashboard for a local CSV export
//! curview --report cur-2024.csv
//!
//! # Detail table for February only, as JSON
//! curview items --report cur-2024.csv --from 2024-02-01 --to 2024-02-29 --json
//!
//! # Drive a session from a front end over stdio
//! CURVIEW_REPORT_URL=https://billing.example.com/cur.json curview serve
//! ```

use crate::config::SourceConfig;
use crate::error::{CurviewError, Result};
use crate::filters::FilterSpec;
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Browse AWS Cost and Usage Report line items
#[derive(Parser, Debug, Clone)]
#[command(name = "curview")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Show informational output (default is quiet mode with only warnings and errors)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Report file to load (.json, .jsonl, .ndjson or .csv)
    #[arg(long, short = 'r', global = true, env = "CURVIEW_REPORT")]
    pub report: Option<PathBuf>,

    /// URL of a JSON report to fetch instead of a file
    #[arg(long, global = true, env = "CURVIEW_REPORT_URL")]
    pub url: Option<String>,

    /// Only show line items whose period starts on or after this date (YYYY-MM-DD or YYYY-MM)
    #[arg(long, global = true)]
    pub from: Option<String>,

    /// Only show line items whose period ends on or before this date (YYYY-MM-DD or YYYY-MM)
    #[arg(long, global = true)]
    pub to: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available views
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Show every view plus the filtered line items (default)
    Summary,
    /// Show the monthly cost trend
    Monthly,
    /// Show the cost trend per billing period start
    Daily,
    /// Show cost per product code
    Breakdown,
    /// Compare the first three months of the report
    Compare,
    /// Show the filtered line item table
    Items,
    /// Read dashboard events as JSON lines on stdin and answer on stdout
    Serve,
}

impl Cli {
    /// Subcommand to run, defaulting to the summary
    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Summary)
    }

    /// Resolve the report source from flags, environment and defaults
    pub fn source_config(&self) -> Result<SourceConfig> {
        SourceConfig::from_cli(self.report.as_deref(), self.url.as_deref())
    }

    /// Validate `--from`/`--to` and build the detail table filter
    pub fn filter_spec(&self) -> Result<FilterSpec> {
        let mut filter = FilterSpec::new();

        if let Some(from) = &self.from {
            let date = parse_date_filter(from)?;
            filter = filter.with_from(date.format("%Y-%m-%d").to_string());
        }
        if let Some(to) = &self.to {
            let date = parse_end_date_filter(to)?;
            filter = filter.with_to(date.format("%Y-%m-%d").to_string());
        }

        if let (Some(from), Some(to)) = (
            crate::filters::parse_iso_date(&filter.date_from),
            crate::filters::parse_iso_date(&filter.date_to),
        ) {
            if from > to {
                return Err(CurviewError::InvalidArgument(format!(
                    "--from {from} is after --to {to}"
                )));
            }
        }

        Ok(filter)
    }
}

/// Parse a date filter argument
///
/// Accepts `YYYY-MM-DD`, or `YYYY-MM` meaning the first day of that month.
pub fn parse_date_filter(date_str: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Ok(date);
    }

    let (year, month) = parse_year_month(date_str)?;
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CurviewError::InvalidDate(format!("Invalid date: {date_str}")))
}

/// Parse an end-of-range date filter argument
///
/// Like [`parse_date_filter`], but `YYYY-MM` means the last day of that month.
pub fn parse_end_date_filter(date_str: &str) -> Result<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        return Ok(date);
    }

    let (year, month) = parse_year_month(date_str)?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .filter(|d| d.month() == month)
        .ok_or_else(|| CurviewError::InvalidDate(format!("Invalid date: {date_str}")))
}

fn parse_year_month(date_str: &str) -> Result<(i32, u32)> {
    let parts: Vec<&str> = date_str.split('-').collect();
    if parts.len() != 2 {
        return Err(CurviewError::InvalidDate(format!(
            "Invalid date format '{date_str}', expected YYYY-MM-DD or YYYY-MM"
        )));
    }

    let year = parts[0]
        .parse::<i32>()
        .map_err(|_| CurviewError::InvalidDate(format!("Invalid year in '{date_str}'")))?;
    let month = parts[1]
        .parse::<u32>()
        .map_err(|_| CurviewError::InvalidDate(format!("Invalid month in '{date_str}'")))?;

    if !(1..=12).contains(&month) {
        return Err(CurviewError::InvalidDate(format!(
            "Month must be between 1-12, got {month}"
        )));
    }

    Ok((year, month))
}

//! HTTP report loader
//!
//! Issues a single `GET` for the configured URL and parses the body the same
//! way a `.json` report file is parsed. There are no retries: a failed fetch
//! is terminal for the session that asked for it.

use async_trait::async_trait;
use curview_core::error::{CurviewError, Result};
use curview_core::provider::RecordSource;
use curview_core::types::Report;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Data loader for reports served over HTTP.
pub struct DataLoader {
    url: String,
    client: reqwest::Client,
}

impl DataLoader {
    /// Create a loader for `url` with the default timeout
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(url, DEFAULT_TIMEOUT)
    }

    /// Create a loader for `url` with a custom request timeout
    pub fn with_timeout(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("curview/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Parse a response body into a report
    pub fn parse_body(body: &str) -> Result<Report> {
        let value: Value = serde_json::from_str(body.trim_start_matches('\u{feff}'))?;
        Report::from_json_value(value)
    }
}

#[async_trait]
impl RecordSource for DataLoader {
    async fn fetch_report(&self) -> Result<Report> {
        debug!("Fetching report from {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CurviewError::HttpStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let report = Self::parse_body(&body)?;
        debug!(
            "Fetched {} line items from {}",
            report.line_items.len(),
            self.url
        );
        Ok(report)
    }

    fn describe(&self) -> String {
        format!("report endpoint {}", self.url)
    }
}

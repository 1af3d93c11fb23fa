//! Report source configuration
//!
//! Resolves where a session loads its report from. An explicit path or URL
//! from the command line (or its environment variable) wins; otherwise a
//! `report.json` in the platform data directory is used when present.

use crate::error::{CurviewError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the default data directory
pub const DEFAULT_REPORT_FILE: &str = "report.json";

/// Where the report comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    /// Local report file (JSON, JSON Lines or CSV)
    File(PathBuf),
    /// HTTP(S) endpoint returning a JSON report
    Url(String),
}

impl SourceConfig {
    /// Create a source configuration from CLI arguments
    pub fn from_cli(path: Option<&Path>, url: Option<&str>) -> Result<Self> {
        match (path, url) {
            (Some(_), Some(_)) => Err(CurviewError::InvalidArgument(
                "--report and --url are mutually exclusive".to_string(),
            )),
            (Some(path), None) => Ok(Self::File(path.to_path_buf())),
            (None, Some(url)) => Self::from_url(url),
            (None, None) => Self::default_report().ok_or(CurviewError::NoReportSource),
        }
    }

    fn from_url(url: &str) -> Result<Self> {
        if url.starts_with("http://") || url.starts_with("https://") {
            Ok(Self::Url(url.to_string()))
        } else {
            Err(CurviewError::Config(format!(
                "'{url}' is not an http:// or https:// URL"
            )))
        }
    }

    /// `<data dir>/curview/report.json`, if it exists
    fn default_report() -> Option<Self> {
        let path = default_report_path()?;
        if path.exists() {
            debug!("Using default report at {}", path.display());
            Some(Self::File(path))
        } else {
            debug!("No default report at {}", path.display());
            None
        }
    }

    /// Get a display name for the configured source
    pub fn display_name(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Url(url) => url.clone(),
        }
    }
}

/// Location of the default report file for this platform
pub fn default_report_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("curview").join(DEFAULT_REPORT_FILE))
}

//! Record source selection
//!
//! Maps a resolved [`SourceConfig`] to the matching record source crate.

use crate::config::SourceConfig;
use crate::error::Result;
use curview_core::provider::RecordSource;
use tracing::debug;

/// Build the record source described by `config`
pub fn build_source(config: &SourceConfig) -> Result<Box<dyn RecordSource>> {
    let source: Box<dyn RecordSource> = match config {
        SourceConfig::File(path) => Box::new(curview_source_file::DataLoader::new(path.clone())?),
        SourceConfig::Url(url) => Box::new(curview_source_http::DataLoader::new(url.clone())?),
    };
    debug!("Using {}", source.describe());
    Ok(source)
}

//! Error types, re-exported from `curview-core`

pub use curview_core::error::*;

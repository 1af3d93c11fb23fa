//! Domain types, re-exported from `curview-core`

pub use curview_core::types::*;

//! Error types for the Starfield index

use thiserror::Error;

/// Main error type for the crate
///
/// Only construction and configuration failures are errors. A point that
/// falls outside the index is a recoverable condition reported by
/// [`PointOctree::insert`](crate::spatial::PointOctree::insert) returning `false`.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

//! Error types for chartwall-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Empty symbol")]
    EmptySymbol,

    #[error("Invalid grid dimensions: {0}")]
    InvalidDims(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

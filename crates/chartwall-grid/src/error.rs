//! Error types for chartwall-grid.

use thiserror::Error;

/// Grid error types.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("Driver error: {0}")]
    Driver(#[from] chartwall_driver::DriverError),

    #[error("Layout not ready: {0}")]
    LayoutNotReady(String),
}

/// Result type alias for grid operations.
pub type GridResult<T> = std::result::Result<T, GridError>;

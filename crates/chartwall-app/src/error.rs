//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Driver error: {0}")]
    Driver(#[from] chartwall_driver::DriverError),

    #[error("Grid error: {0}")]
    Grid(#[from] chartwall_grid::GridError),

    #[error("Wall session terminated")]
    SessionTerminated,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;

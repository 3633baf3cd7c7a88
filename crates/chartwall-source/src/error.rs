//! Error types for chartwall-source.

use thiserror::Error;

/// Source error types. These stay inside the crate; the `SymbolSource`
/// boundary converts exhausted retries into an empty batch.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("No table with a SYMBOL header found")]
    TableNotFound,

    #[error("No symbols parsed from table")]
    NoSymbols,

    #[error("Driver error: {0}")]
    Driver(#[from] chartwall_driver::DriverError),

    #[error("Invalid symbol: {0}")]
    Symbol(#[from] chartwall_core::CoreError),
}

/// Result type alias for source operations.
pub type SourceResult<T> = std::result::Result<T, SourceError>;

//! Error types for chartwall-driver.

use thiserror::Error;

/// Driver error types.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("WebDriver session could not be created: {0}")]
    NewSession(#[from] fantoccini::error::NewSessionError),

    #[error("WebDriver command failed: {0}")]
    Command(#[from] fantoccini::error::CmdError),

    #[error("Timed out after {waited_ms}ms waiting for '{selector}'")]
    WaitTimeout { selector: String, waited_ms: u64 },

    #[error("Panel '{dom_id}' unreachable: {reason}")]
    PanelUnreachable { dom_id: String, reason: String },

    #[error("Unexpected script result shape: {0}")]
    ScriptShape(String),
}

/// Result type alias for driver operations.
pub type DriverResult<T> = std::result::Result<T, DriverError>;

//! Structured logging for chartwall.
//!
//! One call at process start wires up tracing for every crate in the
//! workspace. Output format follows the environment: JSON in production,
//! pretty-printed for development.

pub mod error;
pub mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;

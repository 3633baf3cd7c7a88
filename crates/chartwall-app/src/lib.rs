//! NSE volume gainers on a paged browser chart wall.
//!
//! Main application that wires the workspace together: the stealth
//! scrape session, the wall session hosting the injected grid, the slot
//! allocator, and the refresh loop with its manual login gate and
//! liveness probes.

pub mod app;
pub mod config;
pub mod error;

pub use app::{run_refresh_cycle, Application, Phase};
pub use config::{AppConfig, GridConfig};
pub use error::{AppError, AppResult};

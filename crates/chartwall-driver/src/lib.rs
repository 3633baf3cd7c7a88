//! WebDriver session boundary.
//!
//! The host charting app exposes no API, so every mutation in this system
//! is simulated user input over WebDriver. This crate owns that boundary:
//! - `SessionConfig` / `Session`: one browser session as an owned resource
//! - `HostSurface` / `PanelAccess` / `PanelSurface`: the capability traits
//!   the grid engine is written against (fakeable in tests)
//! - console collection: an injected hook standing in for the log endpoint
//!   the W3C protocol does not have

pub mod config;
pub mod console;
pub mod error;
pub mod session;
pub mod surface;

pub use config::SessionConfig;
pub use console::ConsoleEntry;
pub use error::{DriverError, DriverResult};
pub use session::Session;
pub use surface::{HostSurface, KeyInput, PanelAccess, PanelSurface};

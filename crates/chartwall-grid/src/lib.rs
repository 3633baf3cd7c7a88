//! Grid engine: layout, staged loading, panel updates, UI sanitation.
//!
//! The host app has no concept of a multi-chart wall, so we build one: the
//! host document is replaced with a tab bar plus paged iframe grid, and
//! every chart is an embedded instance of the host's own widget. Panels on
//! the visible page load immediately (critical path); panels on hidden
//! pages carry a deferred content reference that loads staggered on first
//! visibility, because two dozen widget boots at once starve the CPU.
//!
//! Symbol changes go through the widget's native type-to-search, guarded
//! by a key filter that blocks the host's instant-order hotkeys. After all
//! updates, each live panel gets its chrome stripped to a clean
//! chart-only view.

pub mod engine;
pub mod error;
pub mod filter;
pub mod layout;
pub mod loader;
pub mod sanitizer;
pub mod updater;

pub use engine::{CycleReport, GridEngine};
pub use error::{GridError, GridResult};
pub use filter::KeyFilter;
pub use layout::{build_markup, LayoutConfig};
pub use loader::{materialize_script, stagger_offsets};
pub use sanitizer::{Sanitizer, SanitizerConfig};
pub use updater::{PanelUpdater, UpdateOutcome, UpdaterConfig};

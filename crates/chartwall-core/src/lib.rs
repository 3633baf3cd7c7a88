//! Core domain types for the chartwall grid engine.
//!
//! This crate provides the vocabulary shared across the system:
//! - `Symbol`, `SymbolBatch`: canonical ticker symbols and fetch results
//! - `GridDims`, `PanelId`: grid geometry and stable panel identity
//! - `allocate` / `Allocation`: the pure slot allocator
//! - `SlotPhase`, `SlotState`: per-slot content lifecycle
//! - `RetryPolicy`: bounded-retry timing shared by the external boundaries

pub mod allocation;
pub mod error;
pub mod grid;
pub mod retry;
pub mod slot;
pub mod symbol;

pub use allocation::{allocate, Allocation};
pub use error::{CoreError, Result};
pub use grid::{tab_button_dom_id, tab_button_label, tab_dom_id, GridDims, PanelId};
pub use retry::{RetryDelay, RetryPolicy};
pub use slot::{SlotPhase, SlotState};
pub use symbol::{Symbol, SymbolBatch};

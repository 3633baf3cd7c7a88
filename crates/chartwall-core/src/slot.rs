//! Per-slot content lifecycle.
//!
//! A slot's frame moves through three phases: not yet carrying the widget
//! (`Unmaterialized`), carrying a deferred content reference that loads on
//! first page visibility (`Pending`), or live (`Active`). Orthogonally,
//! `shown` records the last symbol sent to the slot. The send is recorded,
//! not verified; `shown` may diverge from reality if the widget dropped
//! the input, which self-corrects on a later differing assignment.

use serde::{Deserialize, Serialize};

use crate::symbol::Symbol;

/// Materialization phase of a slot's frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotPhase {
    /// Frame holds no widget (blank src, no deferred reference).
    Unmaterialized,
    /// Frame holds a deferred content reference, not yet loaded.
    Pending { content: String },
    /// Frame has loaded the widget.
    Active,
}

/// Full per-slot state tracked by the grid engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotState {
    pub phase: SlotPhase,
    /// Last symbol sent to this slot, recorded without verification.
    pub shown: Option<Symbol>,
}

impl SlotState {
    pub fn new() -> Self {
        Self {
            phase: SlotPhase::Unmaterialized,
            shown: None,
        }
    }

    pub fn pending(content: impl Into<String>) -> Self {
        Self {
            phase: SlotPhase::Pending {
                content: content.into(),
            },
            shown: None,
        }
    }

    pub fn active() -> Self {
        Self {
            phase: SlotPhase::Active,
            shown: None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, SlotPhase::Active)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, SlotPhase::Pending { .. })
    }

    pub fn is_unmaterialized(&self) -> bool {
        matches!(self.phase, SlotPhase::Unmaterialized)
    }

    /// Transition to Active. Idempotent.
    pub fn mark_active(&mut self) {
        self.phase = SlotPhase::Active;
    }

    /// Record a sent symbol.
    pub fn record_shown(&mut self, symbol: Symbol) {
        self.shown = Some(symbol);
    }

    /// The no-op check: does this slot need anything typed at all to show
    /// `target`?
    pub fn needs_update(&self, target: &Symbol) -> bool {
        self.shown.as_ref() != Some(target)
    }
}

impl Default for SlotState {
    fn default() -> Self {
        Self::new()
    }
}

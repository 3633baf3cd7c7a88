//! Per-panel symbol updates.
//!
//! The widget exposes no API for changing instruments, so the updater
//! drives its native type-to-search: focus the chart surface, type the
//! symbol lowercase, give the suggestion lookup a beat, press Enter. The
//! safety filter is injected before any key is sent, and the panel frame
//! is always left afterwards, on the failure path included.
//!
//! The no-op check comes first: when the slot already shows the target
//! symbol, no interaction of any kind reaches the host. Confirmation is
//! off by default; a sent symbol is recorded as shown without read-back,
//! and a wrong record self-corrects on the next differing assignment.

use std::time::Duration;

use chartwall_core::{PanelId, SlotState, Symbol};
use chartwall_driver::{DriverResult, HostSurface, KeyInput, PanelAccess, PanelSurface};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::filter::KeyFilter;
use crate::loader::materialize_script;

/// Updater timing and verification knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdaterConfig {
    /// Wait between typing and Enter; the widget's suggestion lookup
    /// needs a network round-trip.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,

    /// Wait after focusing a panel (and after booting a frame) before
    /// keys are sent.
    #[serde(default = "default_focus_wait_ms")]
    pub focus_wait_ms: u64,

    /// Read the panel back after Enter and only record the symbol when it
    /// took. Off by default: the probe costs time per slot and the
    /// unrecorded-miss case already self-corrects.
    #[serde(default)]
    pub confirm: bool,
}

fn default_settle_ms() -> u64 {
    350
}

fn default_focus_wait_ms() -> u64 {
    500
}

impl Default for UpdaterConfig {
    fn default() -> Self {
        Self {
            settle_ms: default_settle_ms(),
            focus_wait_ms: default_focus_wait_ms(),
            confirm: false,
        }
    }
}

impl UpdaterConfig {
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    pub fn focus_wait(&self) -> Duration {
        Duration::from_millis(self.focus_wait_ms)
    }
}

/// Result of one slot update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Slot already showed the target; nothing was sent.
    Skipped,
    /// Symbol sent (and confirmed, when confirmation is on).
    Updated,
    /// Interaction failed or was unconfirmed; the slot will retry next
    /// cycle.
    Failed,
}

/// Drives symbol changes into individual panels.
#[derive(Debug, Clone)]
pub struct PanelUpdater {
    filter: KeyFilter,
    config: UpdaterConfig,
}

impl PanelUpdater {
    pub fn new(filter: KeyFilter, config: UpdaterConfig) -> Self {
        Self { filter, config }
    }

    /// Bring one slot to the target symbol.
    ///
    /// `boot_src` is the widget URL used when the slot's frame has no
    /// deferred reference to activate. Errors never propagate: a failed
    /// slot is logged, left in a retryable state, and the caller moves on
    /// to the next slot.
    pub async fn update<D>(
        &self,
        driver: &D,
        panel: PanelId,
        state: &mut SlotState,
        target: &Symbol,
        boot_src: &str,
    ) -> UpdateOutcome
    where
        D: HostSurface + PanelAccess,
    {
        if !state.needs_update(target) {
            debug!(panel = %panel, symbol = %target, "Symbol unchanged, skipping");
            return UpdateOutcome::Skipped;
        }

        let dom_id = panel.dom_id();

        // Keys land nowhere in a frame that never booted the widget.
        if !state.is_active() {
            let script = materialize_script(&dom_id, boot_src);
            match driver.run_script(&script).await {
                Ok(value) if value.as_bool() == Some(true) => {
                    state.mark_active();
                    sleep(self.config.focus_wait()).await;
                }
                Ok(_) => {
                    warn!(panel = %panel, "Frame element missing, cannot materialize");
                    return UpdateOutcome::Failed;
                }
                Err(e) => {
                    warn!(panel = %panel, error = %e, "Frame materialization failed");
                    return UpdateOutcome::Failed;
                }
            }
        }

        let surface = match driver.open_panel(&dom_id).await {
            Ok(surface) => surface,
            Err(e) => {
                warn!(panel = %panel, error = %e, "Panel unreachable");
                return UpdateOutcome::Failed;
            }
        };

        let typed = self.drive(surface.as_ref(), target).await;
        let left = surface.close().await;
        if let Err(e) = left {
            warn!(panel = %panel, error = %e, "Failed to leave panel frame");
            return UpdateOutcome::Failed;
        }

        match typed {
            Ok(true) => {
                state.record_shown(target.clone());
                info!(panel = %panel, symbol = %target, "Panel updated");
                UpdateOutcome::Updated
            }
            Ok(false) => {
                // Leave `shown` unset so the next cycle retries this slot.
                warn!(panel = %panel, symbol = %target, "Update unconfirmed");
                UpdateOutcome::Failed
            }
            Err(e) => {
                warn!(panel = %panel, symbol = %target, error = %e, "Panel update failed");
                UpdateOutcome::Failed
            }
        }
    }

    /// The in-frame interaction sequence. Returns whether the update is
    /// considered to have taken.
    async fn drive(&self, surface: &dyn PanelSurface, target: &Symbol) -> DriverResult<bool> {
        surface.run_script(&self.filter.to_script()).await?;
        surface.focus().await?;
        sleep(self.config.focus_wait()).await;

        surface.type_text(&target.typed()).await?;
        sleep(self.config.settle()).await;
        surface.press_key(KeyInput::Enter).await?;

        if !self.config.confirm {
            return Ok(true);
        }
        sleep(self.config.settle()).await;
        let title = surface.run_script("return document.title || '';").await?;
        let title = title.as_str().unwrap_or_default().to_uppercase();
        Ok(title.contains(target.as_str()))
    }
}

impl Default for PanelUpdater {
    fn default() -> Self {
        Self::new(KeyFilter::default(), UpdaterConfig::default())
    }
}

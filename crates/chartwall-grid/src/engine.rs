//! The grid engine.
//!
//! Single owner of wall state: which layout is injected, which page is
//! visible, and what every slot currently shows. A cycle is strictly
//! ordered: make sure the layout exists, bring every assigned slot to its
//! symbol page by page, then sanitize the live panels. Sanitizing last
//! keeps the type-to-search path intact while symbols are still being
//! sent.
//!
//! Slot and page failures are absorbed here with a log line and a report
//! tally; only host-level failures (document replace, layout probe)
//! propagate to the caller, since nothing below them can succeed either.

use std::time::Duration;

use chartwall_core::{tab_button_dom_id, Allocation, GridDims, PanelId, SlotState};
use chartwall_driver::{HostSurface, PanelAccess};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::error::{GridError, GridResult};
use crate::layout::{build_markup, LayoutConfig, ROOT_DOM_ID};
use crate::sanitizer::Sanitizer;
use crate::updater::{PanelUpdater, UpdateOutcome};

/// How long to wait for the wall root after a document replace.
const ROOT_WAIT: Duration = Duration::from_secs(10);

/// Per-cycle outcome tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub sanitized: usize,
}

/// Drives one browser wall through refresh cycles.
pub struct GridEngine<D> {
    driver: D,
    dims: GridDims,
    layout: LayoutConfig,
    updater: PanelUpdater,
    sanitizer: Sanitizer,
    slots: Vec<SlotState>,
    visible_page: usize,
    initialized: bool,
}

impl<D> GridEngine<D>
where
    D: HostSurface + PanelAccess,
{
    pub fn new(
        driver: D,
        dims: GridDims,
        layout: LayoutConfig,
        updater: PanelUpdater,
        sanitizer: Sanitizer,
    ) -> Self {
        let slots = vec![SlotState::new(); dims.capacity()];
        Self {
            driver,
            dims,
            layout,
            updater,
            sanitizer,
            slots,
            visible_page: 0,
            initialized: false,
        }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    pub fn visible_page(&self) -> usize {
        self.visible_page
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn slot(&self, panel: PanelId) -> Option<&SlotState> {
        self.dims.index_of(panel).and_then(|i| self.slots.get(i))
    }

    /// Run one full wall cycle against an allocation.
    pub async fn run_cycle(&mut self, alloc: &Allocation) -> GridResult<CycleReport> {
        self.ensure_layout(alloc).await?;

        let mut report = CycleReport::default();
        self.apply(alloc, &mut report).await;
        self.sanitize(alloc, &mut report).await;

        info!(
            updated = report.updated,
            skipped = report.skipped,
            failed = report.failed,
            sanitized = report.sanitized,
            "Wall cycle complete"
        );
        Ok(report)
    }

    /// Make sure the injected layout is present, rebuilding when the host
    /// navigated away or was reloaded out from under us.
    async fn ensure_layout(&mut self, alloc: &Allocation) -> GridResult<()> {
        if self.initialized {
            if self.driver.element_exists(ROOT_DOM_ID).await? {
                return Ok(());
            }
            warn!("Wall root missing, rebuilding layout");
        }
        self.rebuild(alloc).await
    }

    async fn rebuild(&mut self, alloc: &Allocation) -> GridResult<()> {
        let markup = build_markup(alloc, &self.layout);
        self.driver.replace_document(&markup).await?;
        self.driver
            .wait_for_css(&format!("#{ROOT_DOM_ID}"), ROOT_WAIT)
            .await
            .map_err(|e| GridError::LayoutNotReady(e.to_string()))?;
        sleep(self.layout.stabilize()).await;

        // Page 0 slots boot eagerly at write time; assigned slots on
        // hidden pages sit behind a deferred reference until their page
        // is first shown.
        self.slots = self
            .dims
            .panels()
            .map(|panel| match alloc.get(panel) {
                Some(_) if panel.page == 0 => SlotState::active(),
                Some(_) => SlotState::pending(self.layout.chart_url.clone()),
                None => SlotState::new(),
            })
            .collect();
        self.visible_page = 0;
        self.initialized = true;

        info!(dims = %self.dims, occupied = alloc.len(), "Wall layout built");
        Ok(())
    }

    /// Switch the visible page. The click is sent twice: the first one is
    /// sometimes swallowed while a chart frame still holds focus.
    async fn show_page(&mut self, page: usize) -> GridResult<()> {
        let button = tab_button_dom_id(page);
        self.driver.click(&button).await?;
        self.driver.click(&button).await?;
        sleep(self.layout.page_transition()).await;
        self.visible_page = page;
        debug!(page, "Page shown");
        Ok(())
    }

    async fn apply(&mut self, alloc: &Allocation, report: &mut CycleReport) {
        for page in 0..self.dims.pages {
            if alloc.occupied(page) == 0 {
                continue;
            }
            if let Err(e) = self.show_page(page).await {
                error!(page, error = %e, "Page switch failed, skipping page");
                report.failed += alloc.occupied(page);
                continue;
            }
            for (slot, symbol) in alloc.page_symbols(page).iter().enumerate() {
                let panel = PanelId::new(page, slot);
                let Some(index) = self.dims.index_of(panel) else {
                    continue;
                };
                let outcome = self
                    .updater
                    .update(
                        &self.driver,
                        panel,
                        &mut self.slots[index],
                        symbol,
                        &self.layout.chart_url,
                    )
                    .await;
                match outcome {
                    UpdateOutcome::Updated => report.updated += 1,
                    UpdateOutcome::Skipped => report.skipped += 1,
                    UpdateOutcome::Failed => report.failed += 1,
                }
            }
        }
    }

    /// Hide widget chrome in every live assigned panel. Runs after all
    /// symbol sends; frames on hidden pages are still reachable without a
    /// page switch.
    async fn sanitize(&mut self, alloc: &Allocation, report: &mut CycleReport) {
        for (panel, _) in alloc.assignments() {
            let Some(index) = self.dims.index_of(panel) else {
                continue;
            };
            if !self.slots[index].is_active() {
                continue;
            }
            match self.sanitizer.apply(&self.driver, &panel.dom_id()).await {
                Ok(()) => report.sanitized += 1,
                Err(e) => debug!(panel = %panel, error = %e, "Sanitize skipped"),
            }
        }
    }
}

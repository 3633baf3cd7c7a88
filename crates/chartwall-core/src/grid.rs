//! Grid geometry and panel identity.
//!
//! The wall is `pages` tab pages of `slots_per_page` chart panels each.
//! Panel identity is positional and stable across cycles; the DOM ids
//! produced here are the contract between the injected markup and every
//! component that later addresses an element inside the host page.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, Result};

/// Grid dimensions: number of tab pages and slots per page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDims {
    pub pages: usize,
    pub slots_per_page: usize,
}

impl GridDims {
    /// Create validated dimensions. Zero pages or zero slots are rejected.
    pub fn new(pages: usize, slots_per_page: usize) -> Result<Self> {
        if pages == 0 || slots_per_page == 0 {
            return Err(CoreError::InvalidDims(format!(
                "{pages} pages x {slots_per_page} slots"
            )));
        }
        Ok(Self {
            pages,
            slots_per_page,
        })
    }

    /// Total number of slots on the wall.
    pub fn capacity(&self) -> usize {
        self.pages * self.slots_per_page
    }

    /// Map a page-major index to its panel, if within capacity.
    pub fn panel(&self, index: usize) -> Option<PanelId> {
        if index >= self.capacity() {
            return None;
        }
        Some(PanelId {
            page: index / self.slots_per_page,
            slot: index % self.slots_per_page,
        })
    }

    /// Page-major index of a panel, if within bounds.
    pub fn index_of(&self, panel: PanelId) -> Option<usize> {
        if panel.page >= self.pages || panel.slot >= self.slots_per_page {
            return None;
        }
        Some(panel.page * self.slots_per_page + panel.slot)
    }

    /// All panels in page-major order.
    pub fn panels(&self) -> impl Iterator<Item = PanelId> + '_ {
        (0..self.capacity()).filter_map(|i| self.panel(i))
    }
}

impl Default for GridDims {
    fn default() -> Self {
        Self {
            pages: 4,
            slots_per_page: 6,
        }
    }
}

impl fmt::Display for GridDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.pages, self.slots_per_page)
    }
}

/// Stable identity of one chart panel: (page, slot), both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PanelId {
    pub page: usize,
    pub slot: usize,
}

impl PanelId {
    pub fn new(page: usize, slot: usize) -> Self {
        Self { page, slot }
    }

    /// DOM id of this panel's iframe in the injected markup.
    pub fn dom_id(&self) -> String {
        format!("chart-frame-{}-{}", self.page, self.slot)
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.page, self.slot)
    }
}

/// DOM id of a page container.
pub fn tab_dom_id(page: usize) -> String {
    format!("tab-{page}")
}

/// DOM id of a page's tab-bar button.
pub fn tab_button_dom_id(page: usize) -> String {
    format!("btn-{page}")
}

/// Visible label of a page's tab-bar button (1-based for operators).
pub fn tab_button_label(page: usize) -> String {
    format!("PAGE {}", page + 1)
}

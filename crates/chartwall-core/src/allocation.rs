//! The slot allocator.
//!
//! Pure mapping from a ranked symbol list to grid positions: truncate to
//! wall capacity, then fill page-major (consecutive runs of
//! `slots_per_page` symbols per page, each page from slot 0). Rank order
//! is preserved exactly; there is no reordering, dedup, or balancing.

use crate::grid::{GridDims, PanelId};
use crate::symbol::Symbol;

/// Deterministic assignment of symbols to panels.
///
/// Symbol for index `i` (when `i < capacity`) sits at page `i / S`,
/// slot `i % S`. Panels at indices past the input length stay unassigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    dims: GridDims,
    symbols: Vec<Symbol>,
}

/// Allocate ranked symbols onto the wall.
///
/// Input beyond `dims.capacity()` is dropped silently; fewer symbols than
/// capacity leave the tail panels unassigned. Same input, same output.
pub fn allocate(symbols: &[Symbol], dims: GridDims) -> Allocation {
    let take = symbols.len().min(dims.capacity());
    Allocation {
        dims,
        symbols: symbols[..take].to_vec(),
    }
}

impl Allocation {
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Number of assigned panels.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbol assigned to a panel, if any.
    pub fn get(&self, panel: PanelId) -> Option<&Symbol> {
        let index = self.dims.index_of(panel)?;
        self.symbols.get(index)
    }

    /// Symbols assigned to one page, in slot order. Empty for pages past
    /// the assigned range.
    pub fn page_symbols(&self, page: usize) -> &[Symbol] {
        if page >= self.dims.pages {
            return &[];
        }
        let start = page * self.dims.slots_per_page;
        if start >= self.symbols.len() {
            return &[];
        }
        let end = (start + self.dims.slots_per_page).min(self.symbols.len());
        &self.symbols[start..end]
    }

    /// Number of assigned slots on one page.
    pub fn occupied(&self, page: usize) -> usize {
        self.page_symbols(page).len()
    }

    /// Pages that have at least one assigned slot, ascending.
    pub fn pages_with_symbols(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.dims.pages).filter(|&p| self.occupied(p) > 0)
    }

    /// All assignments in page-major order.
    pub fn assignments(&self) -> impl Iterator<Item = (PanelId, &Symbol)> + '_ {
        self.symbols
            .iter()
            .enumerate()
            .filter_map(|(i, sym)| Some((self.dims.panel(i)?, sym)))
    }
}

//! Ticker symbols and fetch batches.
//!
//! Symbols are stored in canonical (uppercase) form. The character sequence
//! that gets typed into a chart panel is always the lowercase form; the
//! widget's type-to-search matches case-insensitively, and lowercase input
//! keeps shift out of the synthetic key stream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, Result};

/// A ticker symbol in canonical form.
///
/// Canonical form is trimmed and uppercased (e.g. `RELIANCE`, `M&M`).
/// Equality and hashing are on the canonical form, so two symbols that
/// differ only in case compare equal after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Parse a raw scraped token into a canonical symbol.
    ///
    /// Trims surrounding whitespace and uppercases. Tokens that are empty
    /// after trimming are rejected.
    pub fn parse(raw: &str) -> Result<Self> {
        let canonical = raw.trim().to_uppercase();
        if canonical.is_empty() {
            return Err(CoreError::EmptySymbol);
        }
        Ok(Self(canonical))
    }

    /// Canonical (uppercase) form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The character sequence typed into a panel's symbol search.
    #[must_use]
    pub fn typed(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One fetch result from the symbol source.
///
/// Ordering is the source's ranking and is preserved end to end; the
/// allocator consumes it positionally. Batches are consumed within the
/// cycle that produced them and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolBatch {
    symbols: Vec<Symbol>,
    /// Timestamp when this batch was fetched.
    pub fetched_at: DateTime<Utc>,
}

impl SymbolBatch {
    /// Create a batch from ranked symbols, stamped now.
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self {
            symbols,
            fetched_at: Utc::now(),
        }
    }

    /// The empty batch (a failed or empty fetch).
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Age of this batch in milliseconds.
    pub fn age_ms(&self) -> i64 {
        (Utc::now() - self.fetched_at).num_milliseconds()
    }
}

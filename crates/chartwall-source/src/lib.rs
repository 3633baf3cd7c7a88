//! Ranked-symbol source.
//!
//! Scrapes the volume-gainers table from the exchange's public market-data
//! page. The page serves an empty shell to plain HTTP clients, so the
//! scrape runs through a real browser session and parses the rendered
//! document.
//!
//! Boundary contract: `fetch_top` never fails past this crate. A fetch
//! that exhausts its retries yields an empty batch, and the caller skips
//! the cycle. There is no fallback data.

pub mod config;
pub mod error;
pub mod gainers;
pub mod parse;

pub use config::GainersConfig;
pub use error::{SourceError, SourceResult};
pub use gainers::{GainersSource, PageTransport, SymbolSource};
pub use parse::parse_gainers;

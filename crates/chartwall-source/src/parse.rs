//! Rendered-page parsing for the gainers table.
//!
//! The page carries several tables; the ranked one is identified by a
//! header cell containing `SYMBOL` (any case). Data rows follow the
//! header row; a row's symbol is the first whitespace-separated token of
//! its first cell (the cell suffixes the ticker with its series tag).
//!
//! # Panics
//!
//! Panics at first use if one of the static selector literals fails to
//! compile.

use chartwall_core::Symbol;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::error::{SourceError, SourceResult};

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").unwrap());
static HEADER_CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("th").unwrap());
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());

/// Parse up to `limit` ranked symbols out of rendered page HTML.
///
/// Errors when no table carries a SYMBOL header, or when the table yields
/// zero symbols; both make the caller's attempt count as failed.
pub fn parse_gainers(html: &str, limit: usize) -> SourceResult<Vec<Symbol>> {
    let document = Html::parse_document(html);

    let table = document
        .select(&TABLE)
        .find(|tbl| has_symbol_header(tbl))
        .ok_or(SourceError::TableNotFound)?;

    let mut symbols = Vec::new();
    // First row is the header.
    for row in table.select(&ROW).skip(1) {
        if symbols.len() >= limit {
            break;
        }
        let Some(cell) = row.select(&CELL).next() else {
            continue;
        };
        let text = cell.text().collect::<String>();
        let Some(token) = text.split_whitespace().next() else {
            continue;
        };
        symbols.push(Symbol::parse(token)?);
    }

    if symbols.is_empty() {
        return Err(SourceError::NoSymbols);
    }
    Ok(symbols)
}

fn has_symbol_header(table: &ElementRef<'_>) -> bool {
    table.select(&HEADER_CELL).any(|th| {
        th.text()
            .collect::<String>()
            .to_uppercase()
            .contains("SYMBOL")
    })
}

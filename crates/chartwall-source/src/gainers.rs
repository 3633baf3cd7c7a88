//! The volume-gainers source.
//!
//! Drives a browser to the gainers page, waits for data rows (a strict
//! wait; the table tag renders before its rows), parses the rendered
//! HTML, and retries with a reload plus cooldown on any failure.

use std::time::Duration;

use async_trait::async_trait;
use chartwall_core::{Symbol, SymbolBatch};
use chartwall_driver::{DriverResult, Session};
use tracing::{error, info, warn};

use crate::config::GainersConfig;
use crate::error::SourceResult;
use crate::parse::parse_gainers;

/// The page is considered loaded once actual data rows exist.
const DATA_ROWS_CSS: &str = "table tbody tr";

/// A ranked-symbol provider.
#[async_trait]
pub trait SymbolSource: Send + Sync {
    /// Fetch up to `limit` ranked symbols.
    ///
    /// Never errors: an unreachable or unparseable page yields an empty
    /// batch after the configured attempts.
    async fn fetch_top(&self, limit: usize) -> SymbolBatch;
}

/// Page-level transport the source drives. `Session` implements this;
/// tests substitute a scripted fake.
#[async_trait]
pub trait PageTransport: Send + Sync {
    async fn goto(&self, url: &str) -> DriverResult<()>;
    async fn refresh(&self) -> DriverResult<()>;
    async fn wait_for_css(&self, selector: &str, timeout: Duration) -> DriverResult<()>;
    async fn page_source(&self) -> DriverResult<String>;
}

#[async_trait]
impl PageTransport for Session {
    async fn goto(&self, url: &str) -> DriverResult<()> {
        Session::goto(self, url).await
    }

    async fn refresh(&self) -> DriverResult<()> {
        Session::refresh(self).await
    }

    async fn wait_for_css(&self, selector: &str, timeout: Duration) -> DriverResult<()> {
        Session::wait_for_css(self, selector, timeout).await
    }

    async fn page_source(&self) -> DriverResult<String> {
        Session::page_source(self).await
    }
}

/// Volume-gainers scrape over a browser transport.
pub struct GainersSource<T> {
    transport: T,
    config: GainersConfig,
}

impl<T: PageTransport> GainersSource<T> {
    pub fn new(transport: T, config: GainersConfig) -> Self {
        Self { transport, config }
    }

    /// Hand back the transport, for owners that must close it.
    pub fn into_inner(self) -> T {
        self.transport
    }

    async fn attempt(&self, limit: usize) -> SourceResult<Vec<Symbol>> {
        self.transport
            .wait_for_css(DATA_ROWS_CSS, self.config.table_wait())
            .await?;
        let html = self.transport.page_source().await?;
        parse_gainers(&html, limit)
    }

    /// Drop the leading non-tradable rows, keeping the list intact when it
    /// is too short to trim.
    fn trim_leading(&self, mut symbols: Vec<Symbol>) -> Vec<Symbol> {
        if symbols.len() > self.config.skip_leading {
            symbols.drain(..self.config.skip_leading);
        }
        symbols
    }
}

#[async_trait]
impl<T: PageTransport> SymbolSource for GainersSource<T> {
    async fn fetch_top(&self, limit: usize) -> SymbolBatch {
        let policy = self.config.retry_policy();

        for attempt in 1..=policy.max_attempts {
            let navigated = if attempt == 1 {
                self.transport.goto(&self.config.url).await
            } else {
                info!(attempt, max = policy.max_attempts, "Retrying gainers fetch");
                let reloaded = self.transport.refresh().await;
                if reloaded.is_ok() {
                    tokio::time::sleep(policy.delay_for(attempt - 1)).await;
                }
                reloaded
            };
            if let Err(e) = navigated {
                warn!(attempt, error = %e, "Gainers page navigation failed");
                continue;
            }

            match self.attempt(limit).await {
                Ok(symbols) => {
                    info!(count = symbols.len(), "Fetched gainers");
                    return SymbolBatch::new(self.trim_leading(symbols));
                }
                Err(e) => warn!(attempt, error = %e, "Gainers fetch failed"),
            }
        }

        error!(
            attempts = policy.max_attempts,
            "Gainers fetch exhausted, no fallback data"
        );
        SymbolBatch::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartwall_driver::DriverError;
    use std::sync::Mutex;

    fn page_with(rows: &[&str]) -> String {
        let body: String = rows
            .iter()
            .map(|r| format!("<tr><td>{r} EQ</td></tr>"))
            .collect();
        format!("<table><tr><th>SYMBOL</th></tr>{body}</table>")
    }

    /// Scripted transport: one wait outcome per attempt, fixed page HTML.
    struct FakeTransport {
        wait_outcomes: Mutex<Vec<bool>>,
        html: String,
        calls: Mutex<Vec<&'static str>>,
    }

    impl FakeTransport {
        fn new(wait_outcomes: Vec<bool>, html: String) -> Self {
            Self {
                wait_outcomes: Mutex::new(wait_outcomes),
                html,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageTransport for FakeTransport {
        async fn goto(&self, _url: &str) -> DriverResult<()> {
            self.calls.lock().unwrap().push("goto");
            Ok(())
        }

        async fn refresh(&self) -> DriverResult<()> {
            self.calls.lock().unwrap().push("refresh");
            Ok(())
        }

        async fn wait_for_css(&self, selector: &str, _timeout: Duration) -> DriverResult<()> {
            self.calls.lock().unwrap().push("wait");
            assert_eq!(selector, DATA_ROWS_CSS);
            let mut outcomes = self.wait_outcomes.lock().unwrap();
            if outcomes.is_empty() || outcomes.remove(0) {
                Ok(())
            } else {
                Err(DriverError::WaitTimeout {
                    selector: selector.to_string(),
                    waited_ms: 1,
                })
            }
        }

        async fn page_source(&self) -> DriverResult<String> {
            self.calls.lock().unwrap().push("source");
            Ok(self.html.clone())
        }
    }

    fn quick_config() -> GainersConfig {
        GainersConfig {
            retry_cooldown_ms: 0,
            ..GainersConfig::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_trims_leading_row() {
        let transport =
            FakeTransport::new(vec![true], page_with(&["NIFTY", "RELIANCE", "TCS"]));
        let source = GainersSource::new(transport, quick_config());

        let batch = source.fetch_top(30).await;
        let names: Vec<_> = batch.symbols().iter().map(Symbol::as_str).collect();
        // The leading index row is not a tradable symbol.
        assert_eq!(names, vec!["RELIANCE", "TCS"]);
    }

    #[tokio::test]
    async fn test_single_symbol_survives_trim() {
        let transport = FakeTransport::new(vec![true], page_with(&["ONLYONE"]));
        let source = GainersSource::new(transport, quick_config());

        let batch = source.fetch_top(30).await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.symbols()[0].as_str(), "ONLYONE");
    }

    #[tokio::test]
    async fn test_retries_with_reload_then_succeeds() {
        let transport = FakeTransport::new(
            vec![false, false, true],
            page_with(&["NIFTY", "SBIN"]),
        );
        let source = GainersSource::new(transport, quick_config());

        let batch = source.fetch_top(30).await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.symbols()[0].as_str(), "SBIN");

        let calls = source.into_inner().calls();
        // One navigation, then a reload per retry; source read only on the
        // attempt whose rows appeared.
        assert_eq!(
            calls,
            vec!["goto", "wait", "refresh", "wait", "refresh", "wait", "source"]
        );
    }

    #[tokio::test]
    async fn test_exhaustion_yields_empty_batch() {
        let transport = FakeTransport::new(vec![false, false, false], page_with(&["X"]));
        let source = GainersSource::new(transport, quick_config());

        let batch = source.fetch_top(30).await;
        assert!(batch.is_empty());

        let calls = source.into_inner().calls();
        assert_eq!(calls, vec!["goto", "wait", "refresh", "wait", "refresh", "wait"]);
    }

    #[tokio::test]
    async fn test_unparseable_page_retries() {
        let transport = FakeTransport::new(
            vec![true, true, true],
            "<table><tr><th>Price</th></tr></table>".to_string(),
        );
        let source = GainersSource::new(transport, quick_config());

        let batch = source.fetch_top(30).await;
        assert!(batch.is_empty());

        // All three attempts got as far as reading the page.
        let calls = source.into_inner().calls();
        assert_eq!(calls.iter().filter(|c| **c == "source").count(), 3);
    }

    #[tokio::test]
    async fn test_limit_is_forwarded() {
        let transport = FakeTransport::new(
            vec![true],
            page_with(&["A", "B", "C", "D", "E", "F"]),
        );
        let source = GainersSource::new(transport, quick_config());

        let batch = source.fetch_top(3).await;
        // Three parsed, one trimmed.
        assert_eq!(batch.len(), 2);
    }
}

//! Owned WebDriver session.
//!
//! One `Session` is one browser. Sessions are created by their owner,
//! passed where needed, and explicitly closed on shutdown; nothing here is
//! global. All waits are explicit: callers wait for a selector to exist
//! rather than assuming a page settled.

use std::time::Duration;

use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::SessionConfig;
use crate::console::{self, ConsoleEntry};
use crate::error::{DriverError, DriverResult};

/// A live browser session.
pub struct Session {
    client: Client,
    config: SessionConfig,
}

impl Session {
    /// Open a new browser through the configured WebDriver endpoint.
    pub async fn connect(config: SessionConfig) -> DriverResult<Self> {
        info!(url = %config.webdriver_url, "Connecting WebDriver session");
        let client = ClientBuilder::native()
            .capabilities(config.capabilities())
            .connect(&config.webdriver_url)
            .await?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Navigate to a URL.
    pub async fn goto(&self, url: &str) -> DriverResult<()> {
        debug!(url, "goto");
        self.client.goto(url).await?;
        Ok(())
    }

    /// Reload the current page.
    pub async fn refresh(&self) -> DriverResult<()> {
        debug!("refresh");
        self.client.refresh().await?;
        Ok(())
    }

    /// Wait until a CSS selector matches, or fail with the elapsed budget.
    pub async fn wait_for_css(&self, selector: &str, timeout: Duration) -> DriverResult<()> {
        match self
            .client
            .wait()
            .at_most(timeout)
            .for_element(Locator::Css(selector))
            .await
        {
            Ok(_) => Ok(()),
            Err(CmdError::WaitTimeout) => Err(DriverError::WaitTimeout {
                selector: selector.to_string(),
                waited_ms: timeout.as_millis() as u64,
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Rendered HTML of the current document.
    pub async fn page_source(&self) -> DriverResult<String> {
        Ok(self.client.source().await?)
    }

    /// Run a script in the current browsing context.
    pub async fn execute(&self, script: &str, args: Vec<Value>) -> DriverResult<Value> {
        Ok(self.client.execute(script, args).await?)
    }

    /// Click the element with the given DOM id.
    pub async fn click_id(&self, dom_id: &str) -> DriverResult<()> {
        self.client.find(Locator::Id(dom_id)).await?.click().await?;
        Ok(())
    }

    /// Cheap liveness probe. Any failure (window closed, driver gone)
    /// reads as dead.
    pub async fn is_alive(&self) -> bool {
        self.client.title().await.is_ok()
    }

    /// Install the console hook if needed, then drain captured entries.
    pub async fn drain_console(&self) -> DriverResult<Vec<ConsoleEntry>> {
        self.execute(&console::install_script(), Vec::new()).await?;
        let raw = self.execute(console::drain_script(), Vec::new()).await?;
        console::parse_entries(raw)
    }

    /// End the session and close the browser.
    pub async fn close(self) -> DriverResult<()> {
        info!(url = %self.config.webdriver_url, "Closing WebDriver session");
        self.client.close().await?;
        Ok(())
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }
}

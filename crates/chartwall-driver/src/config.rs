//! Browser session configuration.
//!
//! Two profiles are used in practice. The scrape profile masks the usual
//! automation fingerprints (the data page serves an empty shell to obvious
//! bots). The wall profile keeps a persistent user-data directory so the
//! operator's login cookie survives restarts, and disables background tab
//! throttling so hidden pages keep rendering.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Desktop user agent presented by the scrape profile.
pub const STEALTH_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// One browser session's launch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// WebDriver endpoint (chromedriver).
    pub webdriver_url: String,
    /// Chrome command-line switches.
    #[serde(default)]
    pub args: Vec<String>,
    /// Chrome switches to strip from the launch (`excludeSwitches`).
    #[serde(default)]
    pub exclude_switches: Vec<String>,
    /// `useAutomationExtension` capability, when explicitly set.
    #[serde(default)]
    pub use_automation_extension: Option<bool>,
    /// User agent override, rendered as a `--user-agent` switch.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Persistent profile directory, rendered as `--user-data-dir`.
    #[serde(default)]
    pub user_data_dir: Option<String>,
}

impl SessionConfig {
    /// Profile for the symbol-source session.
    pub fn stealth(webdriver_url: impl Into<String>) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
            args: vec!["--disable-blink-features=AutomationControlled".to_string()],
            exclude_switches: vec!["enable-automation".to_string()],
            use_automation_extension: Some(false),
            user_agent: Some(STEALTH_USER_AGENT.to_string()),
            user_data_dir: None,
        }
    }

    /// Profile for the chart-wall session.
    pub fn wall(webdriver_url: impl Into<String>, user_data_dir: Option<String>) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
            args: vec![
                "--start-maximized".to_string(),
                "--enable-gpu-rasterization".to_string(),
                "--ignore-gpu-blocklist".to_string(),
                "--disable-background-timer-throttling".to_string(),
            ],
            exclude_switches: Vec::new(),
            use_automation_extension: None,
            user_agent: None,
            user_data_dir,
        }
    }

    /// Render this profile as W3C capabilities (`goog:chromeOptions`).
    pub fn capabilities(&self) -> Map<String, Value> {
        let mut args = self.args.clone();
        if let Some(ua) = &self.user_agent {
            args.push(format!("--user-agent={ua}"));
        }
        if let Some(dir) = &self.user_data_dir {
            args.push(format!("--user-data-dir={dir}"));
        }

        let mut options = Map::new();
        options.insert("args".to_string(), json!(args));
        if !self.exclude_switches.is_empty() {
            options.insert("excludeSwitches".to_string(), json!(self.exclude_switches));
        }
        if let Some(ext) = self.use_automation_extension {
            options.insert("useAutomationExtension".to_string(), json!(ext));
        }

        let mut caps = Map::new();
        caps.insert("goog:chromeOptions".to_string(), Value::Object(options));
        caps
    }
}

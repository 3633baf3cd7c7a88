//! Application configuration.

use crate::error::{AppError, AppResult};
use chartwall_core::{CoreError, GridDims};
use chartwall_grid::{KeyFilter, LayoutConfig, SanitizerConfig, UpdaterConfig};
use chartwall_source::GainersConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Wall shape configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Number of pages on the wall.
    #[serde(default = "default_pages")]
    pub pages: usize,
    /// Panels per page.
    #[serde(default = "default_slots_per_page")]
    pub slots_per_page: usize,
}

fn default_pages() -> usize {
    4
}

fn default_slots_per_page() -> usize {
    6
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            pages: default_pages(),
            slots_per_page: default_slots_per_page(),
        }
    }
}

impl GridConfig {
    /// Validated wall dimensions.
    pub fn dims(&self) -> Result<GridDims, CoreError> {
        GridDims::new(self.pages, self.slots_per_page)
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// WebDriver endpoint both browser sessions connect to.
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Wall host page. The operator logs in here before the wall starts.
    #[serde(default = "default_wall_url")]
    pub wall_url: String,

    /// Seconds between refresh cycles.
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,

    /// Seconds between wall-session liveness probes while idle.
    #[serde(default = "default_liveness_probe_secs")]
    pub liveness_probe_secs: u64,

    /// How many ranked symbols to request per fetch.
    #[serde(default = "default_fetch_limit")]
    pub fetch_limit: usize,

    /// Browser profile directory for the wall session, relative to the
    /// working directory. Keeps the login across restarts.
    #[serde(default = "default_user_data_dir")]
    pub user_data_dir: String,

    /// Wall shape.
    #[serde(default)]
    pub grid: GridConfig,

    /// Symbol source configuration.
    #[serde(default)]
    pub source: GainersConfig,

    /// Wall layout and timing.
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Per-panel update timing and verification.
    #[serde(default)]
    pub updater: UpdaterConfig,

    /// Keys suppressed inside panels while typing.
    #[serde(default)]
    pub filter: KeyFilter,

    /// Widget chrome hidden after updates.
    #[serde(default)]
    pub sanitizer: SanitizerConfig,
}

fn default_webdriver_url() -> String {
    "http://localhost:9515".to_string()
}

fn default_wall_url() -> String {
    "https://tv.dhan.co/".to_string()
}

fn default_refresh_interval_secs() -> u64 {
    300
}

fn default_liveness_probe_secs() -> u64 {
    5
}

fn default_fetch_limit() -> usize {
    30
}

fn default_user_data_dir() -> String {
    "user_data".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            wall_url: default_wall_url(),
            refresh_interval_secs: default_refresh_interval_secs(),
            liveness_probe_secs: default_liveness_probe_secs(),
            fetch_limit: default_fetch_limit(),
            user_data_dir: default_user_data_dir(),
            grid: GridConfig::default(),
            source: GainersConfig::default(),
            layout: LayoutConfig::default(),
            updater: UpdaterConfig::default(),
            filter: KeyFilter::default(),
            sanitizer: SanitizerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location.
    pub fn load() -> AppResult<Self> {
        let config_path = std::env::var("CHARTWALL_CONFIG")
            .unwrap_or_else(|_| "config/default.toml".to_string());

        if Path::new(&config_path).exists() {
            Self::from_file(&config_path)
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn liveness_probe(&self) -> Duration {
        Duration::from_secs(self.liveness_probe_secs)
    }
}

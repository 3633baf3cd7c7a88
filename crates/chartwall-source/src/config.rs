//! Symbol source configuration.

use std::time::Duration;

use chartwall_core::RetryPolicy;
use serde::{Deserialize, Serialize};

/// Configuration for the volume-gainers scrape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GainersConfig {
    /// Page carrying the ranked table.
    #[serde(default = "default_url")]
    pub url: String,

    /// Fetch attempts before giving up for the cycle.
    #[serde(default = "default_fetch_attempts")]
    pub fetch_attempts: u32,

    /// Cooldown after a reload, before re-checking for rows.
    #[serde(default = "default_retry_cooldown_ms")]
    pub retry_cooldown_ms: u64,

    /// Budget for data rows to appear after navigation.
    #[serde(default = "default_table_wait_ms")]
    pub table_wait_ms: u64,

    /// Ranked rows to drop from the front of a successful parse. The
    /// table leads with a cross-listed index row that is not a tradable
    /// symbol.
    #[serde(default = "default_skip_leading")]
    pub skip_leading: usize,
}

fn default_url() -> String {
    "https://www.nseindia.com/market-data/volume-gainers-spurts".to_string()
}

fn default_fetch_attempts() -> u32 {
    3
}

fn default_retry_cooldown_ms() -> u64 {
    5_000
}

fn default_table_wait_ms() -> u64 {
    20_000
}

fn default_skip_leading() -> usize {
    1
}

impl Default for GainersConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            fetch_attempts: default_fetch_attempts(),
            retry_cooldown_ms: default_retry_cooldown_ms(),
            table_wait_ms: default_table_wait_ms(),
            skip_leading: default_skip_leading(),
        }
    }
}

impl GainersConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::fixed(
            self.fetch_attempts,
            Duration::from_millis(self.retry_cooldown_ms),
        )
    }

    pub fn table_wait(&self) -> Duration {
        Duration::from_millis(self.table_wait_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = GainersConfig::default();
        assert_eq!(cfg.fetch_attempts, 3);
        assert_eq!(cfg.retry_cooldown_ms, 5_000);
        assert_eq!(cfg.table_wait_ms, 20_000);
        assert_eq!(cfg.skip_leading, 1);
        assert!(cfg.url.contains("volume-gainers"));
    }

    #[test]
    fn test_retry_policy_shape() {
        let cfg = GainersConfig::default();
        let policy = cfg.retry_policy();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay_for(1), Duration::from_secs(5));
        assert_eq!(policy.delay_for(2), Duration::from_secs(5));
    }
}

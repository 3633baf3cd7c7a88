//! Panel chrome removal.
//!
//! Each live panel is a full instance of the host's charting UI, toolbars
//! included. After a cycle's updates are done, a style sheet is injected
//! into every live panel hiding the widget chrome, leaving a chart-only
//! view. The injection is marked with an id so repeat cycles do not stack
//! sheets; a frame navigation clears the mark along with the document,
//! which is exactly when re-injection is wanted.

use chartwall_driver::{DriverResult, PanelAccess};
use serde::{Deserialize, Serialize};

/// DOM id of the injected style sheet inside a panel.
const STYLE_DOM_ID: &str = "cw-clean-style";

/// Selectors hidden inside every live panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizerConfig {
    #[serde(default = "default_hidden_selectors")]
    pub hidden_selectors: Vec<String>,
}

fn default_hidden_selectors() -> Vec<String> {
    [
        ".layout__area--top",
        ".header-chart-panel",
        ".tv-header",
        ".chart-toolbar",
        "[data-role='toolbar']",
        ".drawing-toolbar",
        ".layout__area--left",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            hidden_selectors: default_hidden_selectors(),
        }
    }
}

/// Strips widget chrome from panels.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    config: SanitizerConfig,
}

impl Sanitizer {
    pub fn new(config: SanitizerConfig) -> Self {
        Self { config }
    }

    /// The in-panel injection script.
    pub fn style_script(&self) -> String {
        let selectors = self.config.hidden_selectors.join(", ");
        format!(
            "(function() {{\
               if (document.getElementById('{STYLE_DOM_ID}')) {{ return; }}\
               var s = document.createElement('style');\
               s.id = '{STYLE_DOM_ID}';\
               s.innerHTML = '{selectors} {{ display: none !important; }}';\
               document.head.appendChild(s);\
             }})();"
        )
    }

    /// Apply the style sheet to one panel. The frame is always left, on
    /// the failure path too.
    pub async fn apply<D: PanelAccess>(&self, driver: &D, dom_id: &str) -> DriverResult<()> {
        let panel = driver.open_panel(dom_id).await?;
        let injected = panel.run_script(&self.style_script()).await;
        let left = panel.close().await;
        injected?;
        left
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(SanitizerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_hides_widget_chrome() {
        let script = Sanitizer::default().style_script();
        assert!(script.contains(".layout__area--top"));
        assert!(script.contains(".tv-header"));
        assert!(script.contains("[data-role='toolbar']"));
        assert!(script.contains(".layout__area--left"));
        assert!(script.contains("display: none !important;"));
    }

    #[test]
    fn test_script_is_guarded_by_style_id() {
        let script = Sanitizer::default().style_script();
        assert!(script.contains("if (document.getElementById('cw-clean-style')) { return; }"));
        assert!(script.contains("s.id = 'cw-clean-style';"));
    }

    #[test]
    fn test_custom_selector_list() {
        let sanitizer = Sanitizer::new(SanitizerConfig {
            hidden_selectors: vec![".ad-banner".to_string(), "#promo".to_string()],
        });
        let script = sanitizer.style_script();
        assert!(script.contains(".ad-banner, #promo { display: none !important; }"));
        assert!(!script.contains(".tv-header"));
    }
}

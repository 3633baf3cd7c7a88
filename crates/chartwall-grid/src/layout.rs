//! Layout builder.
//!
//! Produces the complete markup fragment that replaces the host document:
//! scoped styles, the tab-loading helpers, one tab button per page, one
//! grid container per page, and one iframe per slot. Page 0 is the visible
//! page by construction; its assigned slots load the widget immediately,
//! assigned slots on hidden pages defer behind `data-pending-src`, and
//! unassigned slots stay blank.
//!
//! The widget is always booted on a generic index instrument: that URL is
//! the one guaranteed to render the full chart shell (toolbar and search),
//! which the updater then drives per-slot.

use std::fmt::Write as _;
use std::time::Duration;

use chartwall_core::{tab_button_dom_id, tab_button_label, tab_dom_id, Allocation, PanelId};
use serde::{Deserialize, Serialize};
use url::Url;

/// DOM id of the injected wall container. Its presence is the layout
/// liveness probe.
pub const ROOT_DOM_ID: &str = "wall-root";

/// Layout and wall-timing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Widget URL used to boot every panel.
    #[serde(default = "default_chart_url")]
    pub chart_url: String,

    /// Per-slot delay between deferred widget boots on a newly shown page.
    #[serde(default = "default_stagger_ms")]
    pub stagger_ms: u64,

    /// Settle time after the wall markup is injected.
    #[serde(default = "default_stabilize_ms")]
    pub stabilize_ms: u64,

    /// Settle time after a page switch.
    #[serde(default = "default_page_transition_ms")]
    pub page_transition_ms: u64,
}

fn default_chart_url() -> String {
    "https://tv.dhan.co/?symbol=NSE:NIFTY".to_string()
}

fn default_stagger_ms() -> u64 {
    300
}

fn default_stabilize_ms() -> u64 {
    500
}

fn default_page_transition_ms() -> u64 {
    500
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            chart_url: default_chart_url(),
            stagger_ms: default_stagger_ms(),
            stabilize_ms: default_stabilize_ms(),
            page_transition_ms: default_page_transition_ms(),
        }
    }
}

impl LayoutConfig {
    pub fn stagger(&self) -> Duration {
        Duration::from_millis(self.stagger_ms)
    }

    pub fn stabilize(&self) -> Duration {
        Duration::from_millis(self.stabilize_ms)
    }

    pub fn page_transition(&self) -> Duration {
        Duration::from_millis(self.page_transition_ms)
    }

    /// Widget origin for the preconnect hint, when the URL parses.
    pub fn origin(&self) -> Option<String> {
        let parsed = Url::parse(&self.chart_url).ok()?;
        let host = parsed.host_str()?;
        match parsed.port() {
            Some(port) => Some(format!("{}://{host}:{port}", parsed.scheme())),
            None => Some(format!("{}://{host}", parsed.scheme())),
        }
    }
}

/// Build the full wall markup for one allocation.
pub fn build_markup(alloc: &Allocation, cfg: &LayoutConfig) -> String {
    let dims = alloc.dims();
    let mut html = String::with_capacity(8 * 1024);

    let _ = write!(
        html,
        r#"<div id="{ROOT_DOM_ID}" style="position:absolute; top:0; left:0; width:100%; height:100%; z-index:99999; background:#000;">"#
    );
    let _ = write!(html, "<style>{}</style>", wall_css(dims.slots_per_page));
    if let Some(origin) = cfg.origin() {
        let _ = write!(html, r#"<link rel="preconnect" href="{origin}">"#);
    }
    let _ = write!(html, "<script>{}</script>", helper_script(cfg.stagger_ms));

    html.push_str(r#"<div class="tab-bar">"#);
    for page in 0..dims.pages {
        let active = if page == 0 { " active" } else { "" };
        let _ = write!(
            html,
            r#"<button id="{}" class="tab-btn{active}" onclick="showTab({page})">{}</button>"#,
            tab_button_dom_id(page),
            tab_button_label(page)
        );
    }
    html.push_str("</div>");

    for page in 0..dims.pages {
        let active = if page == 0 { " active-page" } else { "" };
        let _ = write!(html, r#"<div id="{}" class="grid-page{active}">"#, tab_dom_id(page));
        for slot in 0..dims.slots_per_page {
            let panel = PanelId::new(page, slot);
            let id = panel.dom_id();
            if alloc.get(panel).is_none() {
                let _ = write!(
                    html,
                    r#"<iframe id="{id}" src="about:blank" allow="autoplay; encrypted-media"></iframe>"#
                );
            } else if page == 0 {
                // Critical path: the visible page boots with zero delay.
                let _ = write!(
                    html,
                    r#"<iframe id="{id}" src="{}" allow="autoplay; encrypted-media"></iframe>"#,
                    cfg.chart_url
                );
            } else {
                let _ = write!(
                    html,
                    r#"<iframe id="{id}" src="about:blank" data-pending-src="{}" allow="autoplay; encrypted-media"></iframe>"#,
                    cfg.chart_url
                );
            }
        }
        html.push_str("</div>");
    }

    html.push_str("</div>");
    html
}

fn wall_css(slots_per_page: usize) -> String {
    // Two rows; column count follows the slot count.
    let columns = slots_per_page.div_ceil(2);
    format!(
        "body {{ margin: 0; overflow: hidden; background: #000; font-family: sans-serif; }}\
         .tab-bar {{ position: absolute; top: 0; left: 0; width: 100%; height: 35px; background: #222; display: flex; z-index: 100000; border-bottom: 2px solid #444; }}\
         .tab-btn {{ flex: 1; border: none; background: #333; color: #fff; cursor: pointer; border-right: 1px solid #444; font-size: 14px; text-transform: uppercase; letter-spacing: 1px; }}\
         .tab-btn:hover {{ background: #444; }}\
         .tab-btn.active {{ background: #007bff; font-weight: bold; color: white; }}\
         .grid-page {{ display: none; width: 100vw; height: calc(100vh - 35px); margin-top: 35px; grid-template-columns: repeat({columns}, 1fr); grid-template-rows: repeat(2, 1fr); gap: 2px; background: #111; }}\
         .grid-page.active-page {{ display: grid; }}\
         iframe {{ width: 100%; height: 100%; border: none; background: #000; }}"
    )
}

fn helper_script(stagger_ms: u64) -> String {
    format!(
        "window.loadTab = function(index) {{\
           var container = document.getElementById('tab-' + index);\
           if (!container) return;\
           var frames = container.querySelectorAll('iframe');\
           frames.forEach(function(iframe, i) {{\
             var pending = iframe.getAttribute('data-pending-src');\
             if (pending) {{\
               setTimeout(function() {{\
                 iframe.src = pending;\
                 iframe.removeAttribute('data-pending-src');\
               }}, i * {stagger_ms});\
             }}\
           }});\
         }};\
         window.showTab = function(index) {{\
           document.querySelectorAll('.grid-page').forEach(function(el) {{ el.classList.remove('active-page'); }});\
           document.querySelectorAll('.tab-btn').forEach(function(el) {{ el.classList.remove('active'); }});\
           var page = document.getElementById('tab-' + index);\
           var btn = document.getElementById('btn-' + index);\
           if (page) {{ page.classList.add('active-page'); }}\
           if (btn) {{ btn.classList.add('active'); }}\
           window.loadTab(index);\
         }};\
         window.loadTab(0);"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chartwall_core::{allocate, GridDims, Symbol};

    fn seven_symbol_markup() -> String {
        let symbols: Vec<Symbol> = [
            "RELIANCE",
            "TCS",
            "INFY",
            "HDFCBANK",
            "ICICIBANK",
            "SBIN",
            "BHARTIARTL",
        ]
        .iter()
        .map(|s| Symbol::parse(s).unwrap())
        .collect();
        let alloc = allocate(&symbols, GridDims::default());
        build_markup(&alloc, &LayoutConfig::default())
    }

    #[test]
    fn test_structure_counts() {
        let html = seven_symbol_markup();

        assert_eq!(html.matches("<button id=\"btn-").count(), 4);
        assert_eq!(html.matches("class=\"grid-page").count(), 4);
        assert_eq!(html.matches("<iframe ").count(), 24);
        assert!(html.contains(&format!("id=\"{ROOT_DOM_ID}\"")));
    }

    #[test]
    fn test_exactly_one_visible_page() {
        let html = seven_symbol_markup();

        assert_eq!(html.matches("class=\"grid-page active-page\"").count(), 1);
        assert_eq!(html.matches("class=\"tab-btn active\"").count(), 1);
        assert!(html.contains("id=\"tab-0\" class=\"grid-page active-page\""));
    }

    #[test]
    fn test_button_labels_and_handlers() {
        let html = seven_symbol_markup();

        assert!(html.contains(">PAGE 1</button>"));
        assert!(html.contains(">PAGE 4</button>"));
        assert!(html.contains("onclick=\"showTab(0)\""));
        assert!(html.contains("onclick=\"showTab(3)\""));
    }

    #[test]
    fn test_visible_page_is_critical_path() {
        let html = seven_symbol_markup();
        let url = LayoutConfig::default().chart_url;

        // Six assigned slots on page 0 boot immediately. The leading space
        // keeps data-pending-src attributes out of the count.
        assert_eq!(html.matches(&format!(" src=\"{url}\"")).count(), 6);
        // One assigned slot on page 1 defers.
        assert_eq!(html.matches("data-pending-src=\"").count(), 1);
        assert!(html.contains(&format!(
            "<iframe id=\"chart-frame-1-0\" src=\"about:blank\" data-pending-src=\"{url}\""
        )));
    }

    #[test]
    fn test_unassigned_slots_stay_blank() {
        let html = seven_symbol_markup();

        // 24 slots, 7 assigned: 17 inert frames plus the 1 deferred one
        // also carry about:blank.
        assert_eq!(html.matches("src=\"about:blank\"").count(), 18);
        // A never-assigned slot has no deferred reference.
        assert!(html.contains("<iframe id=\"chart-frame-3-5\" src=\"about:blank\" allow="));
    }

    #[test]
    fn test_stagger_is_rendered_into_loader() {
        let html = seven_symbol_markup();
        assert!(html.contains("i * 300"));
        assert!(html.contains("window.loadTab = function"));
        assert!(html.contains("window.showTab = function"));
        // Pending frames on the boot-visible page get caught immediately.
        assert!(html.contains("window.loadTab(0);"));
    }

    #[test]
    fn test_preconnect_hint() {
        let html = seven_symbol_markup();
        assert!(html.contains("<link rel=\"preconnect\" href=\"https://tv.dhan.co\">"));
    }

    #[test]
    fn test_custom_stagger_and_origin() {
        let symbols = vec![Symbol::parse("TCS").unwrap()];
        let alloc = allocate(&symbols, GridDims::new(2, 2).unwrap());
        let cfg = LayoutConfig {
            chart_url: "http://localhost:8080/widget?symbol=X".to_string(),
            stagger_ms: 150,
            ..LayoutConfig::default()
        };
        let html = build_markup(&alloc, &cfg);

        assert!(html.contains("i * 150"));
        assert!(html.contains("<link rel=\"preconnect\" href=\"http://localhost:8080\">"));
        assert_eq!(html.matches("<iframe ").count(), 4);
    }

    #[test]
    fn test_css_grid_follows_slot_count() {
        let symbols = vec![Symbol::parse("TCS").unwrap()];
        let alloc = allocate(&symbols, GridDims::default());
        let html = build_markup(&alloc, &LayoutConfig::default());
        assert!(html.contains("grid-template-columns: repeat(3, 1fr)"));

        let alloc8 = allocate(&symbols, GridDims::new(2, 8).unwrap());
        let html8 = build_markup(&alloc8, &LayoutConfig::default());
        assert!(html8.contains("grid-template-columns: repeat(4, 1fr)"));
    }
}

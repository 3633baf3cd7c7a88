//! Recording fakes for the wall surface and the symbol source.
//!
//! `FakeWall` stands in for the wall browser session: it accepts every
//! interaction and appends a line per call to an inspectable log.
//! `FakeSource` replays scripted symbol batches in order and returns an
//! empty batch once exhausted.

use async_trait::async_trait;
use chartwall_core::{Symbol, SymbolBatch};
use chartwall_driver::{DriverResult, HostSurface, KeyInput, PanelAccess, PanelSurface};
use chartwall_source::SymbolSource;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

pub struct FakeWall {
    log: Mutex<Vec<String>>,
}

impl FakeWall {
    pub fn new() -> Self {
        Self {
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn take_log(&self) -> Vec<String> {
        std::mem::take(&mut *self.log.lock().unwrap())
    }

    fn push(&self, entry: impl Into<String>) {
        self.log.lock().unwrap().push(entry.into());
    }
}

#[async_trait]
impl HostSurface for FakeWall {
    async fn replace_document(&self, _markup: &str) -> DriverResult<()> {
        self.push("build");
        Ok(())
    }

    async fn run_script(&self, script: &str) -> DriverResult<Value> {
        if script.contains("data-pending-src") {
            self.push("host:materialize");
            return Ok(json!(true));
        }
        self.push("host:script");
        Ok(Value::Null)
    }

    async fn click(&self, dom_id: &str) -> DriverResult<()> {
        self.push(format!("click:{dom_id}"));
        Ok(())
    }

    async fn element_exists(&self, _dom_id: &str) -> DriverResult<bool> {
        Ok(true)
    }

    async fn wait_for_css(&self, selector: &str, _timeout: Duration) -> DriverResult<()> {
        self.push(format!("wait:{selector}"));
        Ok(())
    }

    async fn is_alive(&self) -> bool {
        true
    }
}

#[async_trait]
impl PanelAccess for FakeWall {
    async fn open_panel<'a>(&'a self, dom_id: &str) -> DriverResult<Box<dyn PanelSurface + 'a>> {
        self.push(format!("open:{dom_id}"));
        Ok(Box::new(FakePanel { wall: self }))
    }
}

struct FakePanel<'a> {
    wall: &'a FakeWall,
}

#[async_trait]
impl PanelSurface for FakePanel<'_> {
    async fn run_script(&self, script: &str) -> DriverResult<Value> {
        if script.contains("__cw_keyfilter") {
            self.wall.push("panel:filter");
        } else if script.contains("cw-clean-style") {
            self.wall.push("panel:sanitize");
        } else {
            self.wall.push("panel:script");
        }
        Ok(Value::Null)
    }

    async fn focus(&self) -> DriverResult<()> {
        self.wall.push("focus");
        Ok(())
    }

    async fn type_text(&self, text: &str) -> DriverResult<()> {
        self.wall.push(format!("type:{text}"));
        Ok(())
    }

    async fn press_key(&self, key: KeyInput) -> DriverResult<()> {
        self.wall.push(format!("key:{key:?}"));
        Ok(())
    }

    async fn close(self: Box<Self>) -> DriverResult<()> {
        self.wall.push("close");
        Ok(())
    }
}

pub struct FakeSource {
    batches: Mutex<VecDeque<Vec<Symbol>>>,
    requested: Mutex<Vec<usize>>,
}

impl FakeSource {
    pub fn new(batches: Vec<Vec<&str>>) -> Self {
        let batches = batches
            .into_iter()
            .map(|names| {
                names
                    .into_iter()
                    .map(|n| Symbol::parse(n).unwrap())
                    .collect()
            })
            .collect();
        Self {
            batches: Mutex::new(batches),
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Limits passed to `fetch_top`, in call order.
    pub fn requested(&self) -> Vec<usize> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl SymbolSource for FakeSource {
    async fn fetch_top(&self, limit: usize) -> SymbolBatch {
        self.requested.lock().unwrap().push(limit);
        match self.batches.lock().unwrap().pop_front() {
            Some(symbols) => SymbolBatch::new(symbols),
            None => SymbolBatch::empty(),
        }
    }
}

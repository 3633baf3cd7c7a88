//! Interaction capability traits.
//!
//! The grid engine never touches fantoccini directly; it speaks these
//! traits, and tests hand it fakes. The split matters for frames: synthetic
//! keys dispatch to the session's current browsing context, so everything
//! between entering a panel's frame and leaving it must happen through the
//! `PanelSurface` handle. `close()` is the only way out and callers run it
//! on failure paths too.

use std::time::Duration;

use async_trait::async_trait;
use fantoccini::actions::{InputSource, KeyAction, KeyActions};
use fantoccini::key::Key;
use fantoccini::{Client, Locator};
use serde_json::{json, Value};

use crate::error::{DriverError, DriverResult};
use crate::session::Session;

/// Click preference inside a panel: the chart surface first, the document
/// body as fallback.
const FOCUS_TARGETS: &[&str] = &["canvas", "body"];

/// Non-character keys the updater can press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Enter,
}

impl KeyInput {
    /// W3C key-action codepoint.
    pub fn as_char(self) -> char {
        match self {
            Self::Enter => Key::Enter.into(),
        }
    }
}

/// Capabilities against the top-level host document.
#[async_trait]
pub trait HostSurface: Send + Sync {
    /// Replace the entire host document with the given markup.
    async fn replace_document(&self, markup: &str) -> DriverResult<()>;

    /// Run a script in the top-level document.
    async fn run_script(&self, script: &str) -> DriverResult<Value>;

    /// Click the element with the given DOM id.
    async fn click(&self, dom_id: &str) -> DriverResult<()>;

    /// Whether an element with the given DOM id currently exists.
    async fn element_exists(&self, dom_id: &str) -> DriverResult<bool>;

    /// Wait until a CSS selector matches in the top-level document.
    async fn wait_for_css(&self, selector: &str, timeout: Duration) -> DriverResult<()>;

    /// Whether the session still answers.
    async fn is_alive(&self) -> bool;
}

/// Entry into per-panel interaction.
#[async_trait]
pub trait PanelAccess: Send + Sync {
    /// Enter a panel's frame. The returned surface holds the session inside
    /// that frame until `close()`.
    async fn open_panel<'a>(&'a self, dom_id: &str) -> DriverResult<Box<dyn PanelSurface + 'a>>;
}

/// Capabilities inside one panel's frame.
#[async_trait]
pub trait PanelSurface: Send {
    /// Run a script in the panel's document.
    async fn run_script(&self, script: &str) -> DriverResult<Value>;

    /// Give the panel's widget keyboard focus.
    async fn focus(&self) -> DriverResult<()>;

    /// Type literal text as individual key presses.
    async fn type_text(&self, text: &str) -> DriverResult<()>;

    /// Press a single non-character key.
    async fn press_key(&self, key: KeyInput) -> DriverResult<()>;

    /// Leave the frame, returning the session to the host document.
    async fn close(self: Box<Self>) -> DriverResult<()>;
}

#[async_trait]
impl HostSurface for Session {
    async fn replace_document(&self, markup: &str) -> DriverResult<()> {
        self.execute(
            "document.open(); document.write(arguments[0]); document.close();",
            vec![Value::String(markup.to_string())],
        )
        .await?;
        Ok(())
    }

    async fn run_script(&self, script: &str) -> DriverResult<Value> {
        self.execute(script, Vec::new()).await
    }

    async fn click(&self, dom_id: &str) -> DriverResult<()> {
        self.click_id(dom_id).await
    }

    async fn element_exists(&self, dom_id: &str) -> DriverResult<bool> {
        let value = self
            .execute(
                "return document.getElementById(arguments[0]) !== null;",
                vec![json!(dom_id)],
            )
            .await?;
        value
            .as_bool()
            .ok_or_else(|| DriverError::ScriptShape(format!("element_exists returned {value}")))
    }

    async fn wait_for_css(&self, selector: &str, timeout: Duration) -> DriverResult<()> {
        Session::wait_for_css(self, selector, timeout).await
    }

    async fn is_alive(&self) -> bool {
        Session::is_alive(self).await
    }
}

#[async_trait]
impl PanelAccess for Session {
    async fn open_panel<'a>(&'a self, dom_id: &str) -> DriverResult<Box<dyn PanelSurface + 'a>> {
        let frame = self
            .client()
            .find(Locator::Id(dom_id))
            .await
            .map_err(|e| DriverError::PanelUnreachable {
                dom_id: dom_id.to_string(),
                reason: e.to_string(),
            })?;
        frame
            .enter_frame()
            .await
            .map_err(|e| DriverError::PanelUnreachable {
                dom_id: dom_id.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Box::new(FramePanel {
            client: self.client().clone(),
            dom_id: dom_id.to_string(),
        }))
    }
}

/// Panel surface backed by a real frame switch.
struct FramePanel {
    client: Client,
    dom_id: String,
}

#[async_trait]
impl PanelSurface for FramePanel {
    async fn run_script(&self, script: &str) -> DriverResult<Value> {
        Ok(self.client.execute(script, Vec::new()).await?)
    }

    async fn focus(&self) -> DriverResult<()> {
        for css in FOCUS_TARGETS {
            if let Ok(el) = self.client.find(Locator::Css(css)).await {
                el.click().await?;
                return Ok(());
            }
        }
        Err(DriverError::PanelUnreachable {
            dom_id: self.dom_id.clone(),
            reason: "no clickable surface".to_string(),
        })
    }

    async fn type_text(&self, text: &str) -> DriverResult<()> {
        let mut actions = KeyActions::new("keyboard".to_string());
        for value in text.chars() {
            actions = actions
                .then(KeyAction::Down { value })
                .then(KeyAction::Up { value });
        }
        self.client.perform_actions(actions).await?;
        Ok(())
    }

    async fn press_key(&self, key: KeyInput) -> DriverResult<()> {
        let value = key.as_char();
        let actions = KeyActions::new("keyboard".to_string())
            .then(KeyAction::Down { value })
            .then(KeyAction::Up { value });
        self.client.perform_actions(actions).await?;
        Ok(())
    }

    async fn close(self: Box<Self>) -> DriverResult<()> {
        let this = *self;
        this.client.enter_parent_frame().await?;
        Ok(())
    }
}

//! In-page console capture.
//!
//! The W3C protocol has no log-retrieval endpoint, so widget errors are
//! captured by a hook injected into the host document: `console.error` and
//! `console.warn` are wrapped to append into a bounded buffer, plus a
//! window `error` listener for uncaught exceptions. Draining reads and
//! clears the buffer. The hook marks itself installed and is re-injected
//! on every drain, so it survives document replacement.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{DriverError, DriverResult};

/// Capacity of the in-page buffer; older entries are dropped first.
const BUFFER_CAP: usize = 200;

/// One captured console entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConsoleEntry {
    pub level: String,
    pub text: String,
}

impl ConsoleEntry {
    pub fn is_error(&self) -> bool {
        self.level == "error"
    }
}

/// Script installing the capture hook. Idempotent.
pub fn install_script() -> String {
    format!(
        r#"(function() {{
  if (window.__cw_console) {{ return; }}
  window.__cw_console = [];
  var push = function(level, args) {{
    try {{
      var text = Array.prototype.map.call(args, function(a) {{ return String(a); }}).join(' ');
      window.__cw_console.push({{ level: level, text: text }});
      if (window.__cw_console.length > {cap}) {{ window.__cw_console.shift(); }}
    }} catch (ignored) {{}}
  }};
  var origError = console.error, origWarn = console.warn;
  console.error = function() {{ push('error', arguments); origError.apply(console, arguments); }};
  console.warn = function() {{ push('warn', arguments); origWarn.apply(console, arguments); }};
  window.addEventListener('error', function(e) {{ push('error', [e.message]); }});
}})();"#,
        cap = BUFFER_CAP
    )
}

/// Script returning buffered entries and clearing the buffer.
pub fn drain_script() -> &'static str {
    "var hits = window.__cw_console || []; window.__cw_console = []; return hits;"
}

/// Decode the drain script's return value.
pub fn parse_entries(value: Value) -> DriverResult<Vec<ConsoleEntry>> {
    serde_json::from_value(value)
        .map_err(|e| DriverError::ScriptShape(format!("console drain: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_install_script_is_guarded() {
        let script = install_script();
        // Re-running must not stack wrappers.
        assert!(script.contains("if (window.__cw_console) { return; }"));
        assert!(script.contains("console.error"));
        assert!(script.contains("console.warn"));
    }

    #[test]
    fn test_parse_entries() {
        let entries = parse_entries(json!([
            { "level": "error", "text": "boom" },
            { "level": "warn", "text": "slow" },
        ]))
        .unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].is_error());
        assert!(!entries[1].is_error());
        assert_eq!(entries[1].text, "slow");
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(parse_entries(json!({ "level": "error" })).is_err());
        assert!(parse_entries(json!(42)).is_err());
    }

    #[test]
    fn test_parse_empty_buffer() {
        assert!(parse_entries(json!([])).unwrap().is_empty());
    }
}

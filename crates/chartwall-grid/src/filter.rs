//! Input-safety key filter.
//!
//! Typing happens inside a live trading widget whose global hotkeys place
//! real orders: shift+S is instant sell, shift+B instant buy, and plain F
//! toggles fullscreen. The filter is a capture-phase keydown listener
//! injected into a panel before any synthetic keys are sent. It passes
//! plain letters through untouched (type-to-search needs them; symbols are
//! typed lowercase so no shifted letter ever enters the stream) and never
//! interferes with the widget's own text inputs.
//!
//! `suppresses` is the decision table; `to_script` renders the equivalent
//! listener. Both must agree, which the tests pin down.
//!
//! # Panics
//!
//! Key lists are embedded into the script as JSON arrays of plain
//! strings, which cannot fail to serialize.

use serde::{Deserialize, Serialize};

/// Keys suppressed while a panel has focus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyFilter {
    /// Letters blocked only in combination with shift.
    #[serde(default = "default_shift_blocked")]
    pub shift_blocked: Vec<char>,

    /// Letters blocked with or without shift.
    #[serde(default = "default_plain_blocked")]
    pub plain_blocked: Vec<char>,
}

fn default_shift_blocked() -> Vec<char> {
    vec!['s', 'b']
}

fn default_plain_blocked() -> Vec<char> {
    vec!['f']
}

impl Default for KeyFilter {
    fn default() -> Self {
        Self {
            shift_blocked: default_shift_blocked(),
            plain_blocked: default_plain_blocked(),
        }
    }
}

impl KeyFilter {
    /// Whether a keydown would be suppressed.
    ///
    /// `text_input_target` is true when the event targets a text input
    /// element; those events always pass so the widget's own search box
    /// keeps working.
    pub fn suppresses(&self, key: char, shift: bool, text_input_target: bool) -> bool {
        if text_input_target {
            return false;
        }
        let key = key.to_ascii_lowercase();
        if shift && self.shift_blocked.contains(&key) {
            return true;
        }
        self.plain_blocked.contains(&key)
    }

    /// Render the equivalent capture-phase listener. Idempotent per
    /// document; a frame navigation resets the guard along with the DOM.
    pub fn to_script(&self) -> String {
        let shift_blocked = json_key_list(&self.shift_blocked);
        let plain_blocked = json_key_list(&self.plain_blocked);
        format!(
            "(function() {{\
               if (window.__cw_keyfilter) {{ return; }}\
               window.__cw_keyfilter = true;\
               var shiftBlocked = {shift_blocked};\
               var plainBlocked = {plain_blocked};\
               window.addEventListener('keydown', function(e) {{\
                 if (e.target.tagName === 'INPUT') return;\
                 var key = e.key.toLowerCase();\
                 if (e.shiftKey && shiftBlocked.indexOf(key) !== -1) {{\
                   e.stopImmediatePropagation();\
                   e.preventDefault();\
                   console.log('Blocked dangerous key: Shift + ' + key);\
                   return;\
                 }}\
                 if (plainBlocked.indexOf(key) !== -1) {{\
                   e.stopImmediatePropagation();\
                   e.preventDefault();\
                 }}\
               }}, true);\
             }})();"
        )
    }
}

fn json_key_list(keys: &[char]) -> String {
    let lowered: Vec<String> = keys.iter().map(|k| k.to_ascii_lowercase().to_string()).collect();
    serde_json::to_string(&lowered).expect("plain strings")
}

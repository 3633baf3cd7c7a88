//! Staged loading of deferred panels.
//!
//! Deferred panels activate on two paths. The scheduled path runs in the
//! page itself: showing a page walks its frames and swaps each deferred
//! reference into place after `slot * delta` (see the loader helper in
//! the layout markup). The immediate path runs host-side before an update
//! that targets a not-yet-live slot; it is idempotent against the
//! scheduled path having already fired, and also materializes a slot that
//! never received a deferred reference at build time.
//!
//! # Panics
//!
//! Embedding ids and URLs into script text serializes plain strings with
//! `serde_json`, which cannot fail for strings.

use std::time::Duration;

/// The activation schedule for `occupied` deferred slots: slot `k` loads
/// after `k * delta`.
pub fn stagger_offsets(occupied: usize, delta: Duration) -> Vec<Duration> {
    (0..occupied as u32).map(|k| delta * k).collect()
}

/// Host-side script that makes a panel's frame live right now.
///
/// Swaps `data-pending-src` into `src` when present; otherwise boots a
/// blank frame directly from `fallback_src`. Returns `false` only when
/// the frame element does not exist.
pub fn materialize_script(dom_id: &str, fallback_src: &str) -> String {
    // Values go through JSON so ids and URLs cannot break out of the
    // script literal.
    let id = serde_json::to_string(dom_id).expect("plain string");
    let fallback = serde_json::to_string(fallback_src).expect("plain string");
    format!(
        "var el = document.getElementById({id});\
         if (!el) {{ return false; }}\
         var pending = el.getAttribute('data-pending-src');\
         if (pending) {{\
           el.src = pending;\
           el.removeAttribute('data-pending-src');\
         }} else if (el.getAttribute('src') === 'about:blank') {{\
           el.src = {fallback};\
         }}\
         return true;"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_are_multiples_of_delta() {
        let delta = Duration::from_millis(300);
        let offsets = stagger_offsets(6, delta);
        assert_eq!(offsets.len(), 6);
        for (k, offset) in offsets.iter().enumerate() {
            assert_eq!(*offset, delta * k as u32);
        }
        // Concrete endpoints
        assert_eq!(offsets[0], Duration::ZERO);
        assert_eq!(offsets[5], Duration::from_millis(1500));
    }

    #[test]
    fn test_no_deferred_slots_no_schedule() {
        assert!(stagger_offsets(0, Duration::from_millis(300)).is_empty());
    }

    #[test]
    fn test_materialize_script_shape() {
        let script = materialize_script("chart-frame-1-0", "https://tv.dhan.co/?symbol=NSE:NIFTY");
        assert!(script.contains("getElementById(\"chart-frame-1-0\")"));
        assert!(script.contains("data-pending-src"));
        assert!(script.contains("\"https://tv.dhan.co/?symbol=NSE:NIFTY\""));
        assert!(script.contains("return false"));
    }

    #[test]
    fn test_materialize_script_escapes_values() {
        let script = materialize_script("x\"y", "https://example.invalid/?a=\"b\"");
        // JSON escaping keeps quotes inside the literals.
        assert!(script.contains(r#""x\"y""#));
        assert!(script.contains(r#"\"b\""#));
    }
}

//! Typed wrappers around the Leaflet map script via `js_sys::eval()`.
//!
//! `assets/js/webmap.js` is evaluated as a global script and exposes
//! `window.hydromap*` functions. Map commands are queued on
//! `window.__hydromapPending` and replayed in order once the map exists.

use hydromap_session::command::MapCommand;

// Embed the map script at compile time
static WEBMAP_JS: &str = include_str!("../assets/js/webmap.js");

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('HydroMap JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Initialize the map in `container_id` once Leaflet has loaded.
///
/// The script is stored on `window` and evaluated at global scope from the
/// polling callback so its function declarations stay global.
pub fn init_map(container_id: &str) {
    let store_js = format!(
        "window.__hydromapScript = {}; window.__hydromapPending = window.__hydromapPending || [];",
        serde_json::to_string(WEBMAP_JS).unwrap_or_default()
    );
    let _ = js_sys::eval(&store_js);

    call_js(&format!(
        r#"
        (function() {{
            var waitForLeaflet = setInterval(function() {{
                if (typeof L !== 'undefined' && document.getElementById('{container_id}')) {{
                    clearInterval(waitForLeaflet);
                    (0, eval)(window.__hydromapScript);
                    delete window.__hydromapScript;
                    window.hydromapInit('{container_id}');
                    console.log('HydroMap initialized');
                }}
            }}, 100);
        }})();
        "#,
    ));
}

/// Queue commands for the map and replay them if it is ready.
pub fn apply(commands: &[MapCommand]) {
    if commands.is_empty() {
        return;
    }
    let json = match serde_json::to_string(commands) {
        Ok(json) => json,
        Err(e) => {
            log::error!("[HydroMap] bridge: failed to serialize map commands: {}", e);
            return;
        }
    };
    // a JSON string literal is also a valid JS string literal
    let literal = serde_json::to_string(&json).unwrap_or_default();
    call_js(&format!(
        "(window.__hydromapPending = window.__hydromapPending || []).push({}); \
         if (window.__hydromapReady) {{ window.hydromapFlush(); }}",
        literal
    ));
    log::debug!("[HydroMap] bridge: queued {} map commands", commands.len());
}

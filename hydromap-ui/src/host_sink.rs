//! Delivery of host messages from the browser.

use hydromap_session::message::HostSink;
use wasm_bindgen::JsValue;

/// Writes each message to the console, where an embedding host that scrapes
/// the log stream picks it up.
pub struct ConsoleSink;

impl HostSink for ConsoleSink {
    fn deliver(&self, line: &str) {
        web_sys::console::log_1(&JsValue::from_str(line));
    }
}

/// Calls a JavaScript function registered by the host with each message.
pub struct CallbackSink {
    callback: js_sys::Function,
}

impl CallbackSink {
    pub fn new(callback: js_sys::Function) -> Self {
        Self { callback }
    }
}

impl HostSink for CallbackSink {
    fn deliver(&self, line: &str) {
        if let Err(e) = self.callback.call1(&JsValue::NULL, &JsValue::from_str(line)) {
            log::warn!("[HydroMap] host callback failed: {:?}", e);
        }
    }
}

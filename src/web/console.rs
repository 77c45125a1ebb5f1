//! Devtools console sink for [`ConsoleLayer`](emerson_core::logging::ConsoleLayer).

use emerson_core::logging::{LogLine, LogSink};
use wasm_bindgen::JsValue;

/// Writes each line to the browser console at the matching level.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserConsole;

impl LogSink for BrowserConsole {
    fn write(&self, line: &LogLine) {
        let text = JsValue::from_str(&line.to_text());
        match line.level.as_str() {
            "error" => web_sys::console::error_1(&text),
            "warn" => web_sys::console::warn_1(&text),
            "info" => web_sys::console::info_1(&text),
            _ => web_sys::console::debug_1(&text),
        }
    }
}

//! Emerson landing page, browser build
//!
//! Compiled to WebAssembly and loaded by the landing page. [`start`] runs
//! when the module is instantiated: it routes `tracing` output to the
//! devtools console and installs the page behaviors once the document has
//! been parsed.
//!
//! ```html
//! <script type="module">
//!   import init from "./pkg/emerson_site.js";
//!   init();
//! </script>
//! ```

pub mod web;

use std::cell::RefCell;
use std::rc::Rc;

use emerson_core::logging::ConsoleLayer;
use emerson_core::{BehaviorConfig, PageController};
use gloo::events::EventListener;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::prelude::*;
use wasm_bindgen::prelude::*;

pub use web::{BrowserConsole, WebPage};

thread_local! {
    // Installed behaviors, kept for the lifetime of the page
    static CONTROLLER: RefCell<Option<PageController<WebPage>>> = const { RefCell::new(None) };
}

fn init_logging() {
    let _ = tracing_subscriber::registry()
        .with(LevelFilter::INFO)
        .with(ConsoleLayer::new(BrowserConsole))
        .try_init();
}

fn install() {
    let page = match WebPage::new() {
        Ok(page) => Rc::new(page),
        Err(err) => {
            tracing::error!(error = %err, "No document to attach to");
            return;
        }
    };

    match PageController::install(page, BehaviorConfig::default()) {
        Ok(controller) => CONTROLLER.with(|slot| *slot.borrow_mut() = Some(controller)),
        Err(err) => tracing::error!(error = %err, "Failed to install page behaviors"),
    }
}

/// Module entry point.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    init_logging();

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        EventListener::once(&document, "DOMContentLoaded", |_event| install()).forget();
    } else {
        install();
    }
    Ok(())
}

/// Rebuild the marquee outside a resize, e.g. once web fonts have loaded
/// and the span width changed. Returns the new span count.
#[wasm_bindgen(js_name = refillMarquee)]
pub fn refill_marquee() -> Option<usize> {
    CONTROLLER.with(|slot| {
        slot.borrow()
            .as_ref()
            .and_then(|controller| controller.refill_marquee())
    })
}

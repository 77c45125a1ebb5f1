//! [`PageHost`] on the live DOM.
//!
//! Event handlers are gloo [`EventListener`]s owned by the page, so they live
//! exactly as long as the [`WebPage`]. Visibility watching uses one
//! `IntersectionObserver` per call, kept alive together with its callback.

mod console;

use std::cell::RefCell;
use std::fmt;
use std::time::Duration;

use emerson_core::host::{
    ClickEvent, ClickHandler, ClipboardCallback, PageHost, ResizeHandler, TimerTask,
    VisibilityHandler,
};
use emerson_core::{BehaviorError, BehaviorResult};
use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use js_sys::{Array, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Document, Element, Event, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, NodeList, ScrollBehavior, ScrollToOptions, Window,
};

pub use console::BrowserConsole;

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

struct Watcher {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

fn host_error(context: &str, err: JsValue) -> BehaviorError {
    BehaviorError::Host(format!("{}: {:?}", context, err))
}

/// The browser document the behaviors run against.
pub struct WebPage {
    window: Window,
    document: Document,
    listeners: RefCell<Vec<EventListener>>,
    watchers: RefCell<Vec<Watcher>>,
}

impl fmt::Debug for WebPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebPage")
            .field("listeners", &self.listeners.borrow().len())
            .field("watchers", &self.watchers.borrow().len())
            .finish()
    }
}

impl WebPage {
    pub fn new() -> BehaviorResult<Self> {
        let window = web_sys::window().ok_or_else(|| BehaviorError::Host("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| BehaviorError::Host("window has no document".into()))?;
        Ok(Self {
            window,
            document,
            listeners: RefCell::new(Vec::new()),
            watchers: RefCell::new(Vec::new()),
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn listen(&self, listener: EventListener) {
        self.listeners.borrow_mut().push(listener);
    }

    fn elements(list: NodeList) -> Vec<Element> {
        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn click_target(event: &Event) -> Option<Element> {
        event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
    }

    fn rejected<T>(selector: &str, err: JsValue) -> Option<T> {
        tracing::warn!(selector, error = ?err, "Selector rejected");
        None
    }
}

impl PageHost for WebPage {
    type Node = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        self.document
            .query_selector(selector)
            .unwrap_or_else(|err| Self::rejected(selector, err))
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        match self.document.query_selector_all(selector) {
            Ok(list) => Self::elements(list),
            Err(err) => Self::rejected(selector, err).unwrap_or_default(),
        }
    }

    fn query_within(&self, parent: &Element, selector: &str) -> Option<Element> {
        parent
            .query_selector(selector)
            .unwrap_or_else(|err| Self::rejected(selector, err))
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn closest(&self, node: &Element, selector: &str) -> Option<Element> {
        node.closest(selector)
            .unwrap_or_else(|err| Self::rejected(selector, err))
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().add_1(class) {
            tracing::warn!(class, error = ?err, "Failed to add class");
        }
    }

    fn remove_class(&self, node: &Element, class: &str) {
        if let Err(err) = node.class_list().remove_1(class) {
            tracing::warn!(class, error = ?err, "Failed to remove class");
        }
    }

    fn toggle_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().toggle(class).unwrap_or_else(|err| {
            tracing::warn!(class, error = ?err, "Failed to toggle class");
            node.class_list().contains(class)
        })
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    // textContent, so CSS text-transform never leaks into copied text
    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        let Some(html) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        if let Err(err) = html.style().set_property(property, value) {
            tracing::warn!(property, error = ?err, "Failed to set style");
        }
    }

    fn offset_width(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map(|html| f64::from(html.offset_width()))
            .unwrap_or(0.0)
    }

    fn offset_height(&self, node: &Element) -> f64 {
        node.dyn_ref::<HtmlElement>()
            .map(|html| f64::from(html.offset_height()))
            .unwrap_or(0.0)
    }

    fn viewport_top(&self, node: &Element) -> f64 {
        node.get_bounding_client_rect().top()
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or(0.0)
    }

    fn smooth_scroll_to(&self, top: f64) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn clear_children(&self, node: &Element) {
        node.set_inner_html("");
    }

    fn append_span(&self, parent: &Element, text: &str) -> BehaviorResult<()> {
        let span = self
            .document
            .create_element("span")
            .map_err(|err| host_error("create span", err))?;
        span.set_text_content(Some(text));
        parent
            .append_child(&span)
            .map_err(|err| host_error("append span", err))?;
        Ok(())
    }

    fn inject_style(&self, css: &str) -> BehaviorResult<()> {
        let head = self
            .document
            .head()
            .ok_or_else(|| BehaviorError::Host("document has no head".into()))?;
        let style = self
            .document
            .create_element("style")
            .map_err(|err| host_error("create style", err))?;
        style.set_text_content(Some(css));
        head.append_child(&style)
            .map_err(|err| host_error("append style", err))?;
        Ok(())
    }

    fn on_click(&self, node: &Element, mut handler: ClickHandler<Element>) {
        let current = node.clone();
        let listener = EventListener::new(node, "click", move |event: &Event| {
            let target = Self::click_target(event).unwrap_or_else(|| current.clone());
            let click = ClickEvent::new(target);
            handler(&click);
            if click.is_default_prevented() {
                event.prevent_default();
            }
        });
        self.listen(listener);
    }

    fn on_document_click(&self, mut handler: ClickHandler<Element>) {
        let root = self.document.document_element();
        let listener = EventListener::new(&self.document, "click", move |event: &Event| {
            let Some(target) = Self::click_target(event).or_else(|| root.clone()) else {
                return;
            };
            let click = ClickEvent::new(target);
            handler(&click);
            if click.is_default_prevented() {
                event.prevent_default();
            }
        });
        self.listen(listener);
    }

    fn on_resize(&self, mut handler: ResizeHandler) {
        let listener = EventListener::new(&self.window, "resize", move |_event: &Event| handler());
        self.listen(listener);
    }

    fn write_clipboard(&self, text: &str, done: ClipboardCallback) {
        let navigator = self.window.navigator();
        // Only exposed in secure contexts
        let available = Reflect::has(&navigator, &JsValue::from_str("clipboard")).unwrap_or(false);
        if !available {
            done(Err(BehaviorError::ClipboardUnavailable(
                "navigator.clipboard is not exposed".into(),
            )));
            return;
        }

        let promise = navigator.clipboard().write_text(text);
        spawn_local(async move {
            let result = JsFuture::from(promise)
                .await
                .map(|_| ())
                .map_err(|err| BehaviorError::ClipboardRejected(format!("{:?}", err)));
            done(result);
        });
    }

    fn set_timeout(&self, delay: Duration, task: TimerTask) {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        Timeout::new(millis, task).forget();
    }

    fn observe_visibility(
        &self,
        threshold: f64,
        targets: &[Element],
        mut on_visible: VisibilityHandler<Element>,
    ) -> BehaviorResult<()> {
        let callback: ObserverCallback =
            Closure::new(move |entries: Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if entry.is_intersecting() {
                        on_visible(&entry.target());
                    }
                }
            });

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(|err| host_error("IntersectionObserver", err))?;
        for target in targets {
            observer.observe(target);
        }

        self.watchers.borrow_mut().push(Watcher {
            observer,
            _callback: callback,
        });
        Ok(())
    }

    fn unobserve_visibility(&self, node: &Element) {
        for watcher in self.watchers.borrow().iter() {
            watcher.observer.unobserve(node);
        }
    }
}

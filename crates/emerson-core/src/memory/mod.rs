//! In-memory [`PageHost`] used by tests and the `emerson simulate` command.
//!
//! `MemoryPage` models just enough of a browser document for the page
//! behaviors: an element tree with classes, attributes, text, inline styles
//! and fixed layout boxes; bubbling clicks; a virtual clock for timers; a
//! clipboard with a configurable outcome; and a visibility watcher driven by
//! [`MemoryPage::set_visibility`].
//!
//! ## Example
//!
//! ```ignore
//! let page = Rc::new(MemoryPage::new(1280.0));
//! let body = page.body();
//! let button = page.append(body, ElementBuilder::new("button").class("copy-btn").text("Copy"));
//! let controller = PageController::install(Rc::clone(&page), BehaviorConfig::default())?;
//! page.click(button);
//! page.advance(Duration::from_secs(2));
//! ```

mod fixture;
mod selector;

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use serde::Serialize;

use crate::error::{BehaviorError, BehaviorResult};
use crate::host::{
    ClickEvent, ClickHandler, ClipboardCallback, PageHost, ResizeHandler, TimerTask,
    VisibilityHandler,
};

pub use fixture::{ClipboardSpec, ElementSpec, PageEvent, PageFixture};
pub use selector::SelectorList;

/// Handle to an element of a [`MemoryPage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Element {
    pub(crate) tag: String,
    pub(crate) id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    style: BTreeMap<String, String>,
    pub(crate) parent: Option<NodeId>,
    children: Vec<NodeId>,
    top: f64,
    height: f64,
    width: Option<f64>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            text: String::new(),
            style: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
            top: 0.0,
            height: 0.0,
            width: None,
        }
    }

    pub(crate) fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub(crate) fn attribute(&self, name: &str) -> Option<String> {
        match name {
            "id" => self.id.clone(),
            "class" if !self.classes.is_empty() => Some(self.classes.join(" ")),
            _ => self.attributes.get(name).cloned(),
        }
    }
}

/// Declarative description of an element to append.
#[derive(Debug, Clone, Default)]
pub struct ElementBuilder {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    top: f64,
    height: f64,
    width: Option<f64>,
}

impl ElementBuilder {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Add one or more space-separated classes.
    pub fn class(mut self, classes: &str) -> Self {
        self.classes
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Document-relative top edge and rendered height.
    pub fn layout(mut self, top: f64, height: f64) -> Self {
        self.top = top;
        self.height = height;
        self
    }

    /// Fixed rendered width; otherwise the width comes from the page's text metrics.
    pub fn width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    fn build(self) -> Element {
        let mut element = Element::new(if self.tag.is_empty() { "div" } else { &self.tag });
        element.id = self.id;
        element.classes = self.classes;
        element.attributes = self.attributes;
        element.text = self.text;
        element.top = self.top;
        element.height = self.height;
        element.width = self.width;
        element
    }
}

/// What the next clipboard write does.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ClipboardOutcome {
    /// Write succeeds immediately
    #[default]
    Grant,
    /// Write is rejected with the given reason
    Deny(String),
    /// No clipboard capability at all
    Unavailable,
    /// Writes stay pending until [`MemoryPage::settle_clipboard`]
    Deferred,
}

struct PendingTimer {
    due: Duration,
    seq: u64,
    task: TimerTask,
}

struct Watcher {
    threshold: f64,
    observed: Vec<NodeId>,
    handler: Rc<RefCell<VisibilityHandler<NodeId>>>,
}

type SharedClickHandler = Rc<RefCell<ClickHandler<NodeId>>>;

/// In-memory document implementing [`PageHost`].
pub struct MemoryPage {
    elements: RefCell<Vec<Element>>,
    styles: RefCell<Vec<String>>,
    text_widths: RefCell<BTreeMap<String, f64>>,
    click_handlers: RefCell<Vec<(NodeId, SharedClickHandler)>>,
    document_handlers: RefCell<Vec<SharedClickHandler>>,
    resize_handlers: RefCell<Vec<Rc<RefCell<ResizeHandler>>>>,
    timers: RefCell<Vec<PendingTimer>>,
    next_timer: Cell<u64>,
    now: Cell<Duration>,
    clipboard_outcome: RefCell<ClipboardOutcome>,
    clipboard: RefCell<Option<String>>,
    pending_writes: RefCell<Vec<(String, ClipboardCallback)>>,
    watchers: RefCell<Vec<Watcher>>,
    viewport_width: Cell<f64>,
    scroll_y: Cell<f64>,
    scroll_requests: RefCell<Vec<f64>>,
    span_budget: Cell<Option<usize>>,
}

impl fmt::Debug for MemoryPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryPage")
            .field("elements", &self.elements.borrow().len())
            .field("now", &self.now.get())
            .field("viewport_width", &self.viewport_width.get())
            .field("scroll_y", &self.scroll_y.get())
            .finish()
    }
}

impl MemoryPage {
    /// Empty document (a lone `body`) with the given viewport width.
    pub fn new(viewport_width: f64) -> Self {
        Self {
            elements: RefCell::new(vec![Element::new("body")]),
            styles: RefCell::new(Vec::new()),
            text_widths: RefCell::new(BTreeMap::new()),
            click_handlers: RefCell::new(Vec::new()),
            document_handlers: RefCell::new(Vec::new()),
            resize_handlers: RefCell::new(Vec::new()),
            timers: RefCell::new(Vec::new()),
            next_timer: Cell::new(0),
            now: Cell::new(Duration::ZERO),
            clipboard_outcome: RefCell::new(ClipboardOutcome::default()),
            clipboard: RefCell::new(None),
            pending_writes: RefCell::new(Vec::new()),
            watchers: RefCell::new(Vec::new()),
            viewport_width: Cell::new(viewport_width),
            scroll_y: Cell::new(0.0),
            scroll_requests: RefCell::new(Vec::new()),
            span_budget: Cell::new(None),
        }
    }

    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    /// Append a new element under `parent`.
    pub fn append(&self, parent: NodeId, builder: ElementBuilder) -> NodeId {
        let mut elements = self.elements.borrow_mut();
        let id = NodeId(elements.len());
        let mut element = builder.build();
        element.parent = Some(parent);
        elements.push(element);
        elements[parent.index()].children.push(id);
        id
    }

    /// Rendered width used for elements without a fixed width, keyed by text.
    pub fn set_text_width(&self, text: impl Into<String>, width: f64) {
        self.text_widths.borrow_mut().insert(text.into(), width);
    }

    pub fn set_scroll_y(&self, scroll_y: f64) {
        self.scroll_y.set(scroll_y);
    }

    /// Let only `budget` more `append_span` calls succeed, the rest fail.
    pub fn limit_spans(&self, budget: usize) {
        self.span_budget.set(Some(budget));
    }

    pub fn set_clipboard_outcome(&self, outcome: ClipboardOutcome) {
        *self.clipboard_outcome.borrow_mut() = outcome;
    }

    /// Text most recently written to the clipboard.
    pub fn clipboard_text(&self) -> Option<String> {
        self.clipboard.borrow().clone()
    }

    /// Resolve deferred clipboard writes. Returns how many were settled.
    pub fn settle_clipboard(&self, grant: bool) -> usize {
        let pending: Vec<_> = self.pending_writes.borrow_mut().drain(..).collect();
        let count = pending.len();
        for (text, done) in pending {
            if grant {
                *self.clipboard.borrow_mut() = Some(text);
                done(Ok(()));
            } else {
                done(Err(BehaviorError::ClipboardRejected(
                    "write denied".to_string(),
                )));
            }
        }
        count
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.borrow().len()
    }

    /// Move the virtual clock forward, running due timers in order.
    pub fn advance(&self, by: Duration) {
        let target = self.now.get() + by;
        loop {
            let next = {
                let mut timers = self.timers.borrow_mut();
                let due = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.due <= target)
                    .min_by_key(|(_, timer)| (timer.due, timer.seq))
                    .map(|(index, _)| index);
                due.map(|index| timers.swap_remove(index))
            };
            let Some(timer) = next else {
                break;
            };
            self.now.set(timer.due);
            (timer.task)();
        }
        self.now.set(target);
    }

    /// Dispatch a click on `node`. Handlers run from the target up through
    /// its ancestors, then on the document. Returns whether any handler
    /// prevented the default action.
    pub fn click(&self, node: NodeId) -> bool {
        let event = ClickEvent::new(node);
        let mut handlers: Vec<SharedClickHandler> = Vec::new();
        {
            let registered = self.click_handlers.borrow();
            for current in self.ancestors_inclusive(node) {
                handlers.extend(
                    registered
                        .iter()
                        .filter(|(target, _)| *target == current)
                        .map(|(_, handler)| Rc::clone(handler)),
                );
            }
        }
        handlers.extend(self.document_handlers.borrow().iter().map(Rc::clone));

        for handler in handlers {
            (&mut *handler.borrow_mut())(&event);
        }
        event.is_default_prevented()
    }

    /// Click the first element matching `selector`.
    pub fn click_selector(&self, selector: &str) -> BehaviorResult<bool> {
        let node = self
            .query(selector)
            .ok_or_else(|| BehaviorError::Fixture(format!("nothing matches '{}'", selector)))?;
        Ok(self.click(node))
    }

    /// Change the viewport width and fire resize handlers.
    pub fn resize(&self, viewport_width: f64) {
        self.viewport_width.set(viewport_width);
        let handlers: Vec<_> = self.resize_handlers.borrow().iter().map(Rc::clone).collect();
        for handler in handlers {
            (&mut *handler.borrow_mut())();
        }
    }

    /// Report that `fraction` of `node` is now on screen.
    pub fn set_visibility(&self, node: NodeId, fraction: f64) {
        let handlers: Vec<_> = self
            .watchers
            .borrow()
            .iter()
            .filter(|watcher| fraction >= watcher.threshold && watcher.observed.contains(&node))
            .map(|watcher| Rc::clone(&watcher.handler))
            .collect();
        for handler in handlers {
            (&mut *handler.borrow_mut())(&node);
        }
    }

    pub fn is_observed(&self, node: NodeId) -> bool {
        self.watchers
            .borrow()
            .iter()
            .any(|watcher| watcher.observed.contains(&node))
    }

    /// Every smooth-scroll destination requested so far.
    pub fn scroll_requests(&self) -> Vec<f64> {
        self.scroll_requests.borrow().clone()
    }

    /// Stylesheets appended to the head.
    pub fn injected_styles(&self) -> Vec<String> {
        self.styles.borrow().clone()
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.elements.borrow()[node.index()].children.clone()
    }

    pub fn inline_style(&self, node: NodeId, property: &str) -> Option<String> {
        self.elements.borrow()[node.index()].style.get(property).cloned()
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.elements.borrow()[node.index()].classes.clone()
    }

    fn ancestors_inclusive(&self, node: NodeId) -> Vec<NodeId> {
        let elements = self.elements.borrow();
        let mut chain = vec![node];
        let mut cursor = elements[node.index()].parent;
        while let Some(parent) = cursor {
            chain.push(parent);
            cursor = elements[parent.index()].parent;
        }
        chain
    }

    /// Attached elements under `root` (exclusive) in document order.
    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let elements = self.elements.borrow();
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = elements[root.index()].children.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(elements[node.index()].children.iter().rev().copied());
        }
        out
    }

    fn parse_selector(selector: &str) -> Option<SelectorList> {
        match SelectorList::parse(selector) {
            Ok(list) => Some(list),
            Err(err) => {
                tracing::warn!(error = %err, "Selector rejected");
                None
            }
        }
    }

    fn select_under(&self, root: NodeId, selector: &str, first_only: bool) -> Vec<NodeId> {
        let Some(list) = Self::parse_selector(selector) else {
            return Vec::new();
        };
        let candidates = self.descendants(root);
        let elements = self.elements.borrow();
        let mut matched = Vec::new();
        for node in candidates {
            if list.matches(&elements, node) {
                matched.push(node);
                if first_only {
                    break;
                }
            }
        }
        matched
    }

    fn text_content(elements: &[Element], node: NodeId) -> String {
        let element = &elements[node.index()];
        let mut text = element.text.clone();
        for child in &element.children {
            text.push_str(&Self::text_content(elements, *child));
        }
        text
    }
}

impl PageHost for MemoryPage {
    type Node = NodeId;

    fn query(&self, selector: &str) -> Option<NodeId> {
        self.select_under(self.body(), selector, true).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.select_under(self.body(), selector, false)
    }

    fn query_within(&self, parent: &NodeId, selector: &str) -> Option<NodeId> {
        self.select_under(*parent, selector, true).into_iter().next()
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let candidates = self.descendants(self.body());
        let elements = self.elements.borrow();
        candidates
            .into_iter()
            .find(|node| elements[node.index()].id.as_deref() == Some(id))
    }

    fn closest(&self, node: &NodeId, selector: &str) -> Option<NodeId> {
        let list = Self::parse_selector(selector)?;
        let chain = self.ancestors_inclusive(*node);
        let elements = self.elements.borrow();
        chain.into_iter().find(|candidate| list.matches(&elements, *candidate))
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.elements.borrow()[node.index()].has_class(class)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        let mut elements = self.elements.borrow_mut();
        let element = &mut elements[node.index()];
        if !element.has_class(class) {
            element.classes.push(class.to_string());
        }
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.elements.borrow_mut()[node.index()]
            .classes
            .retain(|c| c != class);
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.elements.borrow()[node.index()].attribute(name)
    }

    fn text(&self, node: &NodeId) -> String {
        Self::text_content(&self.elements.borrow(), *node)
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        self.clear_children(node);
        self.elements.borrow_mut()[node.index()].text = text.to_string();
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        self.elements.borrow_mut()[node.index()]
            .style
            .insert(property.to_string(), value.to_string());
    }

    fn offset_width(&self, node: &NodeId) -> f64 {
        let elements = self.elements.borrow();
        if let Some(width) = elements[node.index()].width {
            return width;
        }
        let text = Self::text_content(&elements, *node);
        self.text_widths.borrow().get(&text).copied().unwrap_or(0.0)
    }

    fn offset_height(&self, node: &NodeId) -> f64 {
        self.elements.borrow()[node.index()].height
    }

    fn viewport_top(&self, node: &NodeId) -> f64 {
        self.elements.borrow()[node.index()].top - self.scroll_y.get()
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y.get()
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width.get()
    }

    fn smooth_scroll_to(&self, top: f64) {
        self.scroll_requests.borrow_mut().push(top);
        self.scroll_y.set(top.max(0.0));
    }

    fn clear_children(&self, node: &NodeId) {
        let mut elements = self.elements.borrow_mut();
        let children = std::mem::take(&mut elements[node.index()].children);
        for child in children {
            elements[child.index()].parent = None;
        }
        elements[node.index()].text.clear();
    }

    fn append_span(&self, parent: &NodeId, text: &str) -> BehaviorResult<()> {
        match self.span_budget.get() {
            Some(0) => return Err(BehaviorError::Host("span budget exhausted".into())),
            Some(left) => self.span_budget.set(Some(left - 1)),
            None => {}
        }
        self.append(*parent, ElementBuilder::new("span").text(text));
        Ok(())
    }

    fn inject_style(&self, css: &str) -> BehaviorResult<()> {
        self.styles.borrow_mut().push(css.to_string());
        Ok(())
    }

    fn on_click(&self, node: &NodeId, handler: ClickHandler<NodeId>) {
        self.click_handlers
            .borrow_mut()
            .push((*node, Rc::new(RefCell::new(handler))));
    }

    fn on_document_click(&self, handler: ClickHandler<NodeId>) {
        self.document_handlers
            .borrow_mut()
            .push(Rc::new(RefCell::new(handler)));
    }

    fn on_resize(&self, handler: ResizeHandler) {
        self.resize_handlers
            .borrow_mut()
            .push(Rc::new(RefCell::new(handler)));
    }

    fn write_clipboard(&self, text: &str, done: ClipboardCallback) {
        let outcome = self.clipboard_outcome.borrow().clone();
        match outcome {
            ClipboardOutcome::Grant => {
                *self.clipboard.borrow_mut() = Some(text.to_string());
                done(Ok(()));
            }
            ClipboardOutcome::Deny(reason) => done(Err(BehaviorError::ClipboardRejected(reason))),
            ClipboardOutcome::Unavailable => done(Err(BehaviorError::ClipboardUnavailable(
                "no clipboard in this environment".to_string(),
            ))),
            ClipboardOutcome::Deferred => {
                self.pending_writes
                    .borrow_mut()
                    .push((text.to_string(), done));
            }
        }
    }

    fn set_timeout(&self, delay: Duration, task: TimerTask) {
        let seq = self.next_timer.get();
        self.next_timer.set(seq + 1);
        self.timers.borrow_mut().push(PendingTimer {
            due: self.now.get() + delay,
            seq,
            task,
        });
    }

    fn observe_visibility(
        &self,
        threshold: f64,
        targets: &[NodeId],
        on_visible: VisibilityHandler<NodeId>,
    ) -> BehaviorResult<()> {
        self.watchers.borrow_mut().push(Watcher {
            threshold,
            observed: targets.to_vec(),
            handler: Rc::new(RefCell::new(on_visible)),
        });
        Ok(())
    }

    fn unobserve_visibility(&self, node: &NodeId) {
        for watcher in self.watchers.borrow_mut().iter_mut() {
            watcher.observed.retain(|observed| observed != node);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> (MemoryPage, NodeId, NodeId) {
        let page = MemoryPage::new(1000.0);
        let header = page.append(page.body(), ElementBuilder::new("header").class("header"));
        let link = page.append(
            header,
            ElementBuilder::new("a").class("nav-link").attr("href", "#pricing").text("Pricing"),
        );
        (page, header, link)
    }

    #[test]
    fn test_query_matches_document_order() {
        let (page, header, link) = page();
        assert_eq!(page.query(".header"), Some(header));
        assert_eq!(page.query("a[href^=\"#\"]"), Some(link));
        assert_eq!(page.query_all("header, a"), vec![header, link]);
        assert_eq!(page.query(".missing"), None);
    }

    #[test]
    fn test_descendant_selector_and_closest() {
        let (page, header, link) = page();
        assert_eq!(page.query(".header a"), Some(link));
        assert_eq!(page.closest(&link, ".header"), Some(header));
        assert_eq!(page.closest(&header, ".nav-link"), None);
    }

    #[test]
    fn test_invalid_selector_matches_nothing() {
        let (page, _, _) = page();
        assert!(page.query_all("a > b").is_empty());
    }

    #[test]
    fn test_text_content_and_set_text() {
        let (page, header, link) = page();
        assert_eq!(page.text(&header), "Pricing");
        page.set_text(&link, "Plans");
        assert_eq!(page.text(&header), "Plans");
        page.set_text(&header, "Title");
        assert!(page.children(header).is_empty());
        assert_eq!(page.query(".nav-link"), None);
    }

    #[test]
    fn test_click_bubbles_then_document() {
        let (page, header, link) = page();
        let order = Rc::new(RefCell::new(Vec::new()));

        let log = Rc::clone(&order);
        page.on_document_click(Box::new(move |_event: &ClickEvent<NodeId>| {
            log.borrow_mut().push("document")
        }));
        let log = Rc::clone(&order);
        page.on_click(
            &header,
            Box::new(move |_event: &ClickEvent<NodeId>| log.borrow_mut().push("header")),
        );
        let log = Rc::clone(&order);
        page.on_click(
            &link,
            Box::new(move |event: &ClickEvent<NodeId>| {
                event.prevent_default();
                log.borrow_mut().push("link")
            }),
        );

        assert!(page.click(link));
        assert_eq!(*order.borrow(), vec!["link", "header", "document"]);
    }

    #[test]
    fn test_timers_run_in_due_order() {
        let page = MemoryPage::new(1000.0);
        let fired = Rc::new(RefCell::new(Vec::new()));
        for (delay, name) in [(300, "late"), (100, "early"), (100, "early-2")] {
            let fired = Rc::clone(&fired);
            page.set_timeout(
                Duration::from_millis(delay),
                Box::new(move || fired.borrow_mut().push(name)),
            );
        }

        page.advance(Duration::from_millis(99));
        assert!(fired.borrow().is_empty());
        page.advance(Duration::from_millis(1));
        assert_eq!(*fired.borrow(), vec!["early", "early-2"]);
        page.advance(Duration::from_secs(1));
        assert_eq!(*fired.borrow(), vec!["early", "early-2", "late"]);
        assert_eq!(page.now(), Duration::from_millis(1100));
        assert_eq!(page.pending_timers(), 0);
    }

    #[test]
    fn test_offset_width_uses_text_metrics() {
        let page = MemoryPage::new(1000.0);
        let span = page.append(page.body(), ElementBuilder::new("span").text("GET EMERSON"));
        let fixed = page.append(page.body(), ElementBuilder::new("span").width(42.0));
        assert_eq!(page.offset_width(&span), 0.0);
        page.set_text_width("GET EMERSON", 150.0);
        assert_eq!(page.offset_width(&span), 150.0);
        assert_eq!(page.offset_width(&fixed), 42.0);
    }

    #[test]
    fn test_deferred_clipboard() {
        let page = MemoryPage::new(1000.0);
        page.set_clipboard_outcome(ClipboardOutcome::Deferred);
        let result = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&result);
        page.write_clipboard(
            "0xABC",
            Box::new(move |outcome: BehaviorResult<()>| *slot.borrow_mut() = Some(outcome.is_ok())),
        );
        assert_eq!(*result.borrow(), None);
        assert_eq!(page.settle_clipboard(true), 1);
        assert_eq!(*result.borrow(), Some(true));
        assert_eq!(page.clipboard_text().as_deref(), Some("0xABC"));
    }
}

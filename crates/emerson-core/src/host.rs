//! The seam between page behaviors and the platform that runs them.
//!
//! ```text
//! ┌──────────────────────┐        ┌──────────────────────────────┐
//! │  PageController      │        │  PageHost                    │
//! │  ├── NavMenu         │ ─────▶ │  ├── WebPage   (web-sys)     │
//! │  ├── anchors         │        │  └── MemoryPage (in-memory)  │
//! │  ├── Accordion       │        └──────────────────────────────┘
//! │  ├── CopyButton      │
//! │  ├── reveal          │
//! │  └── Marquee         │
//! └──────────────────────┘
//! ```
//!
//! Hosts are single-threaded. Behaviors hold the host in an `Rc` and capture
//! clones of it in the handlers they register.

use std::cell::Cell;
use std::fmt;
use std::time::Duration;

use crate::error::BehaviorResult;

/// Handler for click events on an element or on the document.
pub type ClickHandler<N> = Box<dyn FnMut(&ClickEvent<N>)>;

/// Handler for viewport resize events.
pub type ResizeHandler = Box<dyn FnMut()>;

/// Continuation of an asynchronous clipboard write.
pub type ClipboardCallback = Box<dyn FnOnce(BehaviorResult<()>)>;

/// One-shot timer body.
pub type TimerTask = Box<dyn FnOnce()>;

/// Called with each watched element that reached the visibility threshold.
pub type VisibilityHandler<N> = Box<dyn FnMut(&N)>;

/// A click as seen by behavior code.
#[derive(Debug)]
pub struct ClickEvent<N> {
    target: N,
    default_prevented: Cell<bool>,
}

impl<N> ClickEvent<N> {
    pub fn new(target: N) -> Self {
        Self {
            target,
            default_prevented: Cell::new(false),
        }
    }

    /// The element the click originated on.
    pub fn target(&self) -> &N {
        &self.target
    }

    /// Suppress the platform's default action (e.g. following a link).
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// Document access required by the page behaviors.
///
/// Queries take CSS selectors. Invalid selectors behave like selectors that
/// match nothing.
pub trait PageHost: 'static {
    /// Handle to an element.
    type Node: Clone + PartialEq + fmt::Debug + 'static;

    // --- Queries ---

    /// First element in document order matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Node>;

    /// All elements in document order matching `selector`.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    /// First descendant of `parent` matching `selector`.
    fn query_within(&self, parent: &Self::Node, selector: &str) -> Option<Self::Node>;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// Nearest inclusive ancestor of `node` matching `selector`.
    fn closest(&self, node: &Self::Node, selector: &str) -> Option<Self::Node>;

    // --- Markers, attributes and text ---

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);

    /// Flip `class` and return whether it is now present.
    fn toggle_class(&self, node: &Self::Node, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn text(&self, node: &Self::Node) -> String;
    fn set_text(&self, node: &Self::Node, text: &str);

    /// Set an inline style property.
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    // --- Layout ---

    /// Rendered width in CSS pixels.
    fn offset_width(&self, node: &Self::Node) -> f64;

    /// Rendered height in CSS pixels.
    fn offset_height(&self, node: &Self::Node) -> f64;

    /// Top edge relative to the viewport.
    fn viewport_top(&self, node: &Self::Node) -> f64;

    /// Current vertical scroll position of the document.
    fn scroll_y(&self) -> f64;

    fn viewport_width(&self) -> f64;

    /// Animated scroll to an absolute document offset.
    fn smooth_scroll_to(&self, top: f64);

    // --- Content ---

    fn clear_children(&self, node: &Self::Node);

    /// Append a `<span>` holding `text` to `parent`.
    fn append_span(&self, parent: &Self::Node, text: &str) -> BehaviorResult<()>;

    /// Append a stylesheet to the document head.
    fn inject_style(&self, css: &str) -> BehaviorResult<()>;

    // --- Events ---

    fn on_click(&self, node: &Self::Node, handler: ClickHandler<Self::Node>);

    /// Click handler on the document, run after element handlers.
    fn on_document_click(&self, handler: ClickHandler<Self::Node>);

    fn on_resize(&self, handler: ResizeHandler);

    // --- Platform services ---

    /// Start writing `text` to the system clipboard; `done` runs when the
    /// write settles.
    fn write_clipboard(&self, text: &str, done: ClipboardCallback);

    /// Run `task` once after `delay`. Not cancellable.
    fn set_timeout(&self, delay: Duration, task: TimerTask);

    /// Watch `targets` and call `on_visible` for each one whose visible
    /// fraction reaches `threshold`.
    fn observe_visibility(
        &self,
        threshold: f64,
        targets: &[Self::Node],
        on_visible: VisibilityHandler<Self::Node>,
    ) -> BehaviorResult<()>;

    /// Stop watching `node`.
    fn unobserve_visibility(&self, node: &Self::Node);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_event_prevent_default_latches() {
        let event = ClickEvent::new(7usize);
        assert!(!event.is_default_prevented());
        event.prevent_default();
        event.prevent_default();
        assert!(event.is_default_prevented());
        assert_eq!(*event.target(), 7);
    }
}

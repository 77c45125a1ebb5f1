//! JSON page fixtures for [`MemoryPage`].
//!
//! ```json
//! {
//!   "viewport_width": 1000,
//!   "text_widths": { "GET EMERSON\u00a0": 150 },
//!   "body": [
//!     { "tag": "header", "class": "header", "height": 80, "children": [
//!       { "tag": "button", "class": "menu-toggle" },
//!       { "tag": "ul", "class": "nav-links" }
//!     ]},
//!     { "tag": "section", "id": "pricing", "top": 2400 }
//!   ],
//!   "events": [
//!     { "type": "click", "selector": ".menu-toggle" },
//!     { "type": "advance", "ms": 2000 }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{BehaviorError, BehaviorResult};
use crate::host::PageHost;

use super::{ClipboardOutcome, ElementBuilder, MemoryPage, NodeId};

fn default_tag() -> String {
    "div".to_string()
}

fn default_viewport() -> f64 {
    1280.0
}

/// One element and its subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementSpec {
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
    /// Space-separated class list
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    #[serde(default)]
    pub text: String,
    /// Document-relative top edge
    #[serde(default)]
    pub top: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    fn builder(&self) -> ElementBuilder {
        let mut builder = ElementBuilder::new(&self.tag)
            .text(&self.text)
            .layout(self.top, self.height);
        if let Some(id) = &self.id {
            builder = builder.id(id);
        }
        if let Some(class) = &self.class {
            builder = builder.class(class);
        }
        if let Some(width) = self.width {
            builder = builder.width(width);
        }
        for (name, value) in &self.attrs {
            builder = builder.attr(name, value);
        }
        builder
    }

    fn append_to(&self, page: &MemoryPage, parent: NodeId) {
        let node = page.append(parent, self.builder());
        for child in &self.children {
            child.append_to(page, node);
        }
    }
}

/// Clipboard behavior of a fixture page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipboardSpec {
    #[default]
    Grant,
    Deny,
    Unavailable,
    Deferred,
}

impl From<ClipboardSpec> for ClipboardOutcome {
    fn from(spec: ClipboardSpec) -> Self {
        match spec {
            ClipboardSpec::Grant => ClipboardOutcome::Grant,
            ClipboardSpec::Deny => ClipboardOutcome::Deny("NotAllowedError".to_string()),
            ClipboardSpec::Unavailable => ClipboardOutcome::Unavailable,
            ClipboardSpec::Deferred => ClipboardOutcome::Deferred,
        }
    }
}

/// A scripted interaction replayed against the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    /// Click the `index`-th element matching `selector`
    Click {
        selector: String,
        #[serde(default)]
        index: usize,
    },
    /// Resize the viewport
    Resize { width: f64 },
    /// Advance the virtual clock
    Advance { ms: u64 },
    /// Report a visible fraction for every element matching `selector`
    Visibility { selector: String, fraction: f64 },
    /// Settle pending (deferred) clipboard writes
    Clipboard { grant: bool },
    /// Jump the document scroll position
    Scroll { y: f64 },
}

impl PageEvent {
    pub fn apply(&self, page: &MemoryPage) -> BehaviorResult<()> {
        match self {
            PageEvent::Click { selector, index } => {
                let node = page
                    .query_all(selector)
                    .get(*index)
                    .copied()
                    .ok_or_else(|| {
                        BehaviorError::Fixture(format!(
                            "click: no element {} for '{}'",
                            index, selector
                        ))
                    })?;
                page.click(node);
            }
            PageEvent::Resize { width } => page.resize(*width),
            PageEvent::Advance { ms } => page.advance(Duration::from_millis(*ms)),
            PageEvent::Visibility { selector, fraction } => {
                for node in page.query_all(selector) {
                    page.set_visibility(node, *fraction);
                }
            }
            PageEvent::Clipboard { grant } => {
                page.settle_clipboard(*grant);
            }
            PageEvent::Scroll { y } => page.set_scroll_y(*y),
        }
        Ok(())
    }
}

/// A page description plus the interactions to replay on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFixture {
    #[serde(default = "default_viewport")]
    pub viewport_width: f64,
    #[serde(default)]
    pub scroll_y: f64,
    /// Rendered widths of text runs, keyed by text
    #[serde(default)]
    pub text_widths: BTreeMap<String, f64>,
    #[serde(default)]
    pub clipboard: ClipboardSpec,
    #[serde(default)]
    pub body: Vec<ElementSpec>,
    #[serde(default)]
    pub events: Vec<PageEvent>,
}

impl PageFixture {
    pub fn from_json(json: &str) -> BehaviorResult<Self> {
        let fixture: Self = serde_json::from_str(json)?;
        if !(fixture.viewport_width.is_finite() && fixture.viewport_width >= 0.0) {
            return Err(BehaviorError::Fixture(format!(
                "viewport_width must be a non-negative number, got {}",
                fixture.viewport_width
            )));
        }
        Ok(fixture)
    }

    pub fn load(path: impl AsRef<Path>) -> BehaviorResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Build the page described by the fixture (events are not applied).
    pub fn build(&self) -> Rc<MemoryPage> {
        let page = MemoryPage::new(self.viewport_width);
        page.set_scroll_y(self.scroll_y);
        page.set_clipboard_outcome(self.clipboard.into());
        for (text, width) in &self.text_widths {
            page.set_text_width(text.clone(), *width);
        }
        for element in &self.body {
            element.append_to(&page, page.body());
        }
        Rc::new(page)
    }

    /// Replay every scripted event in order.
    pub fn replay(&self, page: &MemoryPage) -> BehaviorResult<usize> {
        for event in &self.events {
            tracing::debug!(?event, "Replaying event");
            event.apply(page)?;
        }
        Ok(self.events.len())
    }
}

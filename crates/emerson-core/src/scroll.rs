//! Smooth scrolling for in-page anchors
//!
//! Every `#fragment` link is intercepted. The menu is closed first, then the
//! fragment is resolved and the page scrolls so the target sits just below
//! the fixed header.

use std::rc::Rc;

use crate::config::{NavConfig, ScrollConfig};
use crate::controller::RoutineStatus;
use crate::host::{ClickEvent, PageHost};
use crate::nav::NavMenu;

/// Parsed `href` of an in-page link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fragment<'a> {
    /// Bare `#`: the link is a placeholder
    Root,
    /// `#id`
    Id(&'a str),
}

impl<'a> Fragment<'a> {
    /// Parse an `href`. Returns `None` for anything that is not a fragment.
    pub fn parse(href: &'a str) -> Option<Self> {
        let id = href.strip_prefix('#')?;
        if id.is_empty() {
            Some(Fragment::Root)
        } else {
            Some(Fragment::Id(id))
        }
    }
}

/// Document offset that puts a target just below the fixed header.
///
/// `target_viewport_top` is the target's top relative to the viewport, so the
/// current scroll position is added back to get its document position.
pub fn scroll_offset(
    target_viewport_top: f64,
    scroll_y: f64,
    header_height: f64,
    buffer: f64,
) -> f64 {
    target_viewport_top + scroll_y - header_height - buffer
}

/// Resolves fragment targets and computes where to scroll.
pub struct AnchorScroller<H: PageHost> {
    host: Rc<H>,
    header: Option<H::Node>,
    buffer: f64,
}

impl<H: PageHost> AnchorScroller<H> {
    pub fn new(host: Rc<H>, header: Option<H::Node>, buffer: f64) -> Self {
        Self {
            host,
            header,
            buffer,
        }
    }

    fn header_height(&self) -> f64 {
        self.header
            .as_ref()
            .map(|header| self.host.offset_height(header))
            .unwrap_or(0.0)
    }

    /// Where `href` should scroll to, or `None` if it names nothing.
    pub fn destination(&self, href: &str) -> Option<f64> {
        let Fragment::Id(id) = Fragment::parse(href)? else {
            return None;
        };
        let Some(target) = self.host.element_by_id(id) else {
            tracing::debug!(id, "Anchor target not found");
            return None;
        };
        Some(scroll_offset(
            self.host.viewport_top(&target),
            self.host.scroll_y(),
            self.header_height(),
            self.buffer,
        ))
    }

    /// Handle activation of a link with `href`.
    pub fn follow(&self, href: &str) -> Option<f64> {
        let top = self.destination(href)?;
        tracing::trace!(href, top, "Smooth scrolling to anchor");
        self.host.smooth_scroll_to(top);
        Some(top)
    }
}

/// Intercept every in-page link.
pub(crate) fn wire_anchors<H: PageHost>(
    host: &Rc<H>,
    scroll: &ScrollConfig,
    nav: &NavConfig,
    menu: Option<&Rc<NavMenu<H>>>,
) -> RoutineStatus {
    let anchors = host.query_all(&scroll.anchor_selector);
    if anchors.is_empty() {
        return RoutineStatus::missing(&scroll.anchor_selector);
    }

    let scroller = Rc::new(AnchorScroller::new(
        Rc::clone(host),
        host.query(&nav.header_selector),
        scroll.buffer_px,
    ));

    for anchor in &anchors {
        let Some(href) = host.attribute(anchor, "href") else {
            continue;
        };
        let scroller = Rc::clone(&scroller);
        let menu = menu.map(Rc::clone);
        host.on_click(
            anchor,
            Box::new(move |event: &ClickEvent<H::Node>| {
                event.prevent_default();
                if let Some(menu) = &menu {
                    menu.close();
                }
                scroller.follow(&href);
            }),
        );
    }
    RoutineStatus::enabled(anchors.len())
}

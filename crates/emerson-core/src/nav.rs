//! Mobile navigation menu
//!
//! The menu is open while the links panel carries the open marker
//! (`show` by default). The toggle flips it; any click that lands outside
//! the header closes it.

use std::fmt;
use std::rc::Rc;

use crate::config::NavConfig;
use crate::controller::RoutineStatus;
use crate::host::{ClickEvent, PageHost};

/// Visibility of the mobile navigation panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    Open,
    #[default]
    Closed,
}

impl MenuState {
    pub fn from_open(open: bool) -> Self {
        if open {
            MenuState::Open
        } else {
            MenuState::Closed
        }
    }

    pub fn is_open(self) -> bool {
        self == MenuState::Open
    }

    pub fn toggled(self) -> Self {
        match self {
            MenuState::Open => MenuState::Closed,
            MenuState::Closed => MenuState::Open,
        }
    }
}

impl fmt::Display for MenuState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuState::Open => write!(f, "open"),
            MenuState::Closed => write!(f, "closed"),
        }
    }
}

/// The navigation links panel, held for the page's lifetime.
pub struct NavMenu<H: PageHost> {
    host: Rc<H>,
    links: H::Node,
    open_class: String,
}

impl<H: PageHost> NavMenu<H> {
    pub fn new(host: Rc<H>, links: H::Node, open_class: impl Into<String>) -> Self {
        Self {
            host,
            links,
            open_class: open_class.into(),
        }
    }

    /// Acquire the links panel, if the page has one.
    pub fn acquire(host: &Rc<H>, config: &NavConfig) -> Option<Self> {
        let links = host.query(&config.links_selector)?;
        Some(Self::new(Rc::clone(host), links, config.open_class.clone()))
    }

    pub fn state(&self) -> MenuState {
        MenuState::from_open(self.host.has_class(&self.links, &self.open_class))
    }

    /// Flip the menu and return the new state.
    pub fn toggle(&self) -> MenuState {
        let open = self.host.toggle_class(&self.links, &self.open_class);
        let state = MenuState::from_open(open);
        tracing::trace!(%state, "Menu toggled");
        state
    }

    /// Close the menu. Returns `true` if it was open.
    pub fn close(&self) -> bool {
        if !self.state().is_open() {
            return false;
        }
        self.host.remove_class(&self.links, &self.open_class);
        tracing::trace!("Menu closed");
        true
    }
}

/// Wire the toggle control to flip the menu.
pub(crate) fn wire_toggle<H: PageHost>(
    host: &Rc<H>,
    config: &NavConfig,
    menu: Option<&Rc<NavMenu<H>>>,
) -> RoutineStatus {
    let Some(toggle) = host.query(&config.toggle_selector) else {
        return RoutineStatus::missing(&config.toggle_selector);
    };
    let Some(menu) = menu else {
        return RoutineStatus::missing(&config.links_selector);
    };

    let menu = Rc::clone(menu);
    host.on_click(
        &toggle,
        Box::new(move |_event: &ClickEvent<H::Node>| {
            menu.toggle();
        }),
    );
    RoutineStatus::enabled(1)
}

/// Close the menu on any click outside the header.
pub(crate) fn wire_outside_dismissal<H: PageHost>(
    host: &Rc<H>,
    config: &NavConfig,
    menu: Option<&Rc<NavMenu<H>>>,
) -> RoutineStatus {
    let Some(menu) = menu else {
        return RoutineStatus::missing(&config.links_selector);
    };
    if host.query(&config.header_selector).is_none() {
        return RoutineStatus::missing(&config.header_selector);
    }

    let menu = Rc::clone(menu);
    let header_selector = config.header_selector.clone();
    let page = Rc::clone(host);
    host.on_document_click(Box::new(move |event: &ClickEvent<H::Node>| {
        if page.closest(event.target(), &header_selector).is_none() {
            menu.close();
        }
    }));
    RoutineStatus::enabled(1)
}

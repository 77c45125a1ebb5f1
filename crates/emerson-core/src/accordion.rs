//! Accordion with at most one open panel

use std::rc::Rc;

use crate::config::AccordionConfig;
use crate::controller::RoutineStatus;
use crate::host::{ClickEvent, PageHost};

/// Single-choice selection over the widgets discovered at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccordionSelection {
    active: Option<usize>,
}

impl AccordionSelection {
    pub fn none() -> Self {
        Self { active: None }
    }

    pub fn only(index: usize) -> Self {
        Self {
            active: Some(index),
        }
    }

    pub fn active(self) -> Option<usize> {
        self.active
    }

    pub fn is_active(self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Transition for a click on widget `clicked`: the open panel closes,
    /// any other panel becomes the only open one.
    #[must_use]
    pub fn select(self, clicked: usize) -> Self {
        if self.is_active(clicked) {
            Self::none()
        } else {
            Self::only(clicked)
        }
    }
}

/// The accordion widgets, held for the page's lifetime.
pub struct Accordion<H: PageHost> {
    host: Rc<H>,
    widgets: Vec<H::Node>,
    active_class: String,
}

impl<H: PageHost> Accordion<H> {
    pub fn new(host: Rc<H>, widgets: Vec<H::Node>, active_class: impl Into<String>) -> Self {
        Self {
            host,
            widgets,
            active_class: active_class.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Indices of widgets currently carrying the active marker.
    pub fn active_indices(&self) -> Vec<usize> {
        self.widgets
            .iter()
            .enumerate()
            .filter(|(_, widget)| self.host.has_class(widget, &self.active_class))
            .map(|(index, _)| index)
            .collect()
    }

    /// Apply a header click on widget `index` and return the new selection.
    ///
    /// Only the clicked widget's marker decides the transition; every other
    /// widget is cleared unconditionally.
    pub fn click(&self, index: usize) -> AccordionSelection {
        let Some(clicked) = self.widgets.get(index) else {
            return AccordionSelection::none();
        };
        let prior = if self.host.has_class(clicked, &self.active_class) {
            AccordionSelection::only(index)
        } else {
            AccordionSelection::none()
        };
        let next = prior.select(index);

        for widget in &self.widgets {
            self.host.remove_class(widget, &self.active_class);
        }
        if let Some(active) = next.active() {
            self.host.add_class(&self.widgets[active], &self.active_class);
        }
        tracing::trace!(index, active = ?next.active(), "Accordion clicked");
        next
    }
}

/// Wire every accordion header.
///
/// Widgets without a header stay in the set so that opening another panel
/// still closes them.
pub(crate) fn wire_accordion<H: PageHost>(
    host: &Rc<H>,
    config: &AccordionConfig,
) -> (RoutineStatus, Option<Rc<Accordion<H>>>) {
    let widgets = host.query_all(&config.widget_selector);
    if widgets.is_empty() {
        return (RoutineStatus::missing(&config.widget_selector), None);
    }

    let accordion = Rc::new(Accordion::new(
        Rc::clone(host),
        widgets.clone(),
        config.active_class.clone(),
    ));

    let mut bound = 0;
    for (index, widget) in widgets.iter().enumerate() {
        let Some(header) = host.query_within(widget, &config.header_selector) else {
            tracing::debug!(index, "Accordion widget has no header");
            continue;
        };
        let accordion = Rc::clone(&accordion);
        host.on_click(
            &header,
            Box::new(move |_event: &ClickEvent<H::Node>| {
                accordion.click(index);
            }),
        );
        bound += 1;
    }
    (RoutineStatus::enabled(bound), Some(accordion))
}

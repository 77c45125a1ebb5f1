//! Contract-address copy button
//!
//! A successful clipboard write swaps the button label for a confirmation
//! and schedules a restore. With [`CopyRestorePolicy::Stacked`] each click
//! restores the label it saw, so a second click inside the window leaves
//! the confirmation showing until its own timer fires.
//! [`CopyRestorePolicy::Restart`] lets the newest click win instead.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::config::{CopyConfig, CopyRestorePolicy};
use crate::controller::RoutineStatus;
use crate::error::BehaviorResult;
use crate::host::{ClickEvent, PageHost};

/// A pending label restore
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreTicket {
    generation: u64,
    label: String,
}

impl RestoreTicket {
    /// Label this ticket would put back.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Bookkeeping for the transient confirmation label.
#[derive(Debug, Clone, Default)]
pub struct CopyFeedback {
    policy: CopyRestorePolicy,
    generation: u64,
    // Label to come back to once the current burst ends (Restart only)
    restore_to: Option<String>,
}

impl CopyFeedback {
    pub fn new(policy: CopyRestorePolicy) -> Self {
        Self {
            policy,
            generation: 0,
            restore_to: None,
        }
    }

    pub fn policy(&self) -> CopyRestorePolicy {
        self.policy
    }

    /// Record a successful copy while `current_label` is displayed.
    pub fn begin(&mut self, current_label: &str) -> RestoreTicket {
        self.generation += 1;
        let label = match self.policy {
            CopyRestorePolicy::Stacked => current_label.to_string(),
            CopyRestorePolicy::Restart => self
                .restore_to
                .get_or_insert_with(|| current_label.to_string())
                .clone(),
        };
        RestoreTicket {
            generation: self.generation,
            label,
        }
    }

    /// A ticket's timer fired. Returns the label to display, or `None` if a
    /// later click superseded it.
    pub fn finish(&mut self, ticket: RestoreTicket) -> Option<String> {
        match self.policy {
            CopyRestorePolicy::Stacked => Some(ticket.label),
            CopyRestorePolicy::Restart => {
                if ticket.generation != self.generation {
                    return None;
                }
                self.restore_to = None;
                Some(ticket.label)
            }
        }
    }
}

/// The copy button and its address source, held for the page's lifetime.
pub struct CopyButton<H: PageHost> {
    host: Rc<H>,
    button: H::Node,
    source: H::Node,
    confirmation: String,
    restore_after: Duration,
    feedback: Rc<RefCell<CopyFeedback>>,
}

impl<H: PageHost> CopyButton<H> {
    pub fn new(host: Rc<H>, button: H::Node, source: H::Node, config: &CopyConfig) -> Self {
        Self {
            host,
            button,
            source,
            confirmation: config.confirmation.clone(),
            restore_after: config.restore_after(),
            feedback: Rc::new(RefCell::new(CopyFeedback::new(config.restore_policy))),
        }
    }

    /// Currently displayed button label.
    pub fn label(&self) -> String {
        self.host.text(&self.button)
    }

    /// Start copying the address text.
    pub fn copy(self: &Rc<Self>) {
        let address = self.host.text(&self.source);
        let this = Rc::clone(self);
        self.host.write_clipboard(
            &address,
            Box::new(move |result: BehaviorResult<()>| match result {
                Ok(()) => this.confirm(),
                Err(err) => tracing::error!(error = %err, "Failed to copy"),
            }),
        );
    }

    fn confirm(self: &Rc<Self>) {
        let current = self.host.text(&self.button);
        self.host.set_text(&self.button, &self.confirmation);
        let ticket = self.feedback.borrow_mut().begin(&current);
        tracing::debug!(restore_to = ticket.label(), "Address copied");

        let this = Rc::clone(self);
        self.host.set_timeout(
            self.restore_after,
            Box::new(move || {
                let restored = this.feedback.borrow_mut().finish(ticket);
                if let Some(label) = restored {
                    this.host.set_text(&this.button, &label);
                }
            }),
        );
    }
}

/// Wire the copy button to the address element.
pub(crate) fn wire_copy<H: PageHost>(
    host: &Rc<H>,
    config: &CopyConfig,
) -> (RoutineStatus, Option<Rc<CopyButton<H>>>) {
    let Some(button) = host.query(&config.button_selector) else {
        return (RoutineStatus::missing(&config.button_selector), None);
    };
    let Some(source) = host.query(&config.source_selector) else {
        return (RoutineStatus::missing(&config.source_selector), None);
    };

    let copy = Rc::new(CopyButton::new(Rc::clone(host), button.clone(), source, config));
    let handler_copy = Rc::clone(&copy);
    host.on_click(
        &button,
        Box::new(move |_event: &ClickEvent<H::Node>| {
            handler_copy.copy();
        }),
    );
    (RoutineStatus::enabled(1), Some(copy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stacked_restores_what_each_click_saw() {
        let mut feedback = CopyFeedback::new(CopyRestorePolicy::Stacked);
        let first = feedback.begin("Copy");
        let second = feedback.begin("Copied!");

        assert_eq!(feedback.finish(first), Some("Copy".to_string()));
        assert_eq!(feedback.finish(second), Some("Copied!".to_string()));
    }

    #[test]
    fn test_restart_only_latest_ticket_restores() {
        let mut feedback = CopyFeedback::new(CopyRestorePolicy::Restart);
        let first = feedback.begin("Copy");
        let second = feedback.begin("Copied!");
        assert_eq!(second.label(), "Copy");

        assert_eq!(feedback.finish(first), None);
        assert_eq!(feedback.finish(second), Some("Copy".to_string()));
    }

    #[test]
    fn test_restart_forgets_label_after_burst() {
        let mut feedback = CopyFeedback::new(CopyRestorePolicy::Restart);
        let ticket = feedback.begin("Copy");
        assert_eq!(feedback.finish(ticket), Some("Copy".to_string()));

        // The page changed the label in between
        let ticket = feedback.begin("Copy address");
        assert_eq!(feedback.finish(ticket), Some("Copy address".to_string()));
    }

    #[test]
    fn test_default_policy_is_stacked() {
        assert_eq!(CopyFeedback::default().policy(), CopyRestorePolicy::Stacked);
    }
}

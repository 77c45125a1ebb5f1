//! Page behavior controller
//!
//! Installs every routine once, after the document structure exists. Each
//! routine acquires its elements at install time and keeps them; a routine
//! whose elements are missing is skipped without affecting the others.
//!
//! ## Overview
//!
//! ```text
//! install(host, config)
//! ├── 1. nav toggle           .menu-toggle ─▶ .nav-links.show
//! ├── 2. outside dismissal    document click outside .header ─▶ close
//! ├── 3. anchor scrolling     a[href^="#"] ─▶ smooth scroll
//! ├── 4. accordion            .accordion-header ─▶ single .active
//! ├── 5. clipboard copy       .copy-btn ─▶ clipboard, "Copied!" for 2s
//! ├── 6a. reveal              cards ─▶ .animate-on-scroll ─▶ .visible
//! └── 6b. marquee             .marquee-content spans, refilled on resize
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::Serialize;

use crate::accordion::{wire_accordion, Accordion};
use crate::config::BehaviorConfig;
use crate::copy::{wire_copy, CopyButton};
use crate::error::BehaviorResult;
use crate::host::PageHost;
use crate::marquee::{wire_marquee, Marquee};
use crate::nav::{wire_outside_dismissal, wire_toggle, MenuState, NavMenu};
use crate::reveal::{wire_reveal, RevealSet};
use crate::scroll::wire_anchors;
use crate::style::animation_stylesheet;

/// The independent setup routines, in install order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Routine {
    NavToggle,
    OutsideDismissal,
    AnchorScroll,
    Accordion,
    ClipboardCopy,
    Reveal,
    Marquee,
}

impl fmt::Display for Routine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Routine::NavToggle => write!(f, "nav toggle"),
            Routine::OutsideDismissal => write!(f, "outside dismissal"),
            Routine::AnchorScroll => write!(f, "anchor scroll"),
            Routine::Accordion => write!(f, "accordion"),
            Routine::ClipboardCopy => write!(f, "clipboard copy"),
            Routine::Reveal => write!(f, "reveal"),
            Routine::Marquee => write!(f, "marquee"),
        }
    }
}

/// Outcome of installing one routine
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RoutineStatus {
    /// Handlers bound to `bound` elements
    Enabled { bound: usize },
    /// A required element was absent
    Skipped { missing: String },
    /// The host refused a capability the routine needs
    Failed { reason: String },
}

impl RoutineStatus {
    pub fn enabled(bound: usize) -> Self {
        RoutineStatus::Enabled { bound }
    }

    pub fn missing(selector: &str) -> Self {
        RoutineStatus::Skipped {
            missing: selector.to_string(),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        RoutineStatus::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, RoutineStatus::Enabled { .. })
    }
}

/// Which routines ended up active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InstallReport {
    pub routines: Vec<(Routine, RoutineStatus)>,
    pub styles_injected: bool,
}

impl InstallReport {
    fn record(&mut self, routine: Routine, status: RoutineStatus) {
        match &status {
            RoutineStatus::Enabled { bound } => {
                tracing::debug!(%routine, bound, "Routine enabled");
            }
            RoutineStatus::Skipped { missing } => {
                tracing::debug!(%routine, missing = %missing, "Routine skipped");
            }
            RoutineStatus::Failed { reason } => {
                tracing::warn!(%routine, reason = %reason, "Routine failed to install");
            }
        }
        self.routines.push((routine, status));
    }

    pub fn status(&self, routine: Routine) -> Option<&RoutineStatus> {
        self.routines
            .iter()
            .find(|(r, _)| *r == routine)
            .map(|(_, status)| status)
    }

    pub fn is_enabled(&self, routine: Routine) -> bool {
        self.status(routine).is_some_and(RoutineStatus::is_enabled)
    }

    pub fn enabled_count(&self) -> usize {
        self.routines
            .iter()
            .filter(|(_, status)| status.is_enabled())
            .count()
    }
}

/// Point-in-time view of the behavior state, for diagnostics and the CLI.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllerSnapshot {
    pub menu_open: Option<bool>,
    pub active_accordions: Vec<usize>,
    pub copy_label: Option<String>,
    pub revealed: usize,
    pub pending_reveal: usize,
    pub marquee_spans: Option<usize>,
}

/// Owns the installed routines for the page's lifetime.
pub struct PageController<H: PageHost> {
    host: Rc<H>,
    config: BehaviorConfig,
    report: InstallReport,
    menu: Option<Rc<NavMenu<H>>>,
    accordion: Option<Rc<Accordion<H>>>,
    copy: Option<Rc<CopyButton<H>>>,
    reveal: Option<Rc<RefCell<RevealSet<H::Node>>>>,
    marquee: Option<Rc<Marquee<H>>>,
}

impl<H: PageHost> PageController<H> {
    /// Validate `config` and run every setup routine against `host`.
    pub fn install(host: Rc<H>, config: BehaviorConfig) -> BehaviorResult<Self> {
        config.validate()?;
        let mut report = InstallReport::default();

        let menu = NavMenu::acquire(&host, &config.nav).map(Rc::new);
        report.record(
            Routine::NavToggle,
            wire_toggle(&host, &config.nav, menu.as_ref()),
        );
        report.record(
            Routine::OutsideDismissal,
            wire_outside_dismissal(&host, &config.nav, menu.as_ref()),
        );
        report.record(
            Routine::AnchorScroll,
            wire_anchors(&host, &config.scroll, &config.nav, menu.as_ref()),
        );

        let (status, accordion) = wire_accordion(&host, &config.accordion);
        report.record(Routine::Accordion, status);

        let (status, copy) = wire_copy(&host, &config.copy);
        report.record(Routine::ClipboardCopy, status);

        let (status, reveal) = wire_reveal(&host, &config.reveal);
        report.record(Routine::Reveal, status);

        let (status, marquee) = wire_marquee(&host, &config.marquee);
        report.record(Routine::Marquee, status);

        if config.inject_styles {
            match host.inject_style(&animation_stylesheet(&config.reveal)) {
                Ok(()) => report.styles_injected = true,
                Err(err) => tracing::warn!(error = %err, "Failed to inject animation styles"),
            }
        }

        tracing::info!(
            enabled = report.enabled_count(),
            total = report.routines.len(),
            "Page behaviors installed"
        );

        Ok(Self {
            host,
            config,
            report,
            menu,
            accordion,
            copy,
            reveal,
            marquee,
        })
    }

    pub fn host(&self) -> &Rc<H> {
        &self.host
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    pub fn report(&self) -> &InstallReport {
        &self.report
    }

    pub fn menu_state(&self) -> Option<MenuState> {
        self.menu.as_ref().map(|menu| menu.state())
    }

    /// Rebuild the marquee outside of a resize event.
    pub fn refill_marquee(&self) -> Option<usize> {
        self.marquee.as_ref().and_then(|marquee| marquee.refill())
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        let (revealed, pending_reveal) = self
            .reveal
            .as_ref()
            .map(|set| {
                let set = set.borrow();
                (set.revealed_count(), set.pending_count())
            })
            .unwrap_or((0, 0));

        ControllerSnapshot {
            menu_open: self.menu_state().map(MenuState::is_open),
            active_accordions: self
                .accordion
                .as_ref()
                .map(|accordion| accordion.active_indices())
                .unwrap_or_default(),
            copy_label: self.copy.as_ref().map(|copy| copy.label()),
            revealed,
            pending_reveal,
            marquee_spans: self.marquee.as_ref().and_then(|marquee| marquee.span_count()),
        }
    }
}

//! Emerson landing page behaviors
//!
//! Host-independent implementation of the page script: mobile menu,
//! anchor scrolling, accordion, contract-address copy, entrance animations
//! and the marquee filler.
//!
//! ## Overview
//!
//! Behaviors talk to the document through the [`PageHost`] trait. The
//! browser build implements it on `web-sys`; [`memory::MemoryPage`]
//! implements it in memory for tests and the CLI simulator.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::rc::Rc;
//! use emerson_core::{BehaviorConfig, PageController};
//! use emerson_core::memory::PageFixture;
//!
//! let fixture = PageFixture::load("landing.json")?;
//! let page = fixture.build();
//! let controller = PageController::install(Rc::clone(&page), BehaviorConfig::default())?;
//! fixture.replay(&page)?;
//! println!("{:?}", controller.snapshot());
//! ```

pub mod accordion;
pub mod config;
pub mod controller;
pub mod copy;
pub mod error;
pub mod host;
pub mod logging;
pub mod marquee;
pub mod memory;
pub mod nav;
pub mod reveal;
pub mod scroll;
pub mod style;

// Re-exports
pub use accordion::{Accordion, AccordionSelection};
pub use config::{BehaviorConfig, CopyRestorePolicy, StaggerGroup};
pub use controller::{ControllerSnapshot, InstallReport, PageController, Routine, RoutineStatus};
pub use copy::{CopyButton, CopyFeedback, RestoreTicket};
pub use error::{BehaviorError, BehaviorResult};
pub use host::{ClickEvent, PageHost};
pub use marquee::{spans_needed, Marquee, MAX_SPANS};
pub use nav::{MenuState, NavMenu};
pub use reveal::{stagger_delay, RevealSet};
pub use scroll::{scroll_offset, AnchorScroller, Fragment};

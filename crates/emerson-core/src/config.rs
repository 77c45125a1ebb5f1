//! Behavior configuration
//!
//! Every selector, marker class and constant the controller relies on lives
//! here with the page's defaults. A JSON document only needs to name the
//! fields it overrides:
//!
//! ```json
//! { "copy": { "restore_policy": "restart" }, "scroll": { "buffer_px": 32 } }
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{BehaviorError, BehaviorResult};

/// Top-level configuration for [`PageController`](crate::controller::PageController).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub nav: NavConfig,
    pub scroll: ScrollConfig,
    pub accordion: AccordionConfig,
    pub copy: CopyConfig,
    pub reveal: RevealConfig,
    pub marquee: MarqueeConfig,
    /// Append the animation stylesheet at install time
    pub inject_styles: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            nav: NavConfig::default(),
            scroll: ScrollConfig::default(),
            accordion: AccordionConfig::default(),
            copy: CopyConfig::default(),
            reveal: RevealConfig::default(),
            marquee: MarqueeConfig::default(),
            inject_styles: true,
        }
    }
}

impl BehaviorConfig {
    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json(json: &str) -> BehaviorResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> BehaviorResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Pretty JSON rendering, used by `emerson config`.
    pub fn to_json_pretty(&self) -> BehaviorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values that would make a routine misbehave.
    pub fn validate(&self) -> BehaviorResult<()> {
        let selectors = [
            ("nav.toggle_selector", &self.nav.toggle_selector),
            ("nav.links_selector", &self.nav.links_selector),
            ("nav.header_selector", &self.nav.header_selector),
            ("nav.open_class", &self.nav.open_class),
            ("scroll.anchor_selector", &self.scroll.anchor_selector),
            ("accordion.widget_selector", &self.accordion.widget_selector),
            ("accordion.header_selector", &self.accordion.header_selector),
            ("accordion.active_class", &self.accordion.active_class),
            ("copy.button_selector", &self.copy.button_selector),
            ("copy.source_selector", &self.copy.source_selector),
            ("reveal.selector", &self.reveal.selector),
            ("reveal.pending_class", &self.reveal.pending_class),
            ("reveal.visible_class", &self.reveal.visible_class),
            ("marquee.container_selector", &self.marquee.container_selector),
            ("marquee.template_selector", &self.marquee.template_selector),
        ];
        for (name, value) in selectors {
            if value.trim().is_empty() {
                return Err(BehaviorError::Config(format!("{} must not be empty", name)));
            }
        }

        if !self.scroll.buffer_px.is_finite() {
            return Err(BehaviorError::Config("scroll.buffer_px must be finite".into()));
        }
        if !(self.reveal.threshold > 0.0 && self.reveal.threshold <= 1.0) {
            return Err(BehaviorError::Config(format!(
                "reveal.threshold must be in (0, 1], got {}",
                self.reveal.threshold
            )));
        }
        for group in &self.reveal.stagger {
            if group.selector.trim().is_empty() {
                return Err(BehaviorError::Config("reveal.stagger selector must not be empty".into()));
            }
            if !group.step_secs.is_finite() || group.step_secs < 0.0 {
                return Err(BehaviorError::Config(format!(
                    "reveal.stagger step for '{}' must be a non-negative number",
                    group.selector
                )));
            }
        }
        if self.copy.restore_after_ms == 0 {
            return Err(BehaviorError::Config("copy.restore_after_ms must be positive".into()));
        }
        if self.marquee.coverage_factor == 0 {
            return Err(BehaviorError::Config("marquee.coverage_factor must be at least 1".into()));
        }
        Ok(())
    }
}

/// Mobile navigation toggle and outside-click dismissal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub toggle_selector: String,
    pub links_selector: String,
    pub header_selector: String,
    /// Marker class meaning "menu open"
    pub open_class: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            toggle_selector: ".menu-toggle".to_string(),
            links_selector: ".nav-links".to_string(),
            header_selector: ".header".to_string(),
            open_class: "show".to_string(),
        }
    }
}

/// In-page anchor scrolling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub anchor_selector: String,
    /// Gap left between the fixed header and the scrolled-to element
    pub buffer_px: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            anchor_selector: "a[href^=\"#\"]".to_string(),
            buffer_px: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccordionConfig {
    pub widget_selector: String,
    pub header_selector: String,
    pub active_class: String,
}

impl Default for AccordionConfig {
    fn default() -> Self {
        Self {
            widget_selector: ".accordion".to_string(),
            header_selector: ".accordion-header".to_string(),
            active_class: "active".to_string(),
        }
    }
}

/// How overlapping "Copied!" windows resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyRestorePolicy {
    /// Every click restores whatever label it saw, on its own timer.
    /// A click during the window therefore restores "Copied!".
    #[default]
    Stacked,
    /// A new click supersedes pending restores; the label shown before the
    /// burst comes back once, after the last click's window.
    Restart,
}

/// Clipboard copy button
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CopyConfig {
    pub button_selector: String,
    /// Element whose text is copied
    pub source_selector: String,
    pub confirmation: String,
    pub restore_after_ms: u64,
    pub restore_policy: CopyRestorePolicy,
}

impl CopyConfig {
    pub fn restore_after(&self) -> Duration {
        Duration::from_millis(self.restore_after_ms)
    }
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            button_selector: ".copy-btn".to_string(),
            source_selector: ".address".to_string(),
            confirmation: "Copied!".to_string(),
            restore_after_ms: 2000,
            restore_policy: CopyRestorePolicy::Stacked,
        }
    }
}

/// A group of elements whose animation start is offset by index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaggerGroup {
    pub selector: String,
    pub step_secs: f64,
}

impl StaggerGroup {
    pub fn new(selector: impl Into<String>, step_secs: f64) -> Self {
        Self {
            selector: selector.into(),
            step_secs,
        }
    }
}

/// Scroll-triggered entrance animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub selector: String,
    pub pending_class: String,
    pub visible_class: String,
    /// Visible fraction at which an element is revealed
    pub threshold: f64,
    pub stagger: Vec<StaggerGroup>,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            selector: ".card, .roadmap-card, .step-card, .social-card, .section-title, .story-card"
                .to_string(),
            pending_class: "animate-on-scroll".to_string(),
            visible_class: "visible".to_string(),
            threshold: 0.25,
            stagger: vec![
                StaggerGroup::new(".card", 0.1),
                StaggerGroup::new(".roadmap-card", 0.2),
            ],
        }
    }
}

/// Marquee filler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarqueeConfig {
    pub container_selector: String,
    /// Child measured to size the copies
    pub template_selector: String,
    pub text: String,
    /// Multiplier over the copies needed to span one viewport
    pub coverage_factor: u32,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            container_selector: ".marquee-content".to_string(),
            template_selector: "span".to_string(),
            text: "GET EMERSON\u{a0}".to_string(),
            coverage_factor: 2,
        }
    }
}

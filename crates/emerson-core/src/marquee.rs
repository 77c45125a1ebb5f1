//! Marquee filler
//!
//! The marquee scrolls a row of identical spans. Enough copies are needed to
//! cover the viewport twice over, so the loop never shows a gap.

use std::cell::Cell;
use std::rc::Rc;

use crate::config::MarqueeConfig;
use crate::controller::RoutineStatus;
use crate::host::PageHost;

/// Upper bound on a single rebuild. Anything past it means the span was
/// mismeasured.
pub const MAX_SPANS: usize = 10_000;

/// Number of spans needed to cover `viewport_width` `coverage` times.
///
/// Zero when either width is not a positive finite number, or when the
/// count would exceed [`MAX_SPANS`].
pub fn spans_needed(viewport_width: f64, span_width: f64, coverage: u32) -> usize {
    if !(viewport_width.is_finite() && viewport_width > 0.0) {
        return 0;
    }
    if !(span_width.is_finite() && span_width > 0.0) {
        return 0;
    }
    let per_viewport = (viewport_width / span_width).ceil();
    if !per_viewport.is_finite() || per_viewport > MAX_SPANS as f64 {
        return 0;
    }
    (per_viewport as usize)
        .checked_mul(coverage as usize)
        .filter(|&needed| needed <= MAX_SPANS)
        .unwrap_or(0)
}

/// The marquee container, held for the page's lifetime.
pub struct Marquee<H: PageHost> {
    host: Rc<H>,
    container: H::Node,
    template_selector: String,
    text: String,
    coverage: u32,
    spans: Cell<Option<usize>>,
}

impl<H: PageHost> Marquee<H> {
    pub fn new(host: Rc<H>, container: H::Node, config: &MarqueeConfig) -> Self {
        Self {
            host,
            container,
            template_selector: config.template_selector.clone(),
            text: config.text.clone(),
            coverage: config.coverage_factor,
            spans: Cell::new(None),
        }
    }

    /// Span count produced by the last successful rebuild.
    pub fn span_count(&self) -> Option<usize> {
        self.spans.get()
    }

    /// Measure the first span and rebuild the container's content.
    ///
    /// Returns the number of spans written, or `None` when nothing changed.
    pub fn refill(&self) -> Option<usize> {
        let template = self
            .host
            .query_within(&self.container, &self.template_selector)?;
        let span_width = self.host.offset_width(&template);
        let viewport_width = self.host.viewport_width();
        let needed = spans_needed(viewport_width, span_width, self.coverage);
        if needed == 0 {
            tracing::warn!(viewport_width, span_width, "Marquee span not measurable, leaving as is");
            return None;
        }

        self.host.clear_children(&self.container);
        let mut written = 0;
        while written < needed {
            if let Err(err) = self.host.append_span(&self.container, &self.text) {
                tracing::warn!(error = %err, written, needed, "Failed to append marquee span");
                break;
            }
            written += 1;
        }
        tracing::trace!(viewport_width, span_width, written, "Marquee refilled");
        self.spans.set(Some(written));
        Some(written)
    }
}

/// Fill the marquee now and again on every resize.
pub(crate) fn wire_marquee<H: PageHost>(
    host: &Rc<H>,
    config: &MarqueeConfig,
) -> (RoutineStatus, Option<Rc<Marquee<H>>>) {
    let Some(container) = host.query(&config.container_selector) else {
        return (RoutineStatus::missing(&config.container_selector), None);
    };

    let marquee = Rc::new(Marquee::new(Rc::clone(host), container, config));
    marquee.refill();

    let on_resize = Rc::clone(&marquee);
    host.on_resize(Box::new(move || {
        on_resize.refill();
    }));
    (RoutineStatus::enabled(1), Some(marquee))
}

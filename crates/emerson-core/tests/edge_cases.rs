//! Partial pages, failing capabilities and odd inputs.

mod common;

use std::rc::Rc;
use std::sync::Arc;

use common::{landing_page, MARQUEE_TEXT};
use emerson_core::logging::{ConsoleLayer, MemorySink};
use emerson_core::memory::{ClipboardOutcome, ElementBuilder, MemoryPage};
use emerson_core::{
    BehaviorConfig, BehaviorError, PageController, PageHost, Routine, RoutineStatus,
};
use tracing_subscriber::prelude::*;

fn capture<T>(f: impl FnOnce() -> T) -> (T, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let subscriber = tracing_subscriber::registry().with(ConsoleLayer::with_shared(Arc::clone(&sink)));
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, sink)
}

fn install(page: &Rc<MemoryPage>) -> PageController<MemoryPage> {
    PageController::install(Rc::clone(page), BehaviorConfig::default()).unwrap()
}

#[test]
fn test_empty_page_skips_everything() {
    let page = Rc::new(MemoryPage::new(1280.0));
    let controller = install(&page);
    let report = controller.report();

    assert_eq!(report.enabled_count(), 0);
    assert_eq!(report.routines.len(), 7);
    assert_eq!(
        report.status(Routine::NavToggle),
        Some(&RoutineStatus::Skipped {
            missing: ".menu-toggle".to_string()
        })
    );
    assert_eq!(
        report.status(Routine::Marquee),
        Some(&RoutineStatus::Skipped {
            missing: ".marquee-content".to_string()
        })
    );
    // The stylesheet does not depend on any element
    assert!(report.styles_injected);

    let snapshot = controller.snapshot();
    assert_eq!(snapshot.menu_open, None);
    assert_eq!(snapshot.copy_label, None);
    assert_eq!(snapshot.marquee_spans, None);
}

#[test]
fn test_styles_can_be_disabled() {
    let page = Rc::new(MemoryPage::new(1280.0));
    let mut config = BehaviorConfig::default();
    config.inject_styles = false;
    let controller = PageController::install(Rc::clone(&page), config).unwrap();

    assert!(!controller.report().styles_injected);
    assert!(page.injected_styles().is_empty());
}

#[test]
fn test_toggle_without_links_is_skipped() {
    let page = Rc::new(MemoryPage::new(1280.0));
    let header = page.append(page.body(), ElementBuilder::new("header").class("header"));
    let toggle = page.append(header, ElementBuilder::new("button").class("menu-toggle"));
    let controller = install(&page);

    assert_eq!(
        controller.report().status(Routine::NavToggle),
        Some(&RoutineStatus::Skipped {
            missing: ".nav-links".to_string()
        })
    );
    assert!(!page.click(toggle));
}

#[test]
fn test_missing_header_skips_dismissal_only() {
    let page = Rc::new(MemoryPage::new(1280.0));
    let toggle = page.append(page.body(), ElementBuilder::new("button").class("menu-toggle"));
    let nav = page.append(page.body(), ElementBuilder::new("ul").class("nav-links"));
    let text = page.append(page.body(), ElementBuilder::new("p").text("elsewhere"));
    let controller = install(&page);

    assert!(controller.report().is_enabled(Routine::NavToggle));
    assert!(!controller.report().is_enabled(Routine::OutsideDismissal));

    page.click(toggle);
    page.click(text);
    assert!(page.has_class(&nav, "show"));
}

#[test]
fn test_anchor_without_header_uses_zero_height() {
    let page = Rc::new(MemoryPage::new(1280.0));
    let link = page.append(page.body(), ElementBuilder::new("a").attr("href", "#faq"));
    page.append(page.body(), ElementBuilder::new("section").id("faq").layout(900.0, 300.0));
    let _controller = install(&page);

    page.click(link);
    assert_eq!(page.scroll_requests(), vec![880.0]);
}

#[test]
fn test_anchor_scrolling_independent_of_menu() {
    let page = Rc::new(MemoryPage::new(1280.0));
    let header = page.append(page.body(), ElementBuilder::new("header").class("header").layout(0.0, 60.0));
    let link = page.append(header, ElementBuilder::new("a").attr("href", "#faq"));
    page.append(page.body(), ElementBuilder::new("section").id("faq").layout(1000.0, 300.0));
    let controller = install(&page);

    assert!(!controller.report().is_enabled(Routine::NavToggle));
    assert!(page.click(link));
    assert_eq!(page.scroll_requests(), vec![920.0]);
}

#[test]
fn test_external_links_are_not_intercepted() {
    let page = Rc::new(MemoryPage::new(1280.0));
    let external = page.append(
        page.body(),
        ElementBuilder::new("a").attr("href", "https://example.com/#pricing"),
    );
    let _controller = install(&page);

    assert!(!page.click(external));
    assert!(page.scroll_requests().is_empty());
}

#[test]
fn test_headerless_accordion_widget_still_cleared() {
    let page = Rc::new(MemoryPage::new(1280.0));
    let first = page.append(page.body(), ElementBuilder::new("div").class("accordion"));
    let header = page.append(first, ElementBuilder::new("div").class("accordion-header"));
    let bare = page.append(page.body(), ElementBuilder::new("div").class("accordion active"));
    let controller = install(&page);

    assert_eq!(
        controller.report().status(Routine::Accordion),
        Some(&RoutineStatus::Enabled { bound: 1 })
    );

    page.click(header);
    assert!(page.has_class(&first, "active"));
    assert!(!page.has_class(&bare, "active"));
}

#[test]
fn test_copy_without_address_is_skipped() {
    let page = Rc::new(MemoryPage::new(1280.0));
    let button = page.append(page.body(), ElementBuilder::new("button").class("copy-btn").text("Copy"));
    let controller = install(&page);

    assert_eq!(
        controller.report().status(Routine::ClipboardCopy),
        Some(&RoutineStatus::Skipped {
            missing: ".address".to_string()
        })
    );
    page.click(button);
    assert_eq!(page.clipboard_text(), None);
    assert_eq!(page.text(&button), "Copy");
}

#[test]
fn test_copy_unavailable_logs_error() {
    let landing = landing_page();
    landing.page.set_clipboard_outcome(ClipboardOutcome::Unavailable);

    let (_controller, sink) = capture(|| {
        let controller = landing.install();
        landing.page.click(landing.copy_btn);
        controller
    });

    let errors = sink.at_level("error");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].msg, "Failed to copy");
    assert!(errors[0].field("error").is_some());
    assert_eq!(landing.page.text(&landing.copy_btn), "Copy");
    assert_eq!(landing.page.pending_timers(), 0);
}

#[test]
fn test_copy_deferred_rejection_logs_error() {
    let landing = landing_page();
    landing.page.set_clipboard_outcome(ClipboardOutcome::Deferred);

    let (_controller, sink) = capture(|| {
        let controller = landing.install();
        landing.page.click(landing.copy_btn);
        landing.page.settle_clipboard(false);
        controller
    });

    assert_eq!(sink.at_level("error").len(), 1);
    assert_eq!(landing.page.text(&landing.copy_btn), "Copy");
}

#[test]
fn test_unmeasurable_marquee_left_untouched() {
    let page = Rc::new(MemoryPage::new(1000.0));
    let container = page.append(page.body(), ElementBuilder::new("div").class("marquee-content"));
    page.append(container, ElementBuilder::new("span").text(MARQUEE_TEXT));

    let (controller, sink) = capture(|| install(&page));

    assert_eq!(page.children(container).len(), 1);
    assert_eq!(controller.snapshot().marquee_spans, None);
    assert!(sink
        .at_level("warn")
        .iter()
        .any(|line| line.msg.contains("Marquee span not measurable")));
}

#[test]
fn test_marquee_without_template_span() {
    let page = Rc::new(MemoryPage::new(1000.0));
    let container = page.append(page.body(), ElementBuilder::new("div").class("marquee-content"));
    let controller = install(&page);

    assert!(page.children(container).is_empty());
    assert_eq!(controller.refill_marquee(), None);
}

#[test]
fn test_marquee_zero_viewport_keeps_last_fill() {
    let landing = landing_page();
    let _controller = landing.install();

    landing.page.resize(0.0);
    assert_eq!(landing.page.children(landing.marquee).len(), 14);
}

#[test]
fn test_marquee_absurd_ratio_left_untouched() {
    let page = Rc::new(MemoryPage::new(1e300));
    page.set_text_width(MARQUEE_TEXT, 1e-300);
    let container = page.append(page.body(), ElementBuilder::new("div").class("marquee-content"));
    page.append(container, ElementBuilder::new("span").text(MARQUEE_TEXT));

    let (controller, sink) = capture(|| install(&page));

    assert_eq!(page.children(container).len(), 1);
    assert_eq!(controller.snapshot().marquee_spans, None);
    assert!(!sink.at_level("warn").is_empty());
}

#[test]
fn test_marquee_partial_refill_counts_written_spans() {
    let landing = landing_page();
    let controller = landing.install();
    assert_eq!(controller.snapshot().marquee_spans, Some(14));

    landing.page.limit_spans(5);
    assert_eq!(controller.refill_marquee(), Some(5));
    assert_eq!(controller.snapshot().marquee_spans, Some(5));
    assert_eq!(landing.page.children(landing.marquee).len(), 5);
}

#[test]
fn test_reveal_without_stagger_groups() {
    let page = Rc::new(MemoryPage::new(1280.0));
    let story = page.append(page.body(), ElementBuilder::new("div").class("story-card"));
    let _controller = install(&page);

    assert!(page.has_class(&story, "animate-on-scroll"));
    assert_eq!(page.inline_style(story, "animation-delay"), None);
}

#[test]
fn test_invalid_config_rejected_before_wiring() {
    let landing = landing_page();
    let mut config = BehaviorConfig::default();
    config.reveal.threshold = 0.0;

    let result = PageController::install(Rc::clone(&landing.page), config);
    assert!(matches!(result, Err(BehaviorError::Config(_))));

    // Nothing was bound
    landing.page.click(landing.toggle);
    assert!(!landing.menu_open());
    assert!(landing.page.injected_styles().is_empty());
}

#[test]
fn test_install_logs_summary() {
    let landing = landing_page();
    let (_controller, sink) = capture(|| landing.install());

    let info = sink.at_level("info");
    assert_eq!(info.len(), 1);
    assert_eq!(info[0].msg, "Page behaviors installed");
    assert_eq!(info[0].field("enabled").as_deref(), Some("7"));
}

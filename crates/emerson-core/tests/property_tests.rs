//! Property-based tests for the page behaviors.

mod common;

use std::time::Duration;

use common::landing_page;
use emerson_core::{spans_needed, stagger_delay, AccordionSelection, PageHost, RevealSet};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// After any click sequence at most one widget is active, and it matches
    /// the single-choice model.
    #[test]
    fn prop_accordion_at_most_one_active(clicks in prop::collection::vec(0usize..3, 0..24)) {
        let landing = landing_page();
        let _controller = landing.install();
        let mut model = AccordionSelection::none();

        for index in clicks {
            landing.page.click(landing.accordion_headers[index]);
            model = model.select(index);

            let active = landing.active_accordions();
            prop_assert!(active.len() <= 1);
            prop_assert_eq!(active.first().copied(), model.active());
        }
    }

    /// Toggling the menu an even number of times restores its state.
    #[test]
    fn prop_menu_toggle_parity(toggles in 0usize..16) {
        let landing = landing_page();
        let _controller = landing.install();

        for _ in 0..toggles {
            landing.page.click(landing.toggle);
        }
        prop_assert_eq!(landing.menu_open(), toggles % 2 == 1);
    }

    /// The marquee holds coverage * ceil(viewport / span) spans.
    #[test]
    fn prop_marquee_count(viewport in 1.0f64..5000.0, span in 5.0f64..800.0, coverage in 1u32..5) {
        let needed = spans_needed(viewport, span, coverage);
        prop_assert_eq!(needed, (viewport / span).ceil() as usize * coverage as usize);
        prop_assert!(needed as f64 * span >= viewport * coverage as f64 - 1e-6);
    }

    /// Resizing always leaves exactly the formula's span count.
    #[test]
    fn prop_marquee_resize(widths in prop::collection::vec(1.0f64..4000.0, 1..6)) {
        let landing = landing_page();
        let _controller = landing.install();

        for width in widths {
            landing.page.resize(width);
            let expected = spans_needed(width, 150.0, 2);
            prop_assert_eq!(landing.page.children(landing.marquee).len(), expected);
        }
    }

    /// Each element is revealed at most once, however often it re-enters.
    #[test]
    fn prop_reveal_one_shot(events in prop::collection::vec((0usize..4, 0.0f64..=1.0), 0..32)) {
        let landing = landing_page();
        let controller = landing.install();

        for (card, fraction) in &events {
            landing.page.set_visibility(landing.cards[*card], *fraction);
        }

        let mut revealed = 0;
        for (index, card) in landing.cards.iter().enumerate() {
            let markers = landing
                .page
                .classes(*card)
                .iter()
                .filter(|class| class.as_str() == "visible")
                .count();
            let should = events
                .iter()
                .any(|(target, fraction)| *target == index && *fraction >= 0.25);
            prop_assert_eq!(markers, usize::from(should));
            revealed += markers;
        }
        prop_assert_eq!(controller.snapshot().revealed, revealed);
    }

    /// Draining a reveal set keeps pending + revealed constant.
    #[test]
    fn prop_reveal_set_accounting(size in 1usize..20, drains in prop::collection::vec(0usize..30, 0..40)) {
        let mut set = RevealSet::new((0..size).collect::<Vec<_>>());
        for node in drains {
            set.drain(&node);
            prop_assert_eq!(set.pending_count() + set.revealed_count(), size);
        }
    }

    /// Stagger delays never go backwards within a group.
    #[test]
    fn prop_stagger_monotonic(step in 0.0f64..1.0, count in 1usize..30) {
        let delays: Vec<f64> = (0..count)
            .map(|index| {
                let rendered = stagger_delay(index, step);
                rendered.trim_end_matches('s').parse::<f64>().unwrap()
            })
            .collect();
        prop_assert!(delays.windows(2).all(|pair| pair[0] <= pair[1]));
        prop_assert_eq!(delays[0], 0.0);
    }

    /// With no clicks inside the window the label always comes back.
    #[test]
    fn prop_copy_label_restored(gap_ms in 2000u64..10_000, clicks in 1usize..5) {
        let landing = landing_page();
        let _controller = landing.install();

        for _ in 0..clicks {
            landing.page.click(landing.copy_btn);
            prop_assert_eq!(landing.page.text(&landing.copy_btn), "Copied!");
            landing.page.advance(Duration::from_millis(gap_ms));
            prop_assert_eq!(landing.page.text(&landing.copy_btn), "Copy");
        }
    }
}

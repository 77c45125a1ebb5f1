//! Shared landing page used by the integration tests.

#![allow(dead_code)]

use std::rc::Rc;

use emerson_core::memory::{ElementBuilder, MemoryPage, NodeId};
use emerson_core::{BehaviorConfig, PageController};

pub const MARQUEE_TEXT: &str = "GET EMERSON\u{a0}";

/// Handles to the interesting parts of the page.
pub struct Landing {
    pub page: Rc<MemoryPage>,
    pub header: NodeId,
    pub toggle: NodeId,
    pub nav: NodeId,
    pub nav_link: NodeId,
    pub logo_link: NodeId,
    pub pricing: NodeId,
    pub missing_link: NodeId,
    pub accordions: Vec<NodeId>,
    pub accordion_headers: Vec<NodeId>,
    pub copy_btn: NodeId,
    pub address: NodeId,
    pub cards: Vec<NodeId>,
    pub roadmap_cards: Vec<NodeId>,
    pub section_title: NodeId,
    pub marquee: NodeId,
    pub body_text: NodeId,
}

impl Landing {
    pub fn install(&self) -> PageController<MemoryPage> {
        self.install_with(BehaviorConfig::default())
    }

    pub fn install_with(&self, config: BehaviorConfig) -> PageController<MemoryPage> {
        PageController::install(Rc::clone(&self.page), config).expect("install")
    }

    pub fn active_accordions(&self) -> Vec<usize> {
        self.accordions
            .iter()
            .enumerate()
            .filter(|(_, widget)| self.page.classes(**widget).iter().any(|c| c == "active"))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn menu_open(&self) -> bool {
        self.page.classes(self.nav).iter().any(|c| c == "show")
    }
}

/// Build the full landing page at a 1000px viewport.
pub fn landing_page() -> Landing {
    let page = Rc::new(MemoryPage::new(1000.0));
    page.set_text_width(MARQUEE_TEXT, 150.0);
    let body = page.body();

    let header = page.append(body, ElementBuilder::new("header").class("header").layout(0.0, 80.0));
    let logo_link = page.append(
        header,
        ElementBuilder::new("a").class("logo").attr("href", "#").text("EMERSON"),
    );
    let toggle = page.append(header, ElementBuilder::new("button").class("menu-toggle"));
    let nav = page.append(header, ElementBuilder::new("ul").class("nav-links"));
    let nav_link = page.append(
        nav,
        ElementBuilder::new("a").attr("href", "#pricing").text("Pricing"),
    );

    let marquee = page.append(body, ElementBuilder::new("div").class("marquee"));
    let marquee_content = page.append(marquee, ElementBuilder::new("div").class("marquee-content"));
    page.append(marquee_content, ElementBuilder::new("span").text(MARQUEE_TEXT));

    let about = page.append(body, ElementBuilder::new("section").id("about").layout(600.0, 900.0));
    let section_title = page.append(about, ElementBuilder::new("h2").class("section-title").text("About"));
    let body_text = page.append(about, ElementBuilder::new("p").text("Emerson is a memecoin."));
    let missing_link = page.append(
        about,
        ElementBuilder::new("a").attr("href", "#missing").text("Nowhere"),
    );
    let cards = (0..4)
        .map(|i| page.append(about, ElementBuilder::new("div").class("card").text(format!("Card {}", i))))
        .collect();

    let roadmap = page.append(body, ElementBuilder::new("section").id("roadmap").layout(1500.0, 800.0));
    let roadmap_cards = (0..3)
        .map(|i| page.append(roadmap, ElementBuilder::new("div").class("roadmap-card").text(format!("Phase {}", i))))
        .collect();

    let pricing = page.append(body, ElementBuilder::new("section").id("pricing").layout(2400.0, 600.0));
    let address = page.append(pricing, ElementBuilder::new("code").class("address").text("0xABC123"));
    let copy_btn = page.append(pricing, ElementBuilder::new("button").class("copy-btn").text("Copy"));

    let faq = page.append(body, ElementBuilder::new("section").id("faq").layout(3000.0, 600.0));
    let mut accordions = Vec::new();
    let mut accordion_headers = Vec::new();
    for i in 0..3 {
        let widget = page.append(faq, ElementBuilder::new("div").class("accordion"));
        accordion_headers.push(page.append(
            widget,
            ElementBuilder::new("div").class("accordion-header").text(format!("Question {}", i)),
        ));
        page.append(widget, ElementBuilder::new("div").class("accordion-content").text("Answer"));
        accordions.push(widget);
    }

    Landing {
        page,
        header,
        toggle,
        nav,
        nav_link,
        logo_link,
        pricing,
        missing_link,
        accordions,
        accordion_headers,
        copy_btn,
        address,
        cards,
        roadmap_cards,
        section_title,
        marquee: marquee_content,
        body_text,
    }
}

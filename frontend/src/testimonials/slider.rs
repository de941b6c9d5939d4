use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo_events::EventListener;
use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use super::carousel::{dot_for_scroll, Carousel, Control, Direction, Mode, SliderLayout};
use super::desktop::DesktopMode;
use super::mobile::MobileMode;
use super::slot::{SliderStrategy, StrategySlot};
use crate::config::SliderConfig;
use crate::dom;
use crate::error::MountError;
use crate::timing::Debounce;

const TRACK: &str = ".testimonials__track";
const CARD: &str = ".testimonial__card";
const DOT_CLASS: &str = "testimonials__dot";

pub(super) enum ActiveMode {
    Desktop(DesktopMode),
    Mobile(MobileMode),
}

impl SliderStrategy for ActiveMode {
    fn mode(&self) -> Mode {
        match self {
            ActiveMode::Desktop(_) => Mode::Desktop,
            ActiveMode::Mobile(_) => Mode::Mobile,
        }
    }
}

pub struct TestimonialsSlider {
    inner: Rc<SliderInner>,
    _resize: EventListener,
}

pub(super) struct SliderInner {
    pub(super) window: Window,
    pub(super) document: Document,
    pub(super) track: HtmlElement,
    pub(super) cards: Vec<HtmlElement>,
    pub(super) prev: Option<HtmlElement>,
    pub(super) next: Option<HtmlElement>,
    dots: Option<HtmlElement>,
    pub(super) config: SliderConfig,
    carousel: RefCell<Carousel>,
    card_width: Cell<f64>,
    slot: RefCell<StrategySlot<ActiveMode>>,
    dot_listeners: RefCell<Vec<EventListener>>,
    resize: RefCell<Debounce>,
}

impl TestimonialsSlider {
    pub fn mount(
        window: &Window,
        document: &Document,
        config: &SliderConfig,
    ) -> Result<Self, MountError> {
        let track = dom::query_doc(document, TRACK).ok_or_else(|| MountError::missing(TRACK))?;
        let cards = dom::query_all(document, CARD);
        if cards.is_empty() {
            return Err(MountError::missing(CARD));
        }

        let layout = SliderLayout::for_width(dom::inner_width(window), config);
        let direction = Direction::from_rtl(dom::is_rtl(document));
        let inner = Rc::new(SliderInner {
            window: window.clone(),
            document: document.clone(),
            track,
            carousel: RefCell::new(Carousel::new(cards.len(), layout.visible_cards, direction)),
            cards,
            prev: dom::query_doc(document, ".testimonials__btn--prev"),
            next: dom::query_doc(document, ".testimonials__btn--next"),
            dots: dom::query_doc(document, ".testimonials__dots"),
            config: config.clone(),
            card_width: Cell::new(0.0),
            slot: RefCell::new(StrategySlot::new()),
            dot_listeners: RefCell::new(Vec::new()),
            resize: RefCell::new(Debounce::new(config.resize_debounce_ms)),
        });
        inner.render_dots();
        inner.relayout();

        let weak = Rc::downgrade(&inner);
        let resize = EventListener::new(window, "resize", move |_| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let weak = Rc::downgrade(&inner);
            inner.resize.borrow_mut().schedule(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.relayout();
                }
            });
        });

        Ok(Self {
            inner,
            _resize: resize,
        })
    }

    pub fn index(&self) -> usize {
        self.inner.carousel.borrow().index()
    }

    pub fn mode(&self) -> Option<Mode> {
        self.inner.slot.borrow().mode()
    }

    pub fn press(&self, control: Control) {
        self.inner.press(control);
    }

    /// Re-reads the viewport, as the debounced resize handler does.
    pub fn relayout(&self) {
        self.inner.relayout();
    }

    pub fn relayout_for_width(&self, viewport_width: f64) {
        self.inner.relayout_for_width(viewport_width);
    }
}

impl SliderInner {
    pub(super) fn weak(self: &Rc<Self>) -> Weak<Self> {
        Rc::downgrade(self)
    }

    pub(super) fn direction(&self) -> Direction {
        self.carousel.borrow().direction()
    }

    pub(super) fn press(&self, control: Control) {
        self.carousel.borrow_mut().press(control);
        self.update();
    }

    pub(super) fn advance_wrapping(&self) {
        self.carousel.borrow_mut().advance_wrapping();
        self.update();
    }

    fn go_to(&self, page: usize) {
        let index = self.carousel.borrow_mut().go_to(page);
        if self.slot.borrow().mode() == Some(Mode::Mobile) {
            let stride = self.first_card_width() + self.config.mobile_gap_px;
            let left = self.direction().scroll_left(index as f64 * stride);
            self.track.scroll_to_with_x_and_y(left, 0.0);
        }
        self.update();
    }

    /// Picks the mode and page size for the current viewport. Swapping
    /// strategies only happens when the mode actually changes.
    fn relayout(self: &Rc<Self>) {
        self.relayout_for_width(dom::inner_width(&self.window));
    }

    fn relayout_for_width(self: &Rc<Self>, viewport_width: f64) {
        let layout = SliderLayout::for_width(viewport_width, &self.config);
        let pages_before = self.carousel.borrow().page_count();
        self.carousel.borrow_mut().set_visible(layout.visible_cards);

        match layout.mode {
            Mode::Desktop => self.size_cards(&layout),
            Mode::Mobile => self.clear_card_sizes(),
        }

        let switched = self.slot.borrow_mut().switch_to(layout.mode, |mode| match mode {
            Mode::Desktop => ActiveMode::Desktop(DesktopMode::attach(self)),
            Mode::Mobile => ActiveMode::Mobile(MobileMode::attach(self)),
        });
        if switched {
            debug!("testimonials slider in {:?} mode", layout.mode);
        }

        if self.carousel.borrow().page_count() != pages_before {
            self.render_dots();
        }
        self.update();
    }

    fn size_cards(&self, layout: &SliderLayout) {
        let container_width = self
            .track
            .parent_element()
            .and_then(|parent| parent.dyn_into::<HtmlElement>().ok())
            .map(|parent| f64::from(parent.offset_width()))
            .unwrap_or_else(|| f64::from(self.track.offset_width()));
        let width = layout.card_width(container_width, self.config.gap_px);
        self.card_width.set(width);
        for card in &self.cards {
            dom::set_style(card, "flex", &format!("0 0 {}px", width));
            dom::set_style(card, "min-width", &format!("{}px", width));
        }
    }

    pub(super) fn clear_card_sizes(&self) {
        for card in &self.cards {
            dom::clear_style(card, "flex");
            dom::clear_style(card, "min-width");
        }
        dom::clear_style(&self.track, "transform");
    }

    fn first_card_width(&self) -> f64 {
        self.cards
            .first()
            .map(|card| f64::from(card.offset_width()))
            .unwrap_or(0.0)
    }

    pub(super) fn sync_dot_to_scroll(&self) {
        let scroll_left = f64::from(self.track.scroll_left());
        let active = dot_for_scroll(scroll_left, self.first_card_width(), self.config.mobile_gap_px);
        self.carousel.borrow_mut().go_to(active);
        self.mark_dot(self.carousel.borrow().index());
    }

    fn update(&self) {
        let carousel = self.carousel.borrow();
        if self.slot.borrow().mode() == Some(Mode::Desktop) {
            let x = carousel.translate_x(self.card_width.get(), self.config.gap_px);
            dom::set_style(&self.track, "transform", &format!("translateX({}px)", x));
        }
        self.mark_dot(carousel.index());
    }

    fn mark_dot(&self, index: usize) {
        let Some(dots) = &self.dots else {
            return;
        };
        for (i, dot) in dom::query_all_in(dots, &format!(".{}", DOT_CLASS))
            .iter()
            .enumerate()
        {
            dom::set_class(dot, "active", i == index);
        }
    }

    /// One dot per page; clicking a dot jumps to its page.
    fn render_dots(self: &Rc<Self>) {
        let Some(container) = &self.dots else {
            return;
        };
        let mut listeners = self.dot_listeners.borrow_mut();
        listeners.clear();
        container.set_inner_html("");

        let pages = self.carousel.borrow().page_count();
        for page in 0..pages {
            let Ok(dot) = self.document.create_element("span") else {
                continue;
            };
            dom::add_class(&dot, DOT_CLASS);
            let weak = self.weak();
            listeners.push(EventListener::new(&dot, "click", move |_| {
                if let Some(inner) = weak.upgrade() {
                    inner.go_to(page);
                }
            }));
            let _ = container.append_child(&dot);
        }
    }
}

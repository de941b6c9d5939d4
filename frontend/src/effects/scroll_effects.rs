use gloo_events::{EventListener, EventListenerOptions};
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    ScrollToOptions, Window,
};

use crate::config::ScrollConfig;
use crate::dom;
use crate::error::MountError;
use crate::timing::Throttle;
use crate::visibility::VisibilityWatcher;

const FADE_TARGETS: &str = ".product__card, .service__card, .testimonial__card";

/// Fraction of the page scrolled, clamped to `[0, 1]`.
pub fn scroll_progress(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    let scrollable = scroll_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    (scroll_y / scrollable).clamp(0.0, 1.0)
}

pub struct ScrollEffects {
    _listeners: Vec<EventListener>,
    _fade_in: Option<VisibilityWatcher>,
}

impl ScrollEffects {
    pub fn mount(
        window: &Window,
        document: &Document,
        config: &ScrollConfig,
    ) -> Result<Self, MountError> {
        let back_to_top = dom::by_id(document, "back-to-top");
        let progress = dom::by_id(document, "scroll-progress");
        let mut listeners = Vec::new();

        if back_to_top.is_some() || progress.is_some() {
            let window_for_scroll = window.clone();
            let document_for_scroll = document.clone();
            let back_to_top = back_to_top.clone();
            let threshold = config.back_to_top_after_px;
            let mut throttle = Throttle::new(config.throttle_ms);
            listeners.push(EventListener::new(window, "scroll", move |_| {
                let scroll_y = dom::scroll_y(&window_for_scroll);
                if let Some(button) = &back_to_top {
                    dom::set_class(button, "visible", scroll_y > threshold);
                }
                let Some(bar) = &progress else {
                    return;
                };
                if !throttle.ready(dom::now_ms()) {
                    return;
                }
                let scroll_height = document_for_scroll
                    .document_element()
                    .map(|root| f64::from(root.scroll_height()))
                    .unwrap_or(0.0);
                let p = scroll_progress(scroll_y, scroll_height, dom::inner_height(&window_for_scroll));
                dom::set_style(bar, "transform", &format!("scaleX({})", p));
            }));
        }

        if let Some(button) = back_to_top.filter(|button| button.tag_name() != "A") {
            let window = window.clone();
            listeners.push(EventListener::new(&button, "click", move |_| {
                let options = ScrollToOptions::new();
                options.set_top(0.0);
                options.set_behavior(ScrollBehavior::Smooth);
                window.scroll_to_with_scroll_to_options(&options);
            }));
        }

        for anchor in dom::query_all(document, "a[href^=\"#\"]") {
            listeners.push(smooth_anchor(document, &anchor));
        }

        let fade_in = match Self::observe_cards(document, config) {
            Ok(watcher) => Some(watcher),
            Err(err) => {
                warn!("fade-in observer unavailable: {}", err);
                None
            }
        };

        Ok(Self {
            _listeners: listeners,
            _fade_in: fade_in,
        })
    }

    fn observe_cards(
        document: &Document,
        config: &ScrollConfig,
    ) -> Result<VisibilityWatcher, MountError> {
        let watcher = VisibilityWatcher::new(config.fade_in_threshold, "0px", |target| {
            if let Ok(card) = target.dyn_into::<HtmlElement>() {
                dom::set_style(&card, "animation-play-state", "running");
            }
        })?;
        for card in dom::query_all(document, FADE_TARGETS) {
            dom::set_style(&card, "animation-play-state", "paused");
            watcher.observe(&card);
        }
        Ok(watcher)
    }
}

fn smooth_anchor(document: &Document, anchor: &HtmlElement) -> EventListener {
    let document = document.clone();
    let href = anchor.get_attribute("href").unwrap_or_default();
    EventListener::new_with_options(
        anchor,
        "click",
        EventListenerOptions::enable_prevent_default(),
        move |event| {
            // A bare "#" is not a valid selector.
            if href.len() <= 1 {
                return;
            }
            event.prevent_default();
            if let Some(target) = document.query_selector(&href).ok().flatten() {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        },
    )
}

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::callback::Timeout;
use web_sys::{Document, HtmlElement, Window};

use crate::config::PreloaderConfig;
use crate::dom;
use crate::error::MountError;

/// Keeps the page from scrolling until `load`, then fades the overlay out.
pub struct Preloader {
    _load: Option<EventListener>,
    _hide: Rc<RefCell<Option<Timeout>>>,
}

impl Preloader {
    pub fn mount(
        window: &Window,
        document: &Document,
        config: &PreloaderConfig,
    ) -> Result<Self, MountError> {
        let overlay = dom::require_id(document, "preloader")?;
        dom::lock_scroll(document, true);

        let hide = Rc::new(RefCell::new(None));
        let schedule = {
            let hide = hide.clone();
            let document = document.clone();
            let delay = config.hide_delay_ms;
            move || {
                let document = document.clone();
                let overlay = overlay.clone();
                *hide.borrow_mut() = Some(Timeout::new(delay, move || {
                    reveal(&document, &overlay);
                }));
            }
        };

        // The module may start after `load` already fired.
        let load = if dom::ready_state(document) == "complete" {
            schedule();
            None
        } else {
            Some(EventListener::once(window, "load", move |_| schedule()))
        };

        Ok(Self {
            _load: load,
            _hide: hide,
        })
    }
}

fn reveal(document: &Document, overlay: &HtmlElement) {
    dom::add_class(overlay, "hidden");
    dom::lock_scroll(document, false);
}

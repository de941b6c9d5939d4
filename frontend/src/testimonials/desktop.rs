use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo_events::EventListener;
use gloo_timers::callback::Interval;
use wasm_bindgen::JsCast;
use web_sys::TouchEvent;

use super::carousel::Control;
use super::slider::SliderInner;

/// Script-driven paging: arrow buttons, swipes and autoplay move the track
/// with a transform.
pub(super) struct DesktopMode {
    _listeners: Vec<EventListener>,
    _autoplay: Rc<Autoplay>,
}

impl DesktopMode {
    pub(super) fn attach(inner: &Rc<SliderInner>) -> Self {
        let mut listeners = Vec::new();

        for (button, control) in [(&inner.prev, Control::Prev), (&inner.next, Control::Next)] {
            if let Some(button) = button {
                let weak = inner.weak();
                listeners.push(EventListener::new(button, "click", move |_| {
                    if let Some(inner) = weak.upgrade() {
                        inner.press(control);
                    }
                }));
            }
        }

        let start_x = Rc::new(Cell::new(None::<f64>));
        {
            let start_x = start_x.clone();
            listeners.push(EventListener::new(&inner.track, "touchstart", move |event| {
                let touch = event
                    .dyn_ref::<TouchEvent>()
                    .and_then(|touch| touch.touches().get(0));
                if let Some(touch) = touch {
                    start_x.set(Some(f64::from(touch.client_x())));
                }
            }));
        }
        {
            let weak = inner.weak();
            listeners.push(EventListener::new(&inner.track, "touchend", move |event| {
                let Some(start) = start_x.take() else {
                    return;
                };
                let Some(end) = event
                    .dyn_ref::<TouchEvent>()
                    .and_then(|touch| touch.changed_touches().get(0))
                    .map(|touch| f64::from(touch.client_x()))
                else {
                    return;
                };
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                if let Some(control) = inner
                    .direction()
                    .swipe(start - end, inner.config.swipe_threshold_px)
                {
                    inner.press(control);
                }
            }));
        }

        let autoplay = Rc::new(Autoplay::new(inner.weak(), inner.config.autoplay_ms));
        autoplay.start();
        if let Some(hover_area) = inner.track.parent_element() {
            let pause = autoplay.clone();
            listeners.push(EventListener::new(&hover_area, "mouseenter", move |_| {
                pause.stop();
            }));
            let resume = autoplay.clone();
            listeners.push(EventListener::new(&hover_area, "mouseleave", move |_| {
                resume.start();
            }));
        }

        Self {
            _listeners: listeners,
            _autoplay: autoplay,
        }
    }
}

struct Autoplay {
    slider: Weak<SliderInner>,
    every_ms: u32,
    timer: RefCell<Option<Interval>>,
}

impl Autoplay {
    fn new(slider: Weak<SliderInner>, every_ms: u32) -> Self {
        Self {
            slider,
            every_ms,
            timer: RefCell::new(None),
        }
    }

    /// Replaces any running timer, so there is never more than one.
    fn start(&self) {
        let slider = self.slider.clone();
        let interval = Interval::new(self.every_ms, move || {
            if let Some(inner) = slider.upgrade() {
                inner.advance_wrapping();
            }
        });
        // Dropping the previous interval cancels it.
        drop(self.timer.borrow_mut().replace(interval));
    }

    fn stop(&self) {
        drop(self.timer.borrow_mut().take());
    }
}

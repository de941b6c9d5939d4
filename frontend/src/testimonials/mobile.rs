use std::rc::Rc;

use gloo_events::EventListener;

use super::slider::SliderInner;

/// Native horizontal scrolling; the script only keeps the dots in sync.
pub(super) struct MobileMode {
    _scroll: EventListener,
}

impl MobileMode {
    pub(super) fn attach(inner: &Rc<SliderInner>) -> Self {
        inner.clear_card_sizes();
        let weak = inner.weak();
        let scroll = EventListener::new(&inner.track, "scroll", move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.sync_dot_to_scroll();
            }
        });
        Self { _scroll: scroll }
    }
}

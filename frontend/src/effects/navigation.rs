use std::cell::Cell;
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, KeyboardEvent, Window};

use crate::config::NavigationConfig;
use crate::dom;
use crate::error::MountError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    Open,
    #[default]
    Closed,
}

/// Vertical extent of a `section[id]` on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

/// The section the reader is in. When ranges overlap the later section wins.
pub fn active_section(scroll_y: f64, offset: f64, sections: &[SectionBounds]) -> Option<&str> {
    sections
        .iter()
        .filter(|section| {
            let top = section.top - offset;
            scroll_y > top && scroll_y <= top + section.height
        })
        .last()
        .map(|section| section.id.as_str())
}

pub struct Navigation {
    inner: Rc<NavInner>,
    _listeners: Vec<EventListener>,
}

struct NavInner {
    window: Window,
    document: Document,
    header: Option<HtmlElement>,
    menu: Option<HtmlElement>,
    overlay: Option<HtmlElement>,
    links: Vec<HtmlElement>,
    sections: Vec<HtmlElement>,
    state: Cell<MenuState>,
    config: NavigationConfig,
}

impl Navigation {
    pub fn mount(
        window: &Window,
        document: &Document,
        config: &NavigationConfig,
    ) -> Result<Self, MountError> {
        let header = dom::by_id(document, "header");
        let menu = dom::by_id(document, "nav-menu");
        if header.is_none() && menu.is_none() {
            return Err(MountError::missing("#header"));
        }

        let inner = Rc::new(NavInner {
            window: window.clone(),
            document: document.clone(),
            header,
            menu,
            overlay: dom::by_id(document, "nav-overlay"),
            links: dom::query_all(document, ".nav__link"),
            sections: dom::query_all(document, "section[id]"),
            state: Cell::new(MenuState::Closed),
            config: config.clone(),
        });

        let mut listeners = Vec::new();
        let mut on_click = |target: &HtmlElement, open: bool| {
            let weak = Rc::downgrade(&inner);
            listeners.push(EventListener::new(target, "click", move |_| {
                if let Some(inner) = weak.upgrade() {
                    inner.set_menu(if open { MenuState::Open } else { MenuState::Closed });
                }
            }));
        };
        if let Some(toggle) = dom::by_id(document, "nav-toggle") {
            on_click(&toggle, true);
        }
        if let Some(close) = dom::by_id(document, "nav-close") {
            on_click(&close, false);
        }
        if let Some(overlay) = &inner.overlay {
            on_click(overlay, false);
        }
        for link in &inner.links {
            on_click(link, false);
        }

        {
            let weak = Rc::downgrade(&inner);
            listeners.push(EventListener::new(document, "keydown", move |event| {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                let escape = event
                    .dyn_ref::<KeyboardEvent>()
                    .map(|key| key.key() == "Escape")
                    .unwrap_or(false);
                if escape && inner.state.get() == MenuState::Open {
                    inner.set_menu(MenuState::Closed);
                }
            }));
        }
        {
            let weak = Rc::downgrade(&inner);
            listeners.push(EventListener::new(window, "scroll", move |_| {
                if let Some(inner) = weak.upgrade() {
                    inner.on_scroll();
                }
            }));
        }

        inner.on_scroll();
        Ok(Self {
            inner,
            _listeners: listeners,
        })
    }

    pub fn menu_state(&self) -> MenuState {
        self.inner.state.get()
    }

    pub fn open_menu(&self) {
        self.inner.set_menu(MenuState::Open);
    }

    pub fn close_menu(&self) {
        self.inner.set_menu(MenuState::Closed);
    }
}

impl NavInner {
    fn set_menu(&self, state: MenuState) {
        let Some(menu) = &self.menu else {
            return;
        };
        let open = state == MenuState::Open;
        dom::set_class(menu, "show", open);
        if let Some(overlay) = &self.overlay {
            dom::set_class(overlay, "show", open);
        }
        dom::lock_scroll(&self.document, open);
        self.state.set(state);
    }

    fn on_scroll(&self) {
        let scroll_y = dom::scroll_y(&self.window);
        if let Some(header) = &self.header {
            dom::set_class(header, "scrolled", scroll_y > self.config.scrolled_after_px);
        }
        self.highlight_link(scroll_y);
    }

    fn highlight_link(&self, scroll_y: f64) {
        let bounds: Vec<SectionBounds> = self
            .sections
            .iter()
            .map(|section| SectionBounds {
                id: section.id(),
                top: f64::from(section.offset_top()),
                height: f64::from(section.offset_height()),
            })
            .collect();
        let Some(active) = active_section(scroll_y, self.config.section_offset_px, &bounds) else {
            return;
        };
        let href = format!("#{}", active);
        for link in &self.links {
            let current = link.get_attribute("href").as_deref() == Some(href.as_str());
            dom::set_class(link, "active", current);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections() -> Vec<SectionBounds> {
        [("home", 0.0, 800.0), ("about", 800.0, 600.0), ("products", 1400.0, 1000.0)]
            .iter()
            .map(|(id, top, height)| SectionBounds {
                id: id.to_string(),
                top: *top,
                height: *height,
            })
            .collect()
    }

    #[test]
    fn section_becomes_active_before_its_top_edge() {
        let sections = sections();
        assert_eq!(active_section(0.0, 100.0, &sections), Some("home"));
        assert_eq!(active_section(650.0, 100.0, &sections), Some("home"));
        assert_eq!(active_section(701.0, 100.0, &sections), Some("about"));
        assert_eq!(active_section(1350.0, 100.0, &sections), Some("products"));
    }

    #[test]
    fn past_the_last_section_nothing_is_active() {
        assert_eq!(active_section(5000.0, 100.0, &sections()), None);
    }

    #[test]
    fn overlapping_sections_prefer_the_later_one() {
        let sections = vec![
            SectionBounds { id: "a".into(), top: 0.0, height: 1000.0 },
            SectionBounds { id: "b".into(), top: 400.0, height: 200.0 },
        ];
        assert_eq!(active_section(350.0, 100.0, &sections), Some("b"));
    }
}

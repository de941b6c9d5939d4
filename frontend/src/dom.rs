//! Small helpers over `web_sys` shared by the page modules.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::error::MountError;

pub fn window() -> Result<Window, MountError> {
    web_sys::window().ok_or_else(|| MountError::missing("window"))
}

pub fn document() -> Result<Document, MountError> {
    window()?
        .document()
        .ok_or_else(|| MountError::missing("document"))
}

pub fn by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn require_id(document: &Document, id: &str) -> Result<HtmlElement, MountError> {
    by_id(document, id).ok_or_else(|| MountError::missing(format!("#{}", id)))
}

pub fn query(root: &impl AsRef<Element>, selector: &str) -> Option<HtmlElement> {
    root.as_ref()
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

pub fn query_doc(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// All matches of `selector` that are `HtmlElement`s, in document order.
pub fn query_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    match document.query_selector_all(selector) {
        Ok(list) => (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect(),
        Err(_) => Vec::new(),
    }
}

pub fn query_all_in(root: &impl AsRef<Element>, selector: &str) -> Vec<HtmlElement> {
    match root.as_ref().query_selector_all(selector) {
        Ok(list) => (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect(),
        Err(_) => Vec::new(),
    }
}

pub fn add_class(el: &Element, class: &str) {
    let _ = el.class_list().add_1(class);
}

pub fn remove_class(el: &Element, class: &str) {
    let _ = el.class_list().remove_1(class);
}

pub fn set_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

pub fn has_class(el: &Element, class: &str) -> bool {
    el.class_list().contains(class)
}

pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

pub fn clear_style(el: &HtmlElement, property: &str) {
    let _ = el.style().remove_property(property);
}

pub fn data_attr(el: &Element, name: &str) -> Option<String> {
    el.get_attribute(&format!("data-{}", name))
}

pub fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn inner_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0)
}

pub fn inner_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0)
}

pub fn body(document: &Document) -> Option<HtmlElement> {
    document.body()
}

/// Locks or releases page scrolling by toggling `overflow` on `<body>`.
pub fn lock_scroll(document: &Document, locked: bool) {
    if let Some(body) = body(document) {
        if locked {
            set_style(&body, "overflow", "hidden");
        } else {
            clear_style(&body, "overflow");
        }
    }
}

pub fn is_rtl(document: &Document) -> bool {
    document
        .document_element()
        .and_then(|root| root.get_attribute("dir"))
        .map(|dir| dir.eq_ignore_ascii_case("rtl"))
        .unwrap_or(false)
}

pub fn ready_state(document: &Document) -> String {
    document.ready_state()
}

pub fn has_touch(window: &Window) -> bool {
    js_sys::Reflect::has(window, &"ontouchstart".into()).unwrap_or(false)
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

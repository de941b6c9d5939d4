use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, MouseEvent, Window};

use crate::config::PointerConfig;
use crate::dom;
use crate::error::MountError;

const TARGETS: &str = ".btn, .products__filter, .footer__social-link";

/// Offset that pulls an element toward the pointer, measured from the
/// element's center and scaled by `strength`.
pub fn magnetic_offset(
    pointer: (f64, f64),
    origin: (f64, f64),
    size: (f64, f64),
    strength: f64,
) -> (f64, f64) {
    let x = pointer.0 - origin.0 - size.0 / 2.0;
    let y = pointer.1 - origin.1 - size.1 / 2.0;
    (x * strength, y * strength)
}

pub struct MagneticButtons {
    _listeners: Vec<EventListener>,
}

impl MagneticButtons {
    pub fn mount(
        window: &Window,
        document: &Document,
        config: &PointerConfig,
    ) -> Result<Self, MountError> {
        if dom::has_touch(window) {
            return Err(MountError::Unsupported("touch screen"));
        }
        let buttons = dom::query_all(document, TARGETS);
        if buttons.is_empty() {
            return Err(MountError::missing(".btn"));
        }

        let mut listeners = Vec::with_capacity(buttons.len() * 2);
        for button in buttons {
            let target = button.clone();
            let strength = config.magnetic_strength;
            listeners.push(EventListener::new(&button, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let rect = target.get_bounding_client_rect();
                let (x, y) = magnetic_offset(
                    (f64::from(event.client_x()), f64::from(event.client_y())),
                    (rect.left(), rect.top()),
                    (rect.width(), rect.height()),
                    strength,
                );
                dom::set_style(&target, "transform", &format!("translate({}px, {}px)", x, y));
            }));
            let target = button.clone();
            listeners.push(EventListener::new(&button, "mouseleave", move |_| {
                dom::set_style(&target, "transform", "translate(0, 0)");
            }));
        }

        Ok(Self {
            _listeners: listeners,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_at_center_gives_no_offset() {
        assert_eq!(
            magnetic_offset((150.0, 40.0), (100.0, 20.0), (100.0, 40.0), 0.3),
            (0.0, 0.0)
        );
    }

    #[test]
    fn offset_is_scaled_distance_from_center() {
        let (x, y) = magnetic_offset((200.0, 20.0), (100.0, 20.0), (100.0, 40.0), 0.3);
        assert!((x - 15.0).abs() < 1e-9);
        assert!((y + 6.0).abs() < 1e-9);
    }
}

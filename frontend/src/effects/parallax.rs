use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, MouseEvent, Window};

use crate::config::ParallaxConfig;
use crate::dom;
use crate::error::MountError;
use crate::timing::Throttle;

const LAYERS: &str = "[data-parallax]";
const HERO_LAYERS: &str = ".hero__particle, .hero__stats";
const HERO: &str = ".hero";
const PARTICLES: &str = ".hero__particle";

/// Speed of the `index`-th layer; later layers move faster.
pub fn layer_speed(base: f64, step: f64, index: usize) -> f64 {
    base + step * index as f64
}

/// Vertical shift of a `[data-parallax]` element.
pub fn scroll_shift(scroll_y: f64, speed: f64) -> f64 {
    -(scroll_y * speed)
}

/// Pointer offset relative to the hero's center, scaled by `speed`.
pub fn pointer_shift(pointer: (f64, f64), center: (f64, f64), speed: f64) -> (f64, f64) {
    ((pointer.0 - center.0) * speed, (pointer.1 - center.1) * speed)
}

pub struct Parallax {
    _listeners: Vec<EventListener>,
}

impl Parallax {
    pub fn mount(
        window: &Window,
        document: &Document,
        config: &ParallaxConfig,
    ) -> Result<Self, MountError> {
        let layers: Vec<(HtmlElement, f64)> = dom::query_all(document, LAYERS)
            .into_iter()
            .map(|layer| {
                let speed = dom::data_attr(&layer, "parallax")
                    .and_then(|raw| raw.trim().parse::<f64>().ok())
                    .unwrap_or(config.default_speed);
                (layer, speed)
            })
            .collect();
        let hero_layers = dom::query_all(document, HERO_LAYERS);
        let hero = dom::query_doc(document, HERO);
        if layers.is_empty() && hero_layers.is_empty() && hero.is_none() {
            return Err(MountError::missing(HERO));
        }

        let mut listeners = Vec::new();
        if !layers.is_empty() || !hero_layers.is_empty() {
            let window_for_scroll = window.clone();
            let config_for_scroll = config.clone();
            let mut throttle = Throttle::new(config.throttle_ms);
            listeners.push(EventListener::new(window, "scroll", move |_| {
                if !throttle.ready(dom::now_ms()) {
                    return;
                }
                let scroll_y = dom::scroll_y(&window_for_scroll);
                for (layer, speed) in &layers {
                    let shift = scroll_shift(scroll_y, *speed);
                    dom::set_style(layer, "transform", &format!("translate3d(0, {}px, 0)", shift));
                }
                for (index, layer) in hero_layers.iter().enumerate() {
                    let speed = layer_speed(
                        config_for_scroll.hero_base_speed,
                        config_for_scroll.hero_speed_step,
                        index,
                    );
                    dom::set_style(layer, "transform", &format!("translateY({}px)", scroll_y * speed));
                }
            }));
        }

        if let Some(hero) = hero {
            let particles = dom::query_all_in(&hero, PARTICLES);
            let hero_for_move = hero.clone();
            let config = config.clone();
            listeners.push(EventListener::new(&hero, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let rect = hero_for_move.get_bounding_client_rect();
                let center = (
                    rect.left() + rect.width() / 2.0,
                    rect.top() + rect.height() / 2.0,
                );
                let pointer = (f64::from(event.client_x()), f64::from(event.client_y()));
                for (index, particle) in particles.iter().enumerate() {
                    let speed =
                        layer_speed(config.mouse_base_speed, config.mouse_speed_step, index);
                    let (x, y) = pointer_shift(pointer, center, speed);
                    dom::set_style(particle, "transform", &format!("translate({}px, {}px)", x, y));
                }
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

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn later_layers_move_faster() {
        assert!(close(layer_speed(0.1, 0.05, 0), 0.1));
        assert!(close(layer_speed(0.1, 0.05, 2), 0.2));
        assert!(close(layer_speed(0.02, 0.01, 3), 0.05));
    }

    #[test]
    fn scroll_moves_layer_up() {
        assert_eq!(scroll_shift(200.0, 0.5), -100.0);
        assert_eq!(scroll_shift(0.0, 0.5), 0.0);
    }

    #[test]
    fn pointer_at_center_does_not_move_particles() {
        assert_eq!(pointer_shift((500.0, 300.0), (500.0, 300.0), 0.03), (0.0, 0.0));
        let (x, y) = pointer_shift((600.0, 200.0), (500.0, 300.0), 0.02);
        assert!(close(x, 2.0));
        assert!(close(y, -2.0));
    }
}

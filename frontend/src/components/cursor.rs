use stylist::Style;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, MouseEvent, Window};
use yew::prelude::*;
use yew::AppHandle;
use yew_hooks::prelude::*;

use crate::config::PointerConfig;
use crate::dom;
use crate::error::MountError;

const INTERACTIVE: &str = "a, button, .btn, .product__card, .service__card";

const CURSOR_CSS: &str = r#"
    pointer-events: none;
    position: fixed;
    z-index: 99999;
    mix-blend-mode: difference;

    .cursor-dot {
        position: absolute;
        width: 8px;
        height: 8px;
        background: white;
        border-radius: 50%;
        transform: translate(-50%, -50%);
        transition: transform 0.1s ease;
    }
    .cursor-outline {
        position: absolute;
        width: 40px;
        height: 40px;
        border: 2px solid rgba(255, 255, 255, 0.5);
        border-radius: 50%;
        transform: translate(-50%, -50%);
        transition: all 0.15s ease;
    }
    &.hover .cursor-outline {
        width: 60px;
        height: 60px;
        border-color: var(--primary);
        background: rgba(0, 135, 168, 0.1);
    }
    &.hover .cursor-dot {
        transform: translate(-50%, -50%) scale(0);
    }
"#;

/// Whether the element under the pointer (or one of its ancestors) is interactive.
fn over_interactive(event: &MouseEvent) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|el| el.closest(INTERACTIVE).ok().flatten())
        .is_some()
}

#[function_component(CursorOverlay)]
pub fn cursor_overlay() -> Html {
    let position = use_state(|| (0, 0));
    let hover = use_state(|| false);
    let style = use_memo(|_| Style::new(CURSOR_CSS).ok(), ());

    {
        let position = position.clone();
        use_event_with_window("mousemove", move |e: MouseEvent| {
            position.set((e.client_x(), e.client_y()));
        });
    }
    {
        let hover = hover.clone();
        use_event_with_window("mouseover", move |e: MouseEvent| {
            let now = over_interactive(&e);
            if *hover != now {
                hover.set(now);
            }
        });
    }

    let (x, y) = *position;
    let class = classes!(
        "custom-cursor",
        (*style).as_ref().map(|style| style.get_class_name().to_string()),
        (*hover).then(|| "hover"),
    );

    html! {
        <div class={class} style={format!("left: {}px; top: {}px;", x, y)} aria-hidden="true">
            <div class="cursor-dot"></div>
            <div class="cursor-outline"></div>
        </div>
    }
}

/// Custom pointer for wide screens without touch input.
pub struct CursorEffects {
    _app: AppHandle<CursorOverlay>,
}

impl CursorEffects {
    pub fn mount(
        window: &Window,
        document: &Document,
        config: &PointerConfig,
    ) -> Result<Self, MountError> {
        if dom::inner_width(window) < config.cursor_min_width {
            return Err(MountError::Unsupported("narrow viewport"));
        }
        if dom::has_touch(window) {
            return Err(MountError::Unsupported("touch screen"));
        }

        let body = document.body().ok_or_else(|| MountError::missing("body"))?;
        let host = document.create_element("div")?;
        host.set_id("cursor-host");
        body.append_child(&host)?;

        let app = yew::Renderer::<CursorOverlay>::with_root(host).render();
        Ok(Self { _app: app })
    }
}

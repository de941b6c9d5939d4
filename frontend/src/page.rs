use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use log::{debug, info, warn};
use web_sys::{Document, Window};

use crate::components::cursor::CursorEffects;
use crate::components::notification::NotificationCenter;
use crate::config::{LandingConfig, CONFIG_ELEMENT_ID};
use crate::contact::form::ContactForm;
use crate::dom;
use crate::effects::hero_stats::HeroStats;
use crate::effects::magnetic::MagneticButtons;
use crate::effects::navigation::Navigation;
use crate::effects::parallax::Parallax;
use crate::effects::preloader::Preloader;
use crate::effects::product_filter::ProductFilter;
use crate::effects::scroll_animations::ScrollAnimations;
use crate::effects::scroll_effects::ScrollEffects;
use crate::error::MountError;
use crate::testimonials::slider::TestimonialsSlider;

thread_local! {
    static PAGE: RefCell<Option<LandingPage>> = RefCell::new(None);
}

/// Every module of the page. A module whose markup is missing is `None`
/// and the rest of the page still works.
pub struct LandingPage {
    pub config: LandingConfig,
    pub preloader: Option<Preloader>,
    pub navigation: Option<Navigation>,
    pub scroll: Option<ScrollEffects>,
    pub animations: Option<ScrollAnimations>,
    pub parallax: Option<Parallax>,
    pub stats: Option<HeroStats>,
    pub filter: Option<ProductFilter>,
    pub slider: Option<TestimonialsSlider>,
    pub notifications: Option<Rc<NotificationCenter>>,
    pub contact: Option<ContactForm>,
    pub magnetic: Option<MagneticButtons>,
    pub cursor: Option<CursorEffects>,
}

/// Reads the optional JSON override block; falls back to defaults on any problem.
pub fn read_config(document: &Document) -> LandingConfig {
    let raw = dom::by_id(document, CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
        .unwrap_or_default();
    match LandingConfig::from_json(&raw) {
        Ok(config) => config,
        Err(e) => {
            warn!("{}; using defaults", e);
            LandingConfig::default()
        }
    }
}

fn attach<T>(name: &str, result: Result<T, MountError>) -> Option<T> {
    match result {
        Ok(module) => Some(module),
        Err(e @ (MountError::MissingElement(_) | MountError::Unsupported(_))) => {
            debug!("{} skipped: {}", name, e);
            None
        }
        Err(e) => {
            warn!("{} failed to mount: {}", name, e);
            None
        }
    }
}

impl LandingPage {
    pub fn mount(window: &Window, document: &Document) -> Self {
        let config = read_config(document);
        Self::mount_with(window, document, config)
    }

    pub fn mount_with(window: &Window, document: &Document, config: LandingConfig) -> Self {
        let notifications = attach(
            "notifications",
            NotificationCenter::mount(document, &config.notification),
        )
        .map(Rc::new);

        let page = Self {
            preloader: attach("preloader", Preloader::mount(window, document, &config.preloader)),
            navigation: attach(
                "navigation",
                Navigation::mount(window, document, &config.navigation),
            ),
            scroll: attach("scroll effects", ScrollEffects::mount(window, document, &config.scroll)),
            animations: attach(
                "scroll animations",
                ScrollAnimations::mount(document, &config.animations),
            ),
            parallax: attach("parallax", Parallax::mount(window, document, &config.parallax)),
            stats: attach("hero stats", HeroStats::mount(document, &config.stats)),
            filter: attach("product filter", ProductFilter::mount(document, &config.filter)),
            slider: attach(
                "testimonials",
                TestimonialsSlider::mount(window, document, &config.slider),
            ),
            contact: attach(
                "contact form",
                ContactForm::mount(document, &config.form, notifications.clone()),
            ),
            notifications,
            magnetic: attach(
                "magnetic buttons",
                MagneticButtons::mount(window, document, &config.pointer),
            ),
            cursor: attach("cursor", CursorEffects::mount(window, document, &config.pointer)),
            config,
        };
        info!("landing page ready ({} modules active)", page.active_modules());
        page
    }

    pub fn active_modules(&self) -> usize {
        [
            self.preloader.is_some(),
            self.navigation.is_some(),
            self.scroll.is_some(),
            self.animations.is_some(),
            self.parallax.is_some(),
            self.stats.is_some(),
            self.filter.is_some(),
            self.slider.is_some(),
            self.notifications.is_some(),
            self.contact.is_some(),
            self.magnetic.is_some(),
            self.cursor.is_some(),
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }
}

fn install(window: &Window, document: &Document) {
    let page = LandingPage::mount(window, document);
    PAGE.with(|slot| *slot.borrow_mut() = Some(page));
}

/// Mounts the page once the document is parsed and keeps it alive for the
/// lifetime of the tab.
pub fn start() -> Result<(), MountError> {
    let window = dom::window()?;
    let document = dom::document()?;
    info!("starting landing page");

    if dom::ready_state(&document) == "loading" {
        let (win, doc) = (window.clone(), document.clone());
        EventListener::once(&document, "DOMContentLoaded", move |_| install(&win, &doc)).forget();
    } else {
        install(&window, &document);
    }
    Ok(())
}

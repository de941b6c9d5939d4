use gloo_timers::callback::Timeout;
use log::warn;
use web_sys::Document;

use crate::config::AnimationConfig;
use crate::dom;
use crate::error::MountError;
use crate::visibility::VisibilityWatcher;

const TARGETS: &str = ".section__title, .section__subtitle, .about__content, \
    .about__image-container, .product__card, .service__card, .why-us__feature, \
    .testimonial__card, .contact__form, .contact__info, .footer__column";
const FALLBACK_ANIMATION: &str = "fadeInUp";

/// Entrance animation for one element.
#[derive(Debug, Clone, PartialEq)]
pub struct EntrancePlan {
    pub delay_ms: u32,
    pub animation: String,
}

impl EntrancePlan {
    /// Markup attributes win; otherwise the delay staggers by position and
    /// the animation is drawn with `roll` in `[0, 1)`.
    pub fn for_element(
        index: usize,
        delay_attr: Option<&str>,
        animation_attr: Option<&str>,
        roll: f64,
        config: &AnimationConfig,
    ) -> Self {
        let delay_ms = delay_attr
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .unwrap_or_else(|| stagger_delay(index, config));
        let animation = animation_attr
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| pick_animation(roll, config).to_string());
        Self { delay_ms, animation }
    }
}

pub fn stagger_delay(index: usize, config: &AnimationConfig) -> u32 {
    let group = config.stagger_group.max(1);
    (index % group) as u32 * config.stagger_ms
}

pub fn pick_animation(roll: f64, config: &AnimationConfig) -> &str {
    let pool = config.weighted_pool.min(config.names.len());
    if pool == 0 {
        return FALLBACK_ANIMATION;
    }
    let slot = ((roll.clamp(0.0, 1.0) * pool as f64) as usize).min(pool - 1);
    &config.names[slot]
}

pub struct ScrollAnimations {
    _watcher: VisibilityWatcher,
}

impl ScrollAnimations {
    pub fn mount(document: &Document, config: &AnimationConfig) -> Result<Self, MountError> {
        let targets = dom::query_all(document, TARGETS);
        if targets.is_empty() {
            return Err(MountError::missing(".section__title"));
        }

        let watcher = VisibilityWatcher::new(config.threshold, &config.root_margin, |target| {
            let delay = dom::data_attr(&target, "delay")
                .and_then(|raw| raw.parse::<u32>().ok())
                .unwrap_or(0);
            let animation = dom::data_attr(&target, "animation")
                .unwrap_or_else(|| FALLBACK_ANIMATION.to_string());
            Timeout::new(delay, move || {
                dom::add_class(&target, "animated");
                dom::add_class(&target, &animation);
            })
            .forget();
        })?;

        for (index, target) in targets.iter().enumerate() {
            let plan = EntrancePlan::for_element(
                index,
                dom::data_attr(target, "delay").as_deref(),
                dom::data_attr(target, "animation").as_deref(),
                js_sys::Math::random(),
                config,
            );
            dom::add_class(target, "will-animate");
            let _ = target.set_attribute("data-delay", &plan.delay_ms.to_string());
            let _ = target.set_attribute("data-animation", &plan.animation);
            watcher.observe(target);
        }

        reveal_titles(document);
        Ok(Self { _watcher: watcher })
    }
}

/// Wraps each section title once so the stylesheet can slide its text in.
fn reveal_titles(document: &Document) {
    for title in dom::query_all(document, ".section__title") {
        if dom::has_class(&title, "text-reveal-ready") {
            continue;
        }
        let Ok(wrapper) = document.create_element("span") else {
            warn!("could not create text reveal wrapper");
            return;
        };
        dom::add_class(&wrapper, "text-reveal-inner");
        while let Some(child) = title.first_child() {
            let _ = wrapper.append_child(&child);
        }
        let _ = title.append_child(&wrapper);
        dom::add_class(&title, "text-reveal-ready");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_stagger_in_groups_of_four() {
        let config = AnimationConfig::default();
        let delays: Vec<u32> = (0..6).map(|i| stagger_delay(i, &config)).collect();
        assert_eq!(delays, vec![0, 100, 200, 300, 0, 100]);
    }

    #[test]
    fn random_pick_stays_in_weighted_pool() {
        let config = AnimationConfig::default();
        assert_eq!(pick_animation(0.0, &config), "fadeInUp");
        assert_eq!(pick_animation(0.5, &config), "fadeInRight");
        assert_eq!(pick_animation(0.99, &config), "fadeInLeft");
        assert_eq!(pick_animation(1.0, &config), "fadeInLeft");
    }

    #[test]
    fn markup_attributes_override_plan() {
        let config = AnimationConfig::default();
        let plan = EntrancePlan::for_element(5, Some("250"), Some("rotateIn"), 0.0, &config);
        assert_eq!(
            plan,
            EntrancePlan {
                delay_ms: 250,
                animation: "rotateIn".into()
            }
        );
        let plan = EntrancePlan::for_element(5, Some("soon"), Some(" "), 0.7, &config);
        assert_eq!(plan.delay_ms, 100);
        assert_eq!(plan.animation, "fadeInLeft");
    }

    #[test]
    fn empty_name_list_falls_back() {
        let config = AnimationConfig {
            names: Vec::new(),
            ..AnimationConfig::default()
        };
        assert_eq!(pick_animation(0.4, &config), FALLBACK_ANIMATION);
    }
}

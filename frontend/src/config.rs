use log::Level;
use serde::Deserialize;

use crate::error::ConfigError;

/// Id of the optional `<script type="application/json">` block that overrides defaults.
pub const CONFIG_ELEMENT_ID: &str = "landing-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose while developing locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Every tunable of the page. Read once on start; missing keys keep their default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LandingConfig {
    pub preloader: PreloaderConfig,
    pub navigation: NavigationConfig,
    pub scroll: ScrollConfig,
    pub animations: AnimationConfig,
    pub parallax: ParallaxConfig,
    pub stats: StatsConfig,
    pub filter: FilterConfig,
    pub slider: SliderConfig,
    pub form: FormConfig,
    pub notification: NotificationConfig,
    pub pointer: PointerConfig,
}

impl LandingConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(raw)?)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PreloaderConfig {
    pub hide_delay_ms: u32,
}

impl Default for PreloaderConfig {
    fn default() -> Self {
        Self { hide_delay_ms: 500 }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub scrolled_after_px: f64,
    /// Sections count as current this many pixels before their top edge.
    pub section_offset_px: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            scrolled_after_px: 50.0,
            section_offset_px: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub back_to_top_after_px: f64,
    pub throttle_ms: f64,
    pub fade_in_threshold: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            back_to_top_after_px: 500.0,
            throttle_ms: 16.0,
            fade_in_threshold: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    pub threshold: f64,
    pub root_margin: String,
    pub stagger_ms: u32,
    pub stagger_group: usize,
    pub names: Vec<String>,
    /// Only the first `weighted_pool` names are drawn at random.
    pub weighted_pool: usize,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            threshold: 0.15,
            root_margin: "0px 0px -50px 0px".to_string(),
            stagger_ms: 100,
            stagger_group: 4,
            names: ["fadeInUp", "fadeInRight", "fadeInLeft", "scaleIn", "rotateIn"]
                .iter()
                .map(|name| name.to_string())
                .collect(),
            weighted_pool: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    pub default_speed: f64,
    pub hero_base_speed: f64,
    pub hero_speed_step: f64,
    pub mouse_base_speed: f64,
    pub mouse_speed_step: f64,
    pub throttle_ms: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            default_speed: 0.5,
            hero_base_speed: 0.1,
            hero_speed_step: 0.05,
            mouse_base_speed: 0.02,
            mouse_speed_step: 0.01,
            throttle_ms: 16.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Numerals {
    Latin,
    Persian,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub duration_ms: f64,
    pub threshold: f64,
    pub numerals: Numerals,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            duration_ms: 2000.0,
            threshold: 0.5,
            numerals: Numerals::Latin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub show_delay_ms: u32,
    pub hide_delay_ms: u32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            show_delay_ms: 10,
            hide_delay_ms: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    /// Widths at or below this use native scrolling.
    pub mobile_max_width: f64,
    pub three_up_min_width: f64,
    pub two_up_min_width: f64,
    pub gap_px: f64,
    pub mobile_gap_px: f64,
    pub swipe_threshold_px: f64,
    pub autoplay_ms: u32,
    pub resize_debounce_ms: u32,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            mobile_max_width: 767.0,
            three_up_min_width: 1024.0,
            two_up_min_width: 768.0,
            gap_px: 24.0,
            mobile_gap_px: 12.0,
            swipe_threshold_px: 50.0,
            autoplay_ms: 5000,
            resize_debounce_ms: 150,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub send_delay_ms: u32,
    pub reset_delay_ms: u32,
    pub sending_label: String,
    pub sent_label: String,
    pub thanks_message: String,
    pub messages: FieldMessages,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            send_delay_ms: 1500,
            reset_delay_ms: 2000,
            sending_label: "<i class=\"fas fa-spinner fa-spin\"></i> در حال ارسال...".to_string(),
            sent_label: "<i class=\"fas fa-check\"></i> پیام ارسال شد!".to_string(),
            thanks_message: "با تشکر! به زودی با شما تماس می‌گیریم.".to_string(),
            messages: FieldMessages::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldMessages {
    pub required: String,
    pub email: String,
    pub phone: String,
}

impl Default for FieldMessages {
    fn default() -> Self {
        Self {
            required: "این فیلد الزامی است".to_string(),
            email: "لطفاً یک آدرس ایمیل معتبر وارد کنید".to_string(),
            phone: "لطفاً یک شماره تلفن معتبر وارد کنید".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub visible_ms: u32,
    pub exit_ms: u32,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            visible_ms: 4000,
            exit_ms: 300,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    pub magnetic_strength: f64,
    pub cursor_min_width: f64,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            magnetic_strength: 0.3,
            cursor_min_width: 1024.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_block_uses_defaults() {
        let config = LandingConfig::from_json("  ").unwrap();
        assert_eq!(config, LandingConfig::default());
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = LandingConfig::from_json(
            r#"{ "slider": { "autoplay_ms": 8000 }, "stats": { "numerals": "persian" } }"#,
        )
        .unwrap();
        assert_eq!(config.slider.autoplay_ms, 8000);
        assert_eq!(config.slider.gap_px, 24.0);
        assert_eq!(config.stats.numerals, Numerals::Persian);
        assert_eq!(config.form, FormConfig::default());
    }

    #[test]
    fn malformed_block_is_an_error() {
        assert!(matches!(
            LandingConfig::from_json("{ slider: }"),
            Err(ConfigError::Parse(_))
        ));
    }
}

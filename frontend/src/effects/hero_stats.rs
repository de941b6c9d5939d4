use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_render::{request_animation_frame, AnimationFrame};
use log::warn;
use web_sys::{Document, HtmlElement};

use crate::config::{Numerals, StatsConfig};
use crate::dom;
use crate::error::MountError;
use crate::visibility::VisibilityWatcher;

const HERO_ID: &str = "home";
const COUNTERS: &str = ".hero__stat-number[data-count]";
const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];
const PERSIAN_SEPARATOR: char = '٬';

/// Exponential ease-out over `t` in `[0, 1]`; exactly 1 at the end.
pub fn ease_out_expo(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2f64.powf(-10.0 * t)
    }
}

/// Groups thousands and renders the digits in the requested script.
pub fn format_count(value: u64, numerals: Numerals) -> String {
    let digits = value.to_string();
    let separator = match numerals {
        Numerals::Latin => ',',
        Numerals::Persian => PERSIAN_SEPARATOR,
    };
    let mut out = String::with_capacity(digits.len() * 2);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        match numerals {
            Numerals::Latin => out.push(digit),
            Numerals::Persian => {
                let index = digit.to_digit(10).unwrap_or(0) as usize;
                out.push(PERSIAN_DIGITS[index]);
            }
        }
    }
    out
}

/// One counter counting from 0 up to `target` over `duration_ms`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterAnimation {
    pub target: u64,
    pub duration_ms: f64,
}

impl CounterAnimation {
    pub fn value_at(&self, elapsed_ms: f64) -> u64 {
        if self.duration_ms <= 0.0 {
            return self.target;
        }
        let eased = ease_out_expo(elapsed_ms / self.duration_ms);
        ((self.target as f64) * eased).floor() as u64
    }

    pub fn finished(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.duration_ms
    }
}

pub struct HeroStats {
    inner: Rc<StatsInner>,
    _watcher: VisibilityWatcher,
}

struct StatsInner {
    counters: Vec<(HtmlElement, CounterAnimation)>,
    numerals: Numerals,
    started_at: Cell<Option<f64>>,
    frame: RefCell<Option<AnimationFrame>>,
}

impl HeroStats {
    pub fn mount(document: &Document, config: &StatsConfig) -> Result<Self, MountError> {
        let hero = dom::require_id(document, HERO_ID)?;
        let counters: Vec<(HtmlElement, CounterAnimation)> = dom::query_all(document, COUNTERS)
            .into_iter()
            .filter_map(|stat| {
                let raw = dom::data_attr(&stat, "count").unwrap_or_default();
                match raw.trim().parse::<u64>() {
                    Ok(target) => Some((
                        stat,
                        CounterAnimation {
                            target,
                            duration_ms: config.duration_ms,
                        },
                    )),
                    Err(_) => {
                        warn!("skipping hero counter with data-count {:?}", raw);
                        None
                    }
                }
            })
            .collect();
        if counters.is_empty() {
            return Err(MountError::missing(COUNTERS));
        }

        let inner = Rc::new(StatsInner {
            counters,
            numerals: config.numerals,
            started_at: Cell::new(None),
            frame: RefCell::new(None),
        });

        let weak = Rc::downgrade(&inner);
        let watcher = VisibilityWatcher::new(config.threshold, "0px", move |_| {
            if let Some(inner) = weak.upgrade() {
                inner.request_frame();
            }
        })?;
        watcher.observe(&hero);

        Ok(Self {
            inner,
            _watcher: watcher,
        })
    }

    pub fn running(&self) -> bool {
        self.inner.frame.borrow().is_some()
    }
}

impl StatsInner {
    fn request_frame(self: &Rc<Self>) {
        if self.frame.borrow().is_some() {
            return;
        }
        let weak = Rc::downgrade(self);
        let handle = request_animation_frame(move |timestamp| {
            if let Some(inner) = weak.upgrade() {
                inner.frame.borrow_mut().take();
                inner.tick(timestamp);
            }
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn tick(self: &Rc<Self>, timestamp: f64) {
        let started = self.started_at.get().unwrap_or(timestamp);
        self.started_at.set(Some(started));
        let elapsed = timestamp - started;

        let mut done = true;
        for (stat, counter) in &self.counters {
            stat.set_text_content(Some(&format_count(counter.value_at(elapsed), self.numerals)));
            done &= counter.finished(elapsed);
        }
        if !done {
            self.request_frame();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easing_starts_at_zero_and_ends_at_one() {
        assert_eq!(ease_out_expo(0.0), 0.0);
        assert_eq!(ease_out_expo(1.0), 1.0);
        assert_eq!(ease_out_expo(3.0), 1.0);
        assert!(ease_out_expo(0.5) > 0.95);
    }

    #[test]
    fn counter_is_monotonic_and_lands_on_target() {
        let counter = CounterAnimation {
            target: 1500,
            duration_ms: 2000.0,
        };
        let mut last = 0;
        for step in 0..=125 {
            let value = counter.value_at(step as f64 * 16.0);
            assert!(value >= last);
            assert!(value <= 1500);
            last = value;
        }
        assert_eq!(counter.value_at(2000.0), 1500);
        assert!(counter.finished(2000.0));
        assert!(!counter.finished(1999.0));
    }

    #[test]
    fn thousands_are_grouped() {
        assert_eq!(format_count(0, Numerals::Latin), "0");
        assert_eq!(format_count(999, Numerals::Latin), "999");
        assert_eq!(format_count(1000, Numerals::Latin), "1,000");
        assert_eq!(format_count(1234567, Numerals::Latin), "1,234,567");
    }

    #[test]
    fn persian_digits_are_used_when_asked() {
        assert_eq!(format_count(25, Numerals::Persian), "۲۵");
        assert_eq!(format_count(15000, Numerals::Persian), "۱۵٬۰۰۰");
    }
}

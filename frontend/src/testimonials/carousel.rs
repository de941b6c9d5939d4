//! Pure paging state of the testimonial carousel.

use crate::config::SliderConfig;

/// Reading direction of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

/// A visual control the user (or a swipe) activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Next,
    Prev,
}

/// What a control does to the index once direction is taken into account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Forward,
    Backward,
}

impl Direction {
    pub fn from_rtl(rtl: bool) -> Self {
        if rtl {
            Direction::Rtl
        } else {
            Direction::Ltr
        }
    }

    /// In RTL the "next" arrow points at lower indices.
    pub fn resolve(self, control: Control) -> Step {
        match (self, control) {
            (Direction::Ltr, Control::Next) | (Direction::Rtl, Control::Prev) => Step::Forward,
            (Direction::Ltr, Control::Prev) | (Direction::Rtl, Control::Next) => Step::Backward,
        }
    }

    /// Maps a horizontal swipe (`start_x - end_x`) to a control, if it was long enough.
    pub fn swipe(self, diff: f64, threshold: f64) -> Option<Control> {
        if diff.abs() <= threshold {
            return None;
        }
        let leftwards = diff > 0.0;
        let control = match (self, leftwards) {
            (Direction::Ltr, true) | (Direction::Rtl, false) => Control::Next,
            (Direction::Ltr, false) | (Direction::Rtl, true) => Control::Prev,
        };
        Some(control)
    }

    /// Track translation for a page offset, flipped so RTL content moves the other way.
    pub fn signed_offset(self, offset: f64) -> f64 {
        match self {
            Direction::Ltr => -offset,
            Direction::Rtl => offset,
        }
    }

    /// `scrollLeft` that brings a natively scrolled track `offset` pixels along.
    /// RTL tracks scroll into negative values.
    pub fn scroll_left(self, offset: f64) -> f64 {
        match self {
            Direction::Ltr => offset,
            Direction::Rtl => -offset,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Mobile,
    Desktop,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderLayout {
    pub mode: Mode,
    pub visible_cards: usize,
}

impl SliderLayout {
    pub fn for_width(viewport_width: f64, config: &SliderConfig) -> Self {
        let mode = if viewport_width <= config.mobile_max_width {
            Mode::Mobile
        } else {
            Mode::Desktop
        };
        let visible_cards = if viewport_width > config.three_up_min_width {
            3
        } else if viewport_width > config.two_up_min_width {
            2
        } else {
            1
        };
        Self {
            mode,
            visible_cards,
        }
    }

    /// Width of one card so that `visible_cards` cards and their gaps fill the container.
    pub fn card_width(&self, container_width: f64, gap: f64) -> f64 {
        let visible = self.visible_cards.max(1) as f64;
        ((container_width - gap * (visible - 1.0)) / visible).max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Carousel {
    total: usize,
    visible: usize,
    index: usize,
    direction: Direction,
}

impl Carousel {
    pub fn new(total: usize, visible: usize, direction: Direction) -> Self {
        Self {
            total,
            visible: visible.max(1),
            index: 0,
            direction,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn page_count(&self) -> usize {
        self.total.div_ceil(self.visible).max(1)
    }

    pub fn max_index(&self) -> usize {
        self.page_count() - 1
    }

    /// Changes how many cards fit on a page, keeping the index in range.
    pub fn set_visible(&mut self, visible: usize) {
        self.visible = visible.max(1);
        self.index = self.index.min(self.max_index());
    }

    pub fn press(&mut self, control: Control) -> usize {
        match self.direction.resolve(control) {
            Step::Forward => self.index = (self.index + 1).min(self.max_index()),
            Step::Backward => self.index = self.index.saturating_sub(1),
        }
        self.index
    }

    pub fn go_to(&mut self, page: usize) -> usize {
        self.index = page.min(self.max_index());
        self.index
    }

    /// Autoplay is the only move that wraps around.
    pub fn advance_wrapping(&mut self) -> usize {
        self.index = if self.index >= self.max_index() {
            0
        } else {
            self.index + 1
        };
        self.index
    }

    pub fn translate_x(&self, card_width: f64, gap: f64) -> f64 {
        let offset = self.index as f64 * (card_width + gap) * self.visible as f64;
        self.direction.signed_offset(offset)
    }
}

/// Which dot is current while the track is scrolled natively.
pub fn dot_for_scroll(scroll_left: f64, card_width: f64, gap: f64) -> usize {
    let stride = card_width + gap;
    if stride <= 0.0 {
        return 0;
    }
    (scroll_left.abs() / stride).round() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(carousel: &mut Carousel, ops: &[u8]) {
        for op in ops {
            match op % 4 {
                0 => {
                    carousel.press(Control::Next);
                }
                1 => {
                    carousel.press(Control::Prev);
                }
                2 => {
                    carousel.go_to(*op as usize);
                }
                _ => {
                    carousel.advance_wrapping();
                }
            }
        }
    }

    #[test]
    fn index_stays_in_range_for_every_width() {
        let config = SliderConfig::default();
        let ops: Vec<u8> = (0..200u32).map(|i| ((i * 37 + 11) % 251) as u8).collect();
        for width in [320.0, 767.0, 768.0, 900.0, 1024.0, 1025.0, 1920.0] {
            let layout = SliderLayout::for_width(width, &config);
            for total in 1..=10 {
                for direction in [Direction::Ltr, Direction::Rtl] {
                    let mut carousel = Carousel::new(total, layout.visible_cards, direction);
                    sequence(&mut carousel, &ops);
                    let max = total.div_ceil(layout.visible_cards) - 1;
                    assert!(carousel.index() <= max, "width {width} total {total}");
                    assert_eq!(carousel.max_index(), max);
                }
            }
        }
    }

    #[test]
    fn next_in_rtl_moves_backward_and_floors_at_zero() {
        let mut carousel = Carousel::new(7, 3, Direction::Rtl);
        for _ in 0..5 {
            assert_eq!(carousel.press(Control::Next), 0);
        }
        carousel.go_to(2);
        assert_eq!(carousel.press(Control::Next), 1);
        assert_eq!(carousel.press(Control::Prev), 2);
        assert_eq!(carousel.press(Control::Prev), 2);
    }

    #[test]
    fn next_in_ltr_moves_forward_and_caps_at_max() {
        let mut carousel = Carousel::new(7, 3, Direction::Ltr);
        let seen: Vec<usize> = (0..5).map(|_| carousel.press(Control::Next)).collect();
        assert_eq!(seen, vec![1, 2, 2, 2, 2]);
    }

    #[test]
    fn autoplay_wraps_to_first_page() {
        let mut carousel = Carousel::new(6, 2, Direction::Ltr);
        let seen: Vec<usize> = (0..4).map(|_| carousel.advance_wrapping()).collect();
        assert_eq!(seen, vec![1, 2, 0, 1]);
    }

    #[test]
    fn dot_click_past_the_end_is_clamped() {
        let mut carousel = Carousel::new(5, 2, Direction::Ltr);
        assert_eq!(carousel.go_to(9), 2);
    }

    #[test]
    fn shrinking_page_count_clamps_index() {
        let mut carousel = Carousel::new(6, 1, Direction::Ltr);
        carousel.go_to(5);
        carousel.set_visible(3);
        assert_eq!(carousel.index(), 1);
    }

    #[test]
    fn translation_sign_follows_direction() {
        let mut ltr = Carousel::new(6, 3, Direction::Ltr);
        let mut rtl = Carousel::new(6, 3, Direction::Rtl);
        ltr.go_to(1);
        rtl.go_to(1);
        assert_eq!(ltr.translate_x(100.0, 24.0), -372.0);
        assert_eq!(rtl.translate_x(100.0, 24.0), 372.0);
    }

    #[test]
    fn native_scroll_runs_negative_in_rtl() {
        assert_eq!(Direction::Ltr.scroll_left(600.0), 600.0);
        assert_eq!(Direction::Rtl.scroll_left(600.0), -600.0);
    }

    #[test]
    fn swipes_invert_in_rtl() {
        assert_eq!(Direction::Ltr.swipe(80.0, 50.0), Some(Control::Next));
        assert_eq!(Direction::Ltr.swipe(-80.0, 50.0), Some(Control::Prev));
        assert_eq!(Direction::Rtl.swipe(-80.0, 50.0), Some(Control::Next));
        assert_eq!(Direction::Rtl.swipe(80.0, 50.0), Some(Control::Prev));
        assert_eq!(Direction::Rtl.swipe(50.0, 50.0), None);
    }

    #[test]
    fn layout_breakpoints() {
        let config = SliderConfig::default();
        let at = |w| SliderLayout::for_width(w, &config);
        assert_eq!(at(767.0).mode, Mode::Mobile);
        assert_eq!(at(768.0).mode, Mode::Desktop);
        assert_eq!(at(768.0).visible_cards, 1);
        assert_eq!(at(769.0).visible_cards, 2);
        assert_eq!(at(1024.0).visible_cards, 2);
        assert_eq!(at(1025.0).visible_cards, 3);
        assert_eq!(at(1200.0).card_width(1048.0, 24.0), 333.3333333333333);
    }

    #[test]
    fn scroll_position_maps_to_nearest_dot() {
        assert_eq!(dot_for_scroll(0.0, 288.0, 12.0), 0);
        assert_eq!(dot_for_scroll(-460.0, 288.0, 12.0), 2);
        assert_eq!(dot_for_scroll(440.0, 288.0, 12.0), 1);
    }
}

use super::carousel::Mode;

/// A set of listeners/timers implementing one slider mode.
pub trait SliderStrategy {
    fn mode(&self) -> Mode;
}

/// Holds at most one strategy. Switching drops the old strategy, which
/// detaches its listeners, before the new one is attached.
pub struct StrategySlot<S> {
    active: Option<S>,
}

impl<S: SliderStrategy> StrategySlot<S> {
    pub fn new() -> Self {
        Self { active: None }
    }

    pub fn mode(&self) -> Option<Mode> {
        self.active.as_ref().map(|strategy| strategy.mode())
    }

    /// Returns `true` when a new strategy was attached. Asking for the mode
    /// that is already active is a no-op.
    pub fn switch_to<F>(&mut self, mode: Mode, attach: F) -> bool
    where
        F: FnOnce(Mode) -> S,
    {
        if self.mode() == Some(mode) {
            return false;
        }
        drop(self.active.take());
        self.active = Some(attach(mode));
        true
    }

    #[cfg(test)]
    fn active(&self) -> Option<&S> {
        self.active.as_ref()
    }
}

impl<S: SliderStrategy> Default for StrategySlot<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Counts live listener bindings the way real strategies hold `EventListener`s.
    struct Counted {
        mode: Mode,
        live: Rc<Cell<i32>>,
        attached_while_live: i32,
    }

    impl Counted {
        fn attach(mode: Mode, live: &Rc<Cell<i32>>) -> Self {
            let attached_while_live = live.get();
            live.set(live.get() + 1);
            Self {
                mode,
                live: live.clone(),
                attached_while_live,
            }
        }
    }

    impl Drop for Counted {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    impl SliderStrategy for Counted {
        fn mode(&self) -> Mode {
            self.mode
        }
    }

    #[test]
    fn crossing_threshold_twice_leaves_one_binding() {
        let live = Rc::new(Cell::new(0));
        let mut slot = StrategySlot::new();

        assert!(slot.switch_to(Mode::Mobile, |m| Counted::attach(m, &live)));
        assert!(slot.switch_to(Mode::Desktop, |m| Counted::attach(m, &live)));
        assert!(slot.switch_to(Mode::Mobile, |m| Counted::attach(m, &live)));

        assert_eq!(live.get(), 1);
        assert_eq!(slot.mode(), Some(Mode::Mobile));
        // The old strategy was gone before the new one attached.
        assert_eq!(slot.active().map(|s| s.attached_while_live), Some(0));
    }

    #[test]
    fn resize_within_same_mode_does_not_rebind() {
        let live = Rc::new(Cell::new(0));
        let mut slot = StrategySlot::new();
        slot.switch_to(Mode::Desktop, |m| Counted::attach(m, &live));
        for _ in 0..5 {
            assert!(!slot.switch_to(Mode::Desktop, |m| Counted::attach(m, &live)));
        }
        assert_eq!(live.get(), 1);
    }

    #[test]
    fn dropping_slot_releases_binding() {
        let live = Rc::new(Cell::new(0));
        {
            let mut slot = StrategySlot::new();
            slot.switch_to(Mode::Desktop, |m| Counted::attach(m, &live));
        }
        assert_eq!(live.get(), 0);
    }
}

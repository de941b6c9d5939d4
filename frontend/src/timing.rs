use gloo_timers::callback::Timeout;

/// Admits at most one call per `window_ms`. Time is passed in so the gate
/// can be driven by `performance`/`Date` in the browser and by plain numbers in tests.
#[derive(Debug, Clone)]
pub struct Throttle {
    window_ms: f64,
    last: Option<f64>,
}

impl Throttle {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            last: None,
        }
    }

    pub fn ready(&mut self, now_ms: f64) -> bool {
        match self.last {
            Some(last) if now_ms - last < self.window_ms => false,
            _ => {
                self.last = Some(now_ms);
                true
            }
        }
    }
}

/// Runs only the last of a burst of calls, `wait_ms` after it was made.
pub struct Debounce {
    wait_ms: u32,
    pending: Option<Timeout>,
}

impl Debounce {
    pub fn new(wait_ms: u32) -> Self {
        Self {
            wait_ms,
            pending: None,
        }
    }

    pub fn schedule<F>(&mut self, callback: F)
    where
        F: FnOnce() + 'static,
    {
        // Dropping the previous handle cancels it.
        self.pending = Some(Timeout::new(self.wait_ms, callback));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn throttle_admits_one_call_per_window() {
        let mut throttle = Throttle::new(16.0);
        assert!(throttle.ready(0.0));
        assert!(!throttle.ready(5.0));
        assert!(!throttle.ready(15.9));
        assert!(throttle.ready(16.0));
        assert!(!throttle.ready(20.0));
        assert!(throttle.ready(40.0));
    }

    #[test]
    fn burst_of_events_is_mostly_skipped() {
        let mut throttle = Throttle::new(16.0);
        let admitted = (0..100)
            .map(|i| i as f64 * 2.0)
            .filter(|now| throttle.ready(*now))
            .count();
        // 200ms of events every 2ms -> one per 16ms window.
        assert_eq!(admitted, 13);
    }
}

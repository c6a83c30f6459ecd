//! Single-shot, resettable debounce timer
//!
//! The timer holds at most one deadline. Every `touch` moves it to
//! `now + window`; `poll` fires once the deadline has passed and clears it.
//! Time is passed in by the caller so the event loop and tests share one
//! code path.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self { window, deadline: None }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Restart the window from `now`, superseding any pending deadline
    pub fn touch(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    /// True exactly once per burst, when the quiet window has elapsed
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Time left until the deadline, zero if already due
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(500);

    #[test]
    fn test_fires_once_after_window() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW);
        d.touch(t0);
        assert!(!d.poll(t0 + Duration::from_millis(499)));
        assert!(d.poll(t0 + WINDOW));
        assert!(!d.poll(t0 + Duration::from_secs(5)));
    }

    #[test]
    fn test_burst_restarts_window() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW);
        for step in 0..5 {
            d.touch(t0 + Duration::from_millis(step * 100));
        }
        // Last touch at 400ms, so nothing fires before 900ms
        assert!(!d.poll(t0 + Duration::from_millis(800)));
        assert_eq!(d.remaining(t0 + Duration::from_millis(800)), Some(Duration::from_millis(100)));
        assert!(d.poll(t0 + Duration::from_millis(900)));
    }

    #[test]
    fn test_cancel() {
        let t0 = Instant::now();
        let mut d = Debouncer::new(WINDOW);
        d.touch(t0);
        d.cancel();
        assert!(!d.is_pending());
        assert!(!d.poll(t0 + WINDOW));
        assert_eq!(d.remaining(t0), None);
    }
}

//! The cooperative move timer.
//!
//! The search asks `is_triggered` at the top of every move loop; once the
//! wall clock runs out (or the host's periodic hook requests cancellation)
//! the answer flips to true and stays true. Actual clock reads are
//! rate-limited so the probe stays cheap on the hot path.

use std::rc::Rc;
use std::time::{Duration, Instant};

/// Host-installed hook, invoked periodically during search. Returning true
/// requests cancellation.
pub type PeriodicFunction = Rc<dyn Fn() -> bool>;

const TIMER_CHECK_INTERVAL: u32 = 1000;

#[derive(Clone)]
pub struct MoveTimer {
    started_at: Option<Instant>,
    duration: Duration,
    check_calls: u32,
    triggered: bool,
    cancelled: bool,
    periodic_function: Option<PeriodicFunction>,
}

impl MoveTimer {
    pub fn new(duration: Duration) -> MoveTimer {
        MoveTimer {
            started_at: None,
            duration,
            check_calls: 0,
            triggered: false,
            cancelled: false,
            periodic_function: None,
        }
    }

    pub fn from_seconds(seconds: u64) -> MoveTimer {
        MoveTimer::new(Duration::from_secs(seconds))
    }

    pub fn set_periodic_function(&mut self, periodic_function: PeriodicFunction) {
        self.periodic_function = Some(periodic_function);
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
        self.check_calls = 0;
        self.triggered = false;
        self.cancelled = false;
    }

    /// True once the budget has elapsed or the host cancelled. Latches: once
    /// triggered, stays triggered.
    pub fn is_triggered(&mut self) -> bool {
        let Some(started_at) = self.started_at else {
            return false;
        };
        if self.triggered {
            return true;
        }

        self.check_calls = self.check_calls.wrapping_add(1);
        if self.check_calls % TIMER_CHECK_INTERVAL != 0 {
            return false;
        }

        if let Some(periodic_function) = &self.periodic_function {
            let hook: &dyn Fn() -> bool = periodic_function.as_ref();
            if hook() {
                self.cancelled = true;
                self.triggered = true;
                return true;
            }
        }

        if started_at.elapsed() >= self.duration {
            self.triggered = true;
        }
        self.triggered
    }

    /// Whether the trigger came from the host rather than the clock.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Invoke the periodic hook once, outside the rate limit. Used between
    /// deepening iterations.
    pub fn check_cancellation(&mut self) -> bool {
        if let Some(periodic_function) = &self.periodic_function {
            let hook: &dyn Fn() -> bool = periodic_function.as_ref();
            if hook() {
                self.cancelled = true;
                self.triggered = true;
            }
        }
        self.cancelled
    }
}

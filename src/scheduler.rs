//! The periodic tick source.
//!
//! There is no thread or OS timer behind this: the event loop asks
//! [`Scheduler::time_until_due`] how long it may wait and calls
//! [`Scheduler::poll`] when it wakes up. Every method takes the current
//! [`Instant`] so the timing is deterministic under test.

use crate::bounce::Vector;
use crate::platform::InputSink;
use crate::settings::Settings;

use std::time::{Duration, Instant};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
enum TimerState {
    Disarmed,
    Armed { period: Duration, deadline: Instant },
}

#[derive(Debug)]
pub struct Scheduler {
    state: TimerState,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            state: TimerState::Disarmed,
        }
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, TimerState::Armed { .. })
    }

    /// # Panics
    ///
    /// Panics if the timer is already armed or `period` is zero.
    pub fn arm(&mut self, period: Duration, now: Instant) {
        assert!(!self.is_armed(), "tick timer armed twice");
        assert!(!period.is_zero(), "tick period must be positive");
        log::debug!("arming tick timer every {period:?}");

        self.state = TimerState::Armed {
            period,
            deadline: now + period,
        };
    }

    /// # Panics
    ///
    /// Panics if the timer is not armed.
    pub fn disarm(&mut self) {
        assert!(self.is_armed(), "tick timer disarmed while not armed");
        log::debug!("disarming tick timer");

        self.state = TimerState::Disarmed;
    }

    /// Cancels the pending tick and schedules the next one a full `period`
    /// from `now`.
    ///
    /// # Panics
    ///
    /// Panics if the timer is not armed or `period` is zero.
    pub fn restart(&mut self, period: Duration, now: Instant) {
        assert!(self.is_armed(), "tick timer restarted while not armed");
        assert!(!period.is_zero(), "tick period must be positive");
        log::debug!("restarting tick timer every {period:?}");

        self.state = TimerState::Armed {
            period,
            deadline: now + period,
        };
    }

    /// How long the event loop may sleep before the next tick. `None` while
    /// disarmed.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        match self.state {
            TimerState::Armed { deadline, .. } => Some(deadline.saturating_duration_since(now)),
            TimerState::Disarmed => None,
        }
    }

    /// Returns `true` once per elapsed period and advances the deadline.
    ///
    /// Periods missed entirely (e.g. while a modal prompt was open) collapse
    /// into the single tick returned here.
    pub fn poll(&mut self, now: Instant) -> bool {
        let TimerState::Armed { period, deadline } = self.state else {
            return false;
        };
        if now < deadline {
            return false;
        }

        let mut next = deadline + period;
        if next <= now {
            log::trace!("tick timer fell behind, skipping missed periods");
            next = now + period;
        }
        self.state = TimerState::Armed {
            period,
            deadline: next,
        };

        true
    }

    /// Runs one tick: re-samples the bounce against the live pointer, then
    /// moves the pointer by the resulting vector.
    ///
    /// # Panics
    ///
    /// Panics if the timer is not armed.
    pub fn run_tick<S: InputSink>(&self, settings: &mut Settings, sink: &mut S) -> Vector {
        assert!(self.is_armed(), "tick delivered while the timer is disarmed");

        let vector = settings.resample(sink);
        debug_assert!(vector.is_normalized(settings.step()));
        sink.move_relative(vector);
        log::trace!("moved pointer by ({vector})");

        vector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn starts_disarmed() {
        let s = Scheduler::new();
        assert_eq!(s.state, TimerState::Disarmed);
        assert_eq!(s.time_until_due(Instant::now()), None);
    }

    #[test]
    fn arm_then_disarm() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.arm(ms(1000), t0);
        assert!(s.is_armed());
        assert_eq!(s.time_until_due(t0), Some(ms(1000)));

        s.disarm();
        assert!(!s.is_armed());
        assert!(!s.poll(t0 + ms(5000)));
    }

    #[test]
    #[should_panic(expected = "armed twice")]
    fn arming_twice_panics() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.arm(ms(1000), t0);
        s.arm(ms(1000), t0);
    }

    #[test]
    #[should_panic(expected = "disarmed while not armed")]
    fn disarming_idle_timer_panics() {
        Scheduler::new().disarm();
    }

    #[test]
    #[should_panic(expected = "restarted while not armed")]
    fn restarting_idle_timer_panics() {
        Scheduler::new().restart(ms(500), Instant::now());
    }

    #[test]
    fn fires_once_per_period() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.arm(ms(1000), t0);

        assert!(!s.poll(t0 + ms(999)));
        assert!(s.poll(t0 + ms(1000)));
        assert!(!s.poll(t0 + ms(1000)));
        assert!(!s.poll(t0 + ms(1999)));
        assert!(s.poll(t0 + ms(2005)));
        // the schedule does not drift with late wakeups
        assert_eq!(s.time_until_due(t0 + ms(2005)), Some(ms(995)));
    }

    #[test]
    fn restart_reschedules_from_now_without_double_fire() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.arm(ms(1000), t0);

        let change = t0 + ms(300);
        s.restart(ms(500), change);
        assert!(!s.poll(change));
        assert!(!s.poll(t0 + ms(799)));
        // the old deadline at t0 + 1000 is gone
        assert!(s.poll(t0 + ms(800)));
        assert!(!s.poll(t0 + ms(1000)));
        assert!(!s.poll(t0 + ms(1299)));
        assert!(s.poll(t0 + ms(1300)));
        assert!(s.poll(t0 + ms(1800)));
    }

    #[test]
    fn missed_periods_collapse_into_one_tick() {
        let t0 = Instant::now();
        let mut s = Scheduler::new();
        s.arm(ms(100), t0);

        let late = t0 + ms(1050);
        assert!(s.poll(late));
        assert!(!s.poll(late));
        assert_eq!(s.time_until_due(late), Some(ms(100)));
    }
}

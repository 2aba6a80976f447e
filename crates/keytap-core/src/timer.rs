//! Cycle-window timer and the clock it reads.
//!
//! There is no background thread: a scheduled deadline only fires when the
//! owner polls it, so firings always land between two key presses on the
//! same sequential timeline.

use std::cell::Cell;
use std::time::Instant;

/// Monotonic millisecond source.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.
    fn now_ms(&self) -> u64;
}

/// Wall-clock time measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Clock that only moves when told to. Used by tests and replay tools.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// A single commit-pending deadline.
///
/// Scheduling replaces whatever was pending, so at most one deadline exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleTimer {
    deadline_ms: Option<u64>,
}

impl CycleTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the timer `timeout_ms` after `now_ms`.
    pub fn schedule(&mut self, now_ms: u64, timeout_ms: u64) {
        self.deadline_ms = Some(now_ms.saturating_add(timeout_ms));
    }

    pub fn cancel(&mut self) {
        self.deadline_ms = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline_ms.is_some()
    }

    /// Fire the timer if its deadline has passed. Returns `true` if it fired.
    pub fn fire_if_due(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms {
            Some(deadline) if now_ms >= deadline => {
                self.deadline_ms = None;
                true
            },
            _ => false,
        }
    }

    /// Time left before the deadline, `None` when idle.
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        self.deadline_ms.map(|deadline| deadline.saturating_sub(now_ms))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new();
        assert_eq!(clock.now_ms(), 0);
        clock.advance(250);
        clock.advance(250);
        assert_eq!(clock.now_ms(), 500);
        clock.set(10);
        assert_eq!(clock.now_ms(), 10);
    }

    #[test]
    fn manual_clock_saturates() {
        let clock = ManualClock::new();
        clock.set(u64::MAX - 1);
        clock.advance(10);
        assert_eq!(clock.now_ms(), u64::MAX);
    }

    #[test]
    fn clock_through_reference() {
        let clock = ManualClock::new();
        clock.advance(42);
        let by_ref: &ManualClock = &clock;
        assert_eq!(Clock::now_ms(&by_ref), 42);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }

    #[test]
    fn new_timer_is_idle() {
        let timer = CycleTimer::new();
        assert!(!timer.is_pending());
        assert_eq!(timer.remaining_ms(0), None);
    }

    #[test]
    fn fires_at_deadline_not_before() {
        let mut timer = CycleTimer::new();
        timer.schedule(100, 1000);
        assert!(!timer.fire_if_due(1099));
        assert!(timer.is_pending());
        assert!(timer.fire_if_due(1100));
        assert!(!timer.is_pending());
    }

    #[test]
    fn fires_only_once() {
        let mut timer = CycleTimer::new();
        timer.schedule(0, 10);
        assert!(timer.fire_if_due(50));
        assert!(!timer.fire_if_due(60));
    }

    #[test]
    fn reschedule_replaces_deadline() {
        let mut timer = CycleTimer::new();
        timer.schedule(0, 1000);
        timer.schedule(900, 1000);
        assert!(!timer.fire_if_due(1000));
        assert_eq!(timer.remaining_ms(1000), Some(900));
        assert!(timer.fire_if_due(1900));
    }

    #[test]
    fn cancel_clears_pending() {
        let mut timer = CycleTimer::new();
        timer.schedule(0, 1000);
        timer.cancel();
        assert!(!timer.is_pending());
        assert!(!timer.fire_if_due(5000));
    }

    #[test]
    fn remaining_saturates_past_deadline() {
        let mut timer = CycleTimer::new();
        timer.schedule(0, 100);
        assert_eq!(timer.remaining_ms(40), Some(60));
        assert_eq!(timer.remaining_ms(500), Some(0));
    }
}

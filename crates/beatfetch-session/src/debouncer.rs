//! Search trigger debouncing.
//!
//! The debouncer runs on the host's frame clock: every `tick` adds the
//! elapsed time to a countdown, and a trigger fires once the countdown
//! reaches the search delay. Firing restarts the countdown, so triggers
//! keep firing periodically; the coordinator drops the ones whose query did
//! not change.

use std::time::Duration;

/// Converts typing and explicit search requests into trigger signals.
#[derive(Debug, Clone)]
pub struct SearchDebouncer {
    delay: Duration,
    min_interval: Duration,
    elapsed: Duration,
    reset_applied: bool,
}

impl SearchDebouncer {
    /// Create a debouncer that fires `delay` after the last keystroke and
    /// spaces explicit triggers at least `min_interval` apart.
    ///
    /// The first tick fires immediately so an initial search goes out.
    pub const fn new(delay: Duration, min_interval: Duration) -> Self {
        Self {
            delay,
            min_interval,
            elapsed: delay,
            reset_applied: false,
        }
    }

    /// Restart the countdown after a keystroke.
    ///
    /// Keystrokes arriving before the delay expires are coalesced.
    pub const fn on_query_text_changed(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    /// Schedule a trigger sooner than the natural debounce.
    ///
    /// Fires on the next tick, unless the previous fire or keystroke was
    /// less than `min_interval` ago; then it fires `min_interval` from now.
    /// Calls while a scheduled trigger is pending are ignored.
    pub fn on_explicit_trigger(&mut self) {
        if self.reset_applied {
            return;
        }
        self.elapsed = if self.elapsed < self.min_interval {
            self.delay.saturating_sub(self.min_interval)
        } else {
            self.delay
        };
        self.reset_applied = true;
    }

    /// Advance by `dt`. Returns `true` when a trigger fires.
    ///
    /// While `blocked` the countdown is held at expiry and the trigger fires
    /// on the first unblocked tick.
    pub fn tick(&mut self, dt: Duration, blocked: bool) -> bool {
        if self.elapsed < self.delay {
            self.elapsed = self.elapsed.saturating_add(dt).min(self.delay);
        }
        if self.elapsed < self.delay || blocked {
            return false;
        }
        self.elapsed = Duration::ZERO;
        self.reset_applied = false;
        true
    }

    /// Time left until the next trigger.
    pub const fn remaining(&self) -> Duration {
        self.delay.saturating_sub(self.elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(700);
    const MIN: Duration = Duration::from_millis(300);
    const FRAME: Duration = Duration::from_millis(10);

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    /// Debouncer that has just fired.
    fn settled() -> SearchDebouncer {
        let mut debouncer = SearchDebouncer::new(DELAY, MIN);
        assert!(debouncer.tick(Duration::ZERO, false));
        debouncer
    }

    /// Tick in frames for `total`, returning how many triggers fired.
    fn run(debouncer: &mut SearchDebouncer, total: Duration) -> usize {
        let mut fired = 0;
        let mut t = Duration::ZERO;
        while t < total {
            if debouncer.tick(FRAME, false) {
                fired += 1;
            }
            t += FRAME;
        }
        fired
    }

    #[test]
    fn test_first_tick_fires() {
        let mut debouncer = SearchDebouncer::new(DELAY, MIN);
        assert!(debouncer.tick(FRAME, false));
        assert!(!debouncer.tick(FRAME, false));
    }

    #[test]
    fn test_keystrokes_coalesce() {
        let mut debouncer = settled();

        for _ in 0..10 {
            debouncer.on_query_text_changed();
            assert_eq!(run(&mut debouncer, ms(100)), 0);
        }

        assert_eq!(run(&mut debouncer, ms(690)), 0);
        assert_eq!(run(&mut debouncer, ms(20)), 1);
    }

    #[test]
    fn test_explicit_trigger_fires_next_tick_when_idle() {
        let mut debouncer = settled();
        assert_eq!(run(&mut debouncer, ms(400)), 0);

        debouncer.on_explicit_trigger();
        assert!(debouncer.tick(Duration::ZERO, false));
    }

    #[test]
    fn test_explicit_trigger_respects_min_interval() {
        let mut debouncer = settled();
        assert_eq!(run(&mut debouncer, ms(100)), 0);

        debouncer.on_explicit_trigger();
        assert_eq!(debouncer.remaining(), MIN);
        assert_eq!(run(&mut debouncer, ms(290)), 0);
        assert_eq!(run(&mut debouncer, ms(20)), 1);
    }

    #[test]
    fn test_rapid_explicit_triggers_delayed_not_dropped() {
        let mut debouncer = settled();
        assert_eq!(run(&mut debouncer, ms(500)), 0);

        debouncer.on_explicit_trigger();
        assert!(debouncer.tick(FRAME, false));

        // Second click right after the first fire.
        debouncer.on_explicit_trigger();
        assert!(!debouncer.tick(FRAME, false));
        assert_eq!(run(&mut debouncer, MIN), 1);
    }

    #[test]
    fn test_explicit_trigger_not_rescheduled_while_pending() {
        let mut debouncer = settled();
        assert_eq!(run(&mut debouncer, ms(100)), 0);

        debouncer.on_explicit_trigger();
        let pending = debouncer.remaining();
        debouncer.on_explicit_trigger();
        assert_eq!(debouncer.remaining(), pending);
    }

    #[test]
    fn test_blocked_holds_trigger() {
        let mut debouncer = settled();
        debouncer.on_explicit_trigger();

        assert!(!debouncer.tick(FRAME, true));
        assert!(!debouncer.tick(ms(1000), true));
        assert!(debouncer.tick(FRAME, false));
    }

    #[test]
    fn test_periodic_refire() {
        let mut debouncer = settled();
        assert_eq!(run(&mut debouncer, ms(1420)), 2);
    }
}

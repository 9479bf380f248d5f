//! Interval timers and the game-tick flag
//!
//! The game timer never runs game logic itself: it raises a flag that the
//! main loop consumes. Fires that arrive while the flag is still raised are
//! coalesced, so at most one tick runs per consumption.

use std::time::Duration;

/// Periodic countdown timer advanced by elapsed time
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: Duration,
    elapsed: Duration,
}

impl IntervalTimer {
    pub fn new(period: Duration) -> Self {
        assert!(!period.is_zero(), "interval timer period must be non-zero");
        Self {
            period,
            elapsed: Duration::ZERO,
        }
    }

    pub fn from_secs_f32(secs: f32) -> Self {
        Self::new(Duration::from_secs_f32(secs))
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Advance by `dt`; returns how many times the timer expired
    pub fn advance(&mut self, dt: Duration) -> u32 {
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            fired += 1;
        }
        fired
    }
}

/// Pending-tick flag raised by the game timer and consumed by the main loop
#[derive(Debug, Clone, Default)]
pub struct TickFlag {
    pending: bool,
    triggered: u64,
    handled: u64,
}

impl TickFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timer expiry: raise the flag (coalesces with an unconsumed raise)
    pub fn raise(&mut self) {
        self.pending = true;
        self.triggered += 1;
    }

    /// Consume the flag; true if a tick should run now
    pub fn take(&mut self) -> bool {
        if self.pending {
            self.pending = false;
            self.handled += 1;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Number of timer expiries
    pub fn triggered(&self) -> u64 {
        self.triggered
    }

    /// Number of ticks actually run
    pub fn handled(&self) -> u64 {
        self.handled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_timer_fires() {
        let mut timer = IntervalTimer::new(Duration::from_millis(45));
        assert_eq!(timer.advance(Duration::from_millis(10)), 0);
        assert_eq!(timer.advance(Duration::from_millis(40)), 1);
        assert_eq!(timer.advance(Duration::from_millis(100)), 2);
    }

    #[test]
    fn test_tick_flag_coalesces() {
        let mut flag = TickFlag::new();
        assert!(!flag.take());

        flag.raise();
        flag.raise();
        flag.raise();
        assert!(flag.is_pending());
        assert!(flag.take());
        assert!(!flag.take());

        assert_eq!(flag.triggered(), 3);
        assert_eq!(flag.handled(), 1);
    }
}

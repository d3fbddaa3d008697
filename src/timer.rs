/*!
 * Interval Timer
 *
 * Wall-clock stopwatch with free-running marks and rate-limited marks.
 * Times are seconds as `f64`. The wall clock may be adjusted backwards by
 * the OS; elapsed and interval values then go negative and are reported as
 * such rather than clamped.
 */

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of absolute time in seconds
pub trait Clock {
    fn now(&self) -> f64;
}

/// The system wall clock, as seconds since the Unix epoch
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(since) => since.as_secs_f64(),
            // Clock set before 1970
            Err(e) => -e.duration().as_secs_f64(),
        }
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> f64 {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> f64 {
        (**self).now()
    }
}

/// Stopwatch measuring the time between marks.
///
/// One owner mutates a timer; it is not synchronized.
#[derive(Debug, Clone)]
pub struct IntervalTimer<C: Clock = SystemClock> {
    clock: C,
    last_mark_time: f64,
    mark_interval: f64,
}

impl IntervalTimer<SystemClock> {
    /// Create a timer on the system wall clock
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for IntervalTimer<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> IntervalTimer<C> {
    /// Create a timer on an arbitrary clock.
    ///
    /// Marks twice so the first interval is the (near zero) gap between two
    /// consecutive clock reads instead of the whole epoch.
    pub fn with_clock(clock: C) -> Self {
        let mut timer = Self {
            clock,
            last_mark_time: 0.0,
            mark_interval: 0.0,
        };
        timer.mark();
        timer.mark();
        timer
    }

    /// Record now as the latest mark and the time since the previous one as
    /// the interval.
    pub fn mark(&mut self) {
        let now = self.clock.now();
        self.mark_interval = now - self.last_mark_time;
        self.last_mark_time = now;
    }

    /// Mark, but no more often than every `min_interval` seconds.
    ///
    /// Once `min_interval` has passed since the last real mark this is
    /// [`mark`](Self::mark). Earlier calls report `min_interval` as the
    /// interval and keep the previous mark time, so elapsed time keeps
    /// accumulating from the last real mark and the next real mark lands on
    /// the first call at or after the requested cadence.
    ///
    /// A due call re-anchors at `now`, not at the previous mark plus
    /// `min_interval`, so each cycle can run late by up to one call gap.
    pub fn mark_at_interval(&mut self, min_interval: f64) {
        let now = self.clock.now();
        let elapsed = now - self.last_mark_time;

        if elapsed >= min_interval {
            self.mark_interval = elapsed;
            self.last_mark_time = now;
        } else {
            self.mark_interval = min_interval;
        }
    }

    /// Interval computed by the most recent mark
    pub fn get_interval(&self) -> f64 {
        self.mark_interval
    }

    /// Seconds since the last mark, read fresh from the clock
    pub fn get_elapsed(&self) -> f64 {
        self.clock.now() - self.last_mark_time
    }

    /// Absolute time of the last mark, in the clock's seconds
    pub fn last_mark_time(&self) -> f64 {
        self.last_mark_time
    }
}

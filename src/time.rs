//! Time facilities for frame-rate-decoupled stepping.
//!
//! The external driver invokes one scheduler step per simulation tick, but
//! display refresh rates vary. [`TickTimer`] accumulates elapsed wall-clock
//! time and reports how many fixed-interval ticks are due, carrying the
//! remainder forward so no accumulated time is skipped. The simulation
//! rate stays roughly constant regardless of how often the driver polls.
//!
//! # Example
//!
//! ```ignore
//! use chaotic_attraction::time::TickTimer;
//!
//! let mut timer = TickTimer::from_hz(30.0);
//!
//! // In your render loop:
//! for _ in 0..timer.poll() {
//!     sim.step();
//! }
//! ```

use std::time::{Duration, Instant};

/// Fixed-interval tick accumulator.
#[derive(Debug)]
pub struct TickTimer {
    /// Simulation tick interval.
    interval: Duration,
    /// Unspent elapsed time, always less than `interval` after a poll.
    accumulator: Duration,
    /// When the timer last measured the clock.
    last_poll: Instant,
}

impl TickTimer {
    /// Create a timer firing once per `interval`.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulator: Duration::ZERO,
            last_poll: Instant::now(),
        }
    }

    /// Create a timer firing `hz` times per second.
    pub fn from_hz(hz: f64) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / hz))
    }

    /// Measure wall-clock time since the last poll and return the number
    /// of ticks now due. Call once per render frame.
    pub fn poll(&mut self) -> u32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_poll);
        self.last_poll = now;
        self.advance(elapsed)
    }

    /// Add `elapsed` to the accumulator and drain it in whole intervals.
    ///
    /// The sub-interval remainder stays in the accumulator for the next
    /// call, so tick counts average out to exactly one per interval.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;
        let mut ticks = 0;
        while self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            ticks += 1;
        }
        ticks
    }

    /// The configured tick interval.
    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Unspent time carried toward the next tick.
    #[inline]
    pub fn remainder(&self) -> Duration {
        self.accumulator
    }

    /// Drop any accumulated time and restart measuring from now.
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
        self.last_poll = Instant::now();
    }
}

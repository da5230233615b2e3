//! Time sources and frame-delta derivation.

use std::cell::Cell;
use std::time::Instant;

/// Supplies monotonically increasing timestamps in milliseconds.
pub trait TimeSource {
    fn now_ms(&self) -> f64;
}

/// Wall-clock time measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock for headless runs and tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl TimeSource for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Clamp a frame delta to something safe to integrate: non-finite and
/// negative values become zero.
pub fn sanitize_delta(delta_ms: f64) -> f64 {
    if delta_ms.is_finite() && delta_ms > 0.0 {
        delta_ms
    } else {
        0.0
    }
}

/// Turns successive timestamps into frame deltas.
///
/// The first timestamp only primes the timer. Later deltas are sanitized and
/// capped at `max_delta_ms` so a stalled terminal does not teleport obstacles
/// through the player.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    previous: Option<f64>,
    max_delta_ms: f64,
}

impl FrameTimer {
    pub fn new(max_delta_ms: f64) -> Self {
        Self {
            previous: None,
            max_delta_ms,
        }
    }

    /// Record `now_ms` and return the delta since the previous call, or
    /// `None` on the very first call.
    pub fn delta(&mut self, now_ms: f64) -> Option<f64> {
        let previous = self.previous.replace(now_ms)?;
        Some(sanitize_delta(now_ms - previous).min(self.max_delta_ms))
    }

    /// Read the clock and return the frame delta.
    pub fn tick(&mut self, clock: &dyn TimeSource) -> Option<f64> {
        self.delta(clock.now_ms())
    }
}

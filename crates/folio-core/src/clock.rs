#![forbid(unsafe_code)]

//! Host-controlled monotonic clock.

use core::time::Duration;

/// Deterministic monotonic clock controlled by the host.
///
/// Time never moves on its own: the wasm shim syncs it from
/// `performance.now()` before each step, tests advance it by hand.
#[derive(Debug, Default, Clone)]
pub struct DeterministicClock {
    now: Duration,
}

impl DeterministicClock {
    /// Create a clock starting at `0`.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            now: Duration::ZERO,
        }
    }

    /// Current monotonic time.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Set current monotonic time. Going backwards is ignored.
    pub fn set(&mut self, now: Duration) {
        if now > self.now {
            self.now = now;
        }
    }

    /// Advance monotonic time by `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now.saturating_add(dt);
    }
}

/// Convert host-supplied milliseconds into a [`Duration`].
///
/// Host input can be noisy (NaN/inf/negative spikes); anything that is not a
/// finite positive number maps to `None`.
#[must_use]
pub fn duration_from_ms(ms: f64) -> Option<Duration> {
    if !ms.is_finite() || ms <= 0.0 {
        return None;
    }
    let secs = (ms / 1000.0).min(Duration::MAX.as_secs_f64());
    Some(Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX))
}

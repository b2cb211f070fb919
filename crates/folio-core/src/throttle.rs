#![forbid(unsafe_code)]

//! Leading-edge, dropping rate limiter for scroll handlers.

use core::time::Duration;

/// Lets one call through, then drops every call until `interval` has elapsed.
///
/// Dropped calls are not queued: there is no trailing invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttle {
    interval: Duration,
    reopens_at: Option<Duration>,
}

impl Throttle {
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            reopens_at: None,
        }
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `true` when a call at `now` should run.
    pub fn try_fire(&mut self, now: Duration) -> bool {
        match self.reopens_at {
            Some(reopens_at) if now < reopens_at => false,
            _ => {
                self.reopens_at = Some(now.saturating_add(self.interval));
                true
            }
        }
    }

    /// Run `f` if the throttle is open at `now`.
    pub fn run<R>(&mut self, now: Duration, f: impl FnOnce() -> R) -> Option<R> {
        self.try_fire(now).then(f)
    }
}

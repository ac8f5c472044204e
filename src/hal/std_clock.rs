//! Monotonic clock backed by `std::time::Instant`.
//!
//! Used on desktop and on ESP-IDF, whose std port maps `Instant` onto the
//! high-resolution system timer.

use std::time::Instant;

use crate::traits::Clock;

/// Milliseconds since construction.
#[derive(Clone, Copy, Debug)]
pub struct StdClock {
    epoch: Instant,
}

impl StdClock {
    /// Starts the clock at zero.
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for StdClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

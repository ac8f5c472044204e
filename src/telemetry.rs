//! Fixed-cadence encoder snapshots.
//!
//! [`EncoderTelemetry`] is polled from the main loop and yields a snapshot
//! at most once per interval. The first poll only arms the timer, matching
//! a firmware that starts its report clock at boot.

use crate::encoder::{EncoderCounterBank, EncoderSnapshot};

/// Periodic encoder snapshot emitter.
///
/// ```rust
/// use mecanum_drive::{EncoderCounterBank, EncoderTelemetry, Wheel};
///
/// let bank = EncoderCounterBank::new();
/// let mut telemetry = EncoderTelemetry::new(5_000);
///
/// assert!(telemetry.poll(0, &bank).is_none()); // arms
/// bank.on_edge(Wheel::FrontLeft, true);
/// assert!(telemetry.poll(4_999, &bank).is_none());
///
/// let snapshot = telemetry.poll(5_000, &bank).unwrap();
/// assert_eq!(snapshot[Wheel::FrontLeft], 1);
/// ```
#[derive(Clone, Debug)]
pub struct EncoderTelemetry {
    interval_ms: u32,
    last_ms: Option<u64>,
}

impl EncoderTelemetry {
    /// Creates an emitter with the given interval.
    pub fn new(interval_ms: u32) -> Self {
        Self {
            interval_ms,
            last_ms: None,
        }
    }

    /// Returns a snapshot if `interval_ms` has elapsed since the last one.
    pub fn poll(&mut self, now_ms: u64, bank: &EncoderCounterBank) -> Option<EncoderSnapshot> {
        let Some(last) = self.last_ms else {
            self.last_ms = Some(now_ms);
            return None;
        };
        if now_ms.wrapping_sub(last) < u64::from(self.interval_ms) {
            return None;
        }
        self.last_ms = Some(now_ms);
        Some(bank.snapshot_all())
    }

    /// Configured interval.
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emits_once_per_interval() {
        let bank = EncoderCounterBank::new();
        let mut t = EncoderTelemetry::new(100);

        let emitted = (0..=1_000u64)
            .step_by(10)
            .filter(|&now| t.poll(now, &bank).is_some())
            .count();
        assert_eq!(emitted, 10);
    }

    #[test]
    fn late_poll_resets_phase() {
        let bank = EncoderCounterBank::new();
        let mut t = EncoderTelemetry::new(100);
        t.poll(0, &bank);

        assert!(t.poll(250, &bank).is_some());
        assert!(t.poll(300, &bank).is_none());
        assert!(t.poll(350, &bank).is_some());
    }
}

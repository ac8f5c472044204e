//! Interrupt-fed quadrature counters, one per wheel.
//!
//! # Execution contexts
//!
//! Each counter has exactly one writer: the interrupt line bound to that
//! wheel's encoder A channel. The main loop is the only reader and the only
//! resetter. Because no interrupt writes more than one counter, no
//! cross-interrupt locking is needed; every access is a single atomic
//! operation on a 32-bit cell, so the main loop never observes a torn value.
//!
//! `portable_atomic` supplies the atomics so targets without native
//! read-modify-write instructions (RISC-V `imc` cores such as the ESP32-C3)
//! still get a correct single-instruction-equivalent update.
//!
//! # Wraparound
//!
//! Counters are `i32` with two's-complement wraparound: one increment past
//! `i32::MAX` yields `i32::MIN`. This is not treated as an error.
//!
//! # Binding
//!
//! The bank is built with a `const fn` so it can live in a `static` whose
//! address is fixed before any interrupt is enabled:
//!
//! ```
//! use mecanum_drive::{EncoderCounterBank, Wheel};
//!
//! static ENCODERS: EncoderCounterBank = EncoderCounterBank::new();
//!
//! // Interrupt line for the front-left encoder, bound once at startup.
//! let front_left = ENCODERS.channel(Wheel::FrontLeft);
//!
//! // Inside the ISR: B channel high means forward.
//! front_left.edge(true);
//! front_left.edge(true);
//! front_left.edge(false);
//!
//! assert_eq!(ENCODERS.get(Wheel::FrontLeft), 1);
//! ```

use portable_atomic::{AtomicI32, Ordering};

use crate::wheels::{Wheel, WheelSet};

/// Four encoder counts taken by independent atomic reads.
///
/// Cross-wheel consistency is not guaranteed; each value is exact for its
/// own wheel at the moment it was read.
pub type EncoderSnapshot = WheelSet<i32>;

/// Four free-running signed counters updated from interrupt context.
#[derive(Debug)]
pub struct EncoderCounterBank {
    counts: [AtomicI32; 4],
}

impl EncoderCounterBank {
    /// Creates a bank with all counters at zero.
    pub const fn new() -> Self {
        Self {
            counts: [
                AtomicI32::new(0),
                AtomicI32::new(0),
                AtomicI32::new(0),
                AtomicI32::new(0),
            ],
        }
    }

    /// Records one encoder edge. Interrupt context only.
    ///
    /// Increments when `direction` is true, decrements otherwise. One
    /// atomic add, no locks, no logging.
    #[inline]
    pub fn on_edge(&self, wheel: Wheel, direction: bool) {
        let step = if direction { 1 } else { -1 };
        self.counts[wheel.index()].fetch_add(step, Ordering::Relaxed);
    }

    /// Current count for one wheel. Main loop only.
    #[inline]
    pub fn get(&self, wheel: Wheel) -> i32 {
        self.counts[wheel.index()].load(Ordering::Relaxed)
    }

    /// Zeroes one counter. Main loop only.
    #[inline]
    pub fn reset(&self, wheel: Wheel) {
        self.counts[wheel.index()].store(0, Ordering::Relaxed);
    }

    /// Reads and zeroes one counter in a single atomic step.
    ///
    /// No edge recorded between the read and the clear is lost.
    #[inline]
    pub fn take(&self, wheel: Wheel) -> i32 {
        self.counts[wheel.index()].swap(0, Ordering::Relaxed)
    }

    /// Zeroes all four counters, one atomic store each.
    pub fn reset_all(&self) {
        for wheel in Wheel::ALL {
            self.reset(wheel);
        }
    }

    /// Reads all four counters.
    pub fn snapshot_all(&self) -> EncoderSnapshot {
        WheelSet::from_array(Wheel::ALL.map(|wheel| self.get(wheel)))
    }

    /// Returns the trampoline for one wheel's interrupt line.
    #[inline]
    pub const fn channel(&self, wheel: Wheel) -> EncoderChannel<'_> {
        EncoderChannel { bank: self, wheel }
    }
}

impl Default for EncoderCounterBank {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed binding between one interrupt line and one wheel counter.
///
/// Copy it into the interrupt handler at startup. `edge` is a direct call
/// into [`EncoderCounterBank::on_edge`]: no dynamic dispatch, no allocation.
#[derive(Clone, Copy, Debug)]
pub struct EncoderChannel<'a> {
    bank: &'a EncoderCounterBank,
    wheel: Wheel,
}

impl EncoderChannel<'_> {
    /// Records one edge for the bound wheel. Interrupt context only.
    #[inline]
    pub fn edge(&self, direction: bool) {
        self.bank.on_edge(self.wheel, direction);
    }

    /// The wheel this channel counts for.
    #[inline]
    pub fn wheel(&self) -> Wheel {
        self.wheel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let bank = EncoderCounterBank::new();
        assert_eq!(bank.snapshot_all(), WheelSet::splat(0));
    }

    #[test]
    fn direction_bit_selects_sign() {
        let bank = EncoderCounterBank::new();
        bank.on_edge(Wheel::RearLeft, true);
        bank.on_edge(Wheel::RearLeft, true);
        bank.on_edge(Wheel::RearRight, false);

        assert_eq!(bank.get(Wheel::RearLeft), 2);
        assert_eq!(bank.get(Wheel::RearRight), -1);
        assert_eq!(bank.get(Wheel::FrontLeft), 0);
    }

    #[test]
    fn reset_is_per_wheel() {
        let bank = EncoderCounterBank::new();
        bank.on_edge(Wheel::FrontLeft, true);
        bank.on_edge(Wheel::FrontRight, true);
        bank.reset(Wheel::FrontLeft);

        assert_eq!(bank.get(Wheel::FrontLeft), 0);
        assert_eq!(bank.get(Wheel::FrontRight), 1);
    }

    #[test]
    fn reset_all_clears_every_wheel() {
        let bank = EncoderCounterBank::new();
        for wheel in Wheel::ALL {
            bank.on_edge(wheel, false);
        }
        bank.reset_all();
        assert_eq!(bank.snapshot_all(), WheelSet::splat(0));
    }

    #[test]
    fn take_returns_and_clears() {
        let bank = EncoderCounterBank::new();
        for _ in 0..5 {
            bank.on_edge(Wheel::FrontRight, true);
        }
        assert_eq!(bank.take(Wheel::FrontRight), 5);
        assert_eq!(bank.get(Wheel::FrontRight), 0);
    }

    #[test]
    fn counters_wrap_at_integer_width() {
        let bank = EncoderCounterBank::new();
        bank.counts[Wheel::FrontLeft.index()].store(i32::MAX, Ordering::Relaxed);
        bank.on_edge(Wheel::FrontLeft, true);
        assert_eq!(bank.get(Wheel::FrontLeft), i32::MIN);

        bank.on_edge(Wheel::FrontLeft, false);
        assert_eq!(bank.get(Wheel::FrontLeft), i32::MAX);
    }

    #[test]
    fn channel_forwards_to_its_wheel() {
        let bank = EncoderCounterBank::new();
        let rr = bank.channel(Wheel::RearRight);
        rr.edge(true);
        rr.edge(true);

        assert_eq!(rr.wheel(), Wheel::RearRight);
        assert_eq!(bank.snapshot_all().as_array(), &[0, 0, 0, 2]);
    }
}

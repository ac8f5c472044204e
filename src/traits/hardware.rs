//! Hardware abstraction traits for wheel actuation and timing.
//!
//! These traits are the boundary between the control core and the board.
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`Actuator`] | Commits one signed duty per wheel as a single frame |
//! | [`Clock`] | Millisecond time source for `no_std` environments |
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations
//! from [`crate::hal::mock`]. For the PCA9685 PWM expander used on the robot,
//! use [`crate::hal::Pca9685`].
//!
//! # Example
//!
//! ```rust
//! use mecanum_drive::traits::Actuator;
//! use mecanum_drive::hal::MockActuator;
//! use mecanum_drive::WheelFrame;
//!
//! let mut actuator = MockActuator::new();
//! actuator.write_frame(&WheelFrame::new(100, -100, 100, -100)).unwrap();
//!
//! assert_eq!(actuator.frames.len(), 1);
//! ```

use crate::wheels::WheelFrame;

/// Write-only actuation boundary for the four wheel motors.
///
/// A frame carries one signed duty per wheel. Positive means forward,
/// negative reverse, zero coast. Implementations must apply all four wheels
/// together; a caller never writes a single wheel on its own.
///
/// # Implementation Notes
///
/// - Duty magnitudes arrive already limited to the engine's maximum duty.
/// - `is_ready()` returns false until the hardware is initialized. The drive
///   engine turns every write into a no-op while it is false.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use mecanum_drive::traits::Actuator;
/// use mecanum_drive::WheelFrame;
///
/// struct MyBridge { /* hardware handles */ }
///
/// impl Actuator for MyBridge {
///     type Error = ();
///
///     fn is_ready(&self) -> bool {
///         true
///     }
///
///     fn write_frame(&mut self, frame: &WheelFrame) -> Result<(), ()> {
///         // Set direction pins, then all four PWM duties...
///         Ok(())
///     }
/// }
/// ```
pub trait Actuator {
    /// Error type for actuation writes.
    type Error;

    /// Returns true once the boundary can accept frames.
    fn is_ready(&self) -> bool;

    /// Applies one signed duty per wheel as a single update.
    fn write_frame(&mut self, frame: &WheelFrame) -> Result<(), Self::Error>;
}

/// Time source trait for `no_std` compatibility.
///
/// Provides monotonic time in milliseconds for the settle delay and the
/// telemetry cadence. On desktop, this can wrap `std::time::Instant`. On
/// embedded, use a hardware timer.
///
/// # Example
///
/// ```rust
/// use mecanum_drive::traits::Clock;
/// use mecanum_drive::hal::MockClock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.advance(100);
/// assert_eq!(clock.now_ms(), 100);
/// ```
pub trait Clock {
    /// Returns current time in milliseconds since an arbitrary epoch.
    ///
    /// Must be monotonically increasing.
    fn now_ms(&self) -> u64;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingActuator {
        ready: bool,
        writes: usize,
        last: WheelFrame,
    }

    impl Actuator for CountingActuator {
        type Error = ();

        fn is_ready(&self) -> bool {
            self.ready
        }

        fn write_frame(&mut self, frame: &WheelFrame) -> Result<(), ()> {
            self.writes += 1;
            self.last = *frame;
            Ok(())
        }
    }

    #[test]
    fn actuator_receives_whole_frame() {
        let mut act = CountingActuator {
            ready: true,
            writes: 0,
            last: WheelFrame::default(),
        };
        act.write_frame(&WheelFrame::new(1, 2, 3, 4)).unwrap();

        assert_eq!(act.writes, 1);
        assert_eq!(act.last.as_array(), &[1, 2, 3, 4]);
        assert!(act.is_ready());
    }
}

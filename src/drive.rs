//! Mecanum drive engine: speed and maneuver to one committed wheel frame.
//!
//! [`DriveEngine`] is the single source of truth for wheel actuation. Every
//! maneuver is computed as a full four-wheel frame before anything is
//! written, then handed to the [`Actuator`] in one call, so the robot never
//! runs on a half-updated vector.
//!
//! # Speed
//!
//! Speed is a percentage in `[0, 100]`, mapped linearly onto the duty range
//! `0..=max_duty`. Changing the speed does not move the robot and does not
//! rescale a maneuver already in flight; re-apply the maneuver for that.
//!
//! # Example
//!
//! ```rust
//! use mecanum_drive::{DriveEngine, Maneuver, hal::MockActuator};
//!
//! let mut engine = DriveEngine::new(MockActuator::new());
//! engine.set_speed_percent(100);
//! engine.apply_maneuver(Maneuver::RotateLeft).unwrap();
//!
//! assert!(engine.is_running());
//! assert_eq!(engine.frame().as_array(), &[-4095, 4095, -4095, 4095]);
//!
//! engine.stop().unwrap();
//! assert!(!engine.is_running());
//! ```

use crate::maneuver::Maneuver;
use crate::traits::Actuator;
use crate::wheels::WheelFrame;

/// Full-scale duty of the PCA9685's 12-bit PWM.
pub const PWM_MAX: u16 = 4095;

/// Speed the engine starts with, matching a half-scale boot duty.
pub const DEFAULT_SPEED_PERCENT: u8 = 50;

/// What happened to a requested frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The frame was written and the drive state updated.
    Committed,
    /// The actuation boundary is not initialized; nothing changed.
    BoundaryUnavailable,
}

/// Snapshot of the drive state for status and telemetry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriveState {
    /// Last committed maneuver.
    pub maneuver: Maneuver,
    /// Commanded speed in percent.
    pub speed_percent: u8,
    /// True iff any wheel of the last committed frame is non-zero.
    pub running: bool,
}

impl Default for DriveState {
    fn default() -> Self {
        Self {
            maneuver: Maneuver::Stop,
            speed_percent: DEFAULT_SPEED_PERCENT,
            running: false,
        }
    }
}

/// Converts a percentage to duty with integer arithmetic.
///
/// `percent` is clamped to `[0, 100]` first.
///
/// ```
/// use mecanum_drive::drive::percent_to_duty;
///
/// assert_eq!(percent_to_duty(0, 4095), 0);
/// assert_eq!(percent_to_duty(50, 4095), 2047);
/// assert_eq!(percent_to_duty(100, 4095), 4095);
/// assert_eq!(percent_to_duty(250, 4095), 4095);
/// ```
pub fn percent_to_duty(percent: u8, max_duty: u16) -> u16 {
    let p = u32::from(percent.min(100));
    (p * u32::from(max_duty) / 100) as u16
}

/// Owns the commanded speed and maneuver and drives the [`Actuator`].
///
/// # Type Parameter
///
/// - `A`: The actuation boundary ([`Actuator`] trait)
///
/// # Thread Safety
///
/// The engine runs only in the cooperative main loop and is not shared with
/// interrupt handlers.
pub struct DriveEngine<A: Actuator> {
    actuator: A,
    max_duty: u16,
    speed_percent: u8,
    duty: u16,
    maneuver: Maneuver,
    frame: WheelFrame,
}

impl<A: Actuator> DriveEngine<A> {
    /// Creates an engine at the default speed with full-scale [`PWM_MAX`].
    pub fn new(actuator: A) -> Self {
        Self::with_max_duty(actuator, PWM_MAX)
    }

    /// Creates an engine with a board-specific full-scale duty.
    ///
    /// `max_duty` is capped at `i16::MAX` so signed frames cannot overflow.
    pub fn with_max_duty(actuator: A, max_duty: u16) -> Self {
        let max_duty = max_duty.min(i16::MAX as u16);
        Self {
            actuator,
            max_duty,
            speed_percent: DEFAULT_SPEED_PERCENT,
            duty: percent_to_duty(DEFAULT_SPEED_PERCENT, max_duty),
            maneuver: Maneuver::Stop,
            frame: WheelFrame::default(),
        }
    }

    /// Sets the speed used by the next [`apply_maneuver`](Self::apply_maneuver).
    ///
    /// Out-of-range values are clamped to `[0, 100]`. Does not touch the
    /// wheels.
    pub fn set_speed_percent(&mut self, percent: i32) {
        let clamped = percent.clamp(0, 100) as u8;
        self.speed_percent = clamped;
        self.duty = percent_to_duty(clamped, self.max_duty);
        tracing::debug!(percent = clamped, duty = self.duty, "speed set");
    }

    /// Commits `maneuver` at the current speed as one frame.
    ///
    /// On success the current maneuver and running flag are updated. If the
    /// boundary is not ready, or the write fails, the drive state is left as
    /// it was.
    pub fn apply_maneuver(&mut self, maneuver: Maneuver) -> Result<FrameOutcome, A::Error> {
        if !self.actuator.is_ready() {
            tracing::warn!(?maneuver, "actuation boundary not ready, frame skipped");
            return Ok(FrameOutcome::BoundaryUnavailable);
        }

        let frame = maneuver.frame(self.duty as i16);
        self.actuator.write_frame(&frame)?;

        self.frame = frame;
        self.maneuver = maneuver;
        let [fl, fr, rl, rr] = frame.into_array();
        tracing::debug!(fl, fr, rl, rr, ?maneuver, "frame committed");
        Ok(FrameOutcome::Committed)
    }

    /// Stops all four wheels. Same as `apply_maneuver(Maneuver::Stop)`.
    pub fn stop(&mut self) -> Result<FrameOutcome, A::Error> {
        self.apply_maneuver(Maneuver::Stop)
    }

    /// Last committed maneuver.
    #[inline]
    pub fn current_maneuver(&self) -> Maneuver {
        self.maneuver
    }

    /// Commanded speed in percent.
    #[inline]
    pub fn speed_percent(&self) -> u8 {
        self.speed_percent
    }

    /// Duty magnitude the next maneuver will use.
    #[inline]
    pub fn duty(&self) -> u16 {
        self.duty
    }

    /// Full-scale duty.
    #[inline]
    pub fn max_duty(&self) -> u16 {
        self.max_duty
    }

    /// True iff any wheel of the last committed frame is non-zero.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.frame.any(|duty| *duty != 0)
    }

    /// Last committed frame.
    #[inline]
    pub fn frame(&self) -> WheelFrame {
        self.frame
    }

    /// Current drive state snapshot.
    pub fn state(&self) -> DriveState {
        DriveState {
            maneuver: self.maneuver,
            speed_percent: self.speed_percent,
            running: self.is_running(),
        }
    }

    /// Shared access to the actuation boundary.
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Exclusive access to the actuation boundary.
    pub fn actuator_mut(&mut self) -> &mut A {
        &mut self.actuator
    }
}

//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for every boundary trait, so the whole
//! control core runs on desktop without the robot attached.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockActuator`] | [`Actuator`] | Records every committed frame |
//! | [`MockSink`] | [`StatusSink`] | Records status updates in order |
//! | [`MockTransport`] | [`LinkTransport`] | Captures sends and re-advertisements |
//! | [`MockClock`] | [`Clock`] | Controllable time source |
//! | [`MockI2c`] | `embedded_hal::i2c::I2c` | Records bus writes for the PCA9685 |
//! | [`NoopDelay`] | `embedded_hal::delay::DelayNs` | Returns immediately |
//! | [`MockPin`] | `embedded_hal::digital::OutputPin` | Records LED levels |
//!
//! # Example
//!
//! ```rust
//! use mecanum_drive::{DriveEngine, Maneuver, WheelFrame};
//! use mecanum_drive::hal::MockActuator;
//!
//! let mut engine = DriveEngine::new(MockActuator::new());
//! engine.apply_maneuver(Maneuver::Forward).unwrap();
//! engine.stop().unwrap();
//!
//! let frames = &engine.actuator().frames;
//! assert_eq!(frames.len(), 2);
//! assert_eq!(frames[1], WheelFrame::splat(0));
//! ```
//!
//! [`Actuator`]: crate::traits::Actuator
//! [`StatusSink`]: crate::traits::StatusSink
//! [`LinkTransport`]: crate::traits::LinkTransport
//! [`Clock`]: crate::traits::Clock

extern crate alloc;
use alloc::string::String;
use alloc::vec::Vec;

use crate::encoder::EncoderSnapshot;
use crate::maneuver::Maneuver;
use crate::traits::{Actuator, Clock, LinkTransport, StatusSink};
use crate::wheels::WheelFrame;

// ============================================================================
// Hardware Mocks
// ============================================================================

/// Mock actuation boundary.
///
/// Records every frame it accepts. Use the public fields to inspect or steer
/// behavior from a test.
///
/// ```rust
/// use mecanum_drive::hal::MockActuator;
/// use mecanum_drive::traits::Actuator;
/// use mecanum_drive::WheelFrame;
///
/// let mut act = MockActuator::new();
/// act.fail_writes = true;
/// assert!(act.write_frame(&WheelFrame::splat(1)).is_err());
/// assert!(act.frames.is_empty());
/// ```
#[derive(Debug)]
pub struct MockActuator {
    /// Frames accepted so far, oldest first.
    pub frames: Vec<WheelFrame>,
    /// Value reported by `is_ready`.
    pub ready: bool,
    /// When true, `write_frame` fails without recording.
    pub fail_writes: bool,
}

impl MockActuator {
    /// Creates a ready actuator with no recorded frames.
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            ready: true,
            fail_writes: false,
        }
    }

    /// Creates an actuator that reports itself as not yet initialized.
    pub fn uninitialized() -> Self {
        Self {
            ready: false,
            ..Self::new()
        }
    }

    /// Most recently accepted frame.
    pub fn last_frame(&self) -> Option<WheelFrame> {
        self.frames.last().copied()
    }
}

impl Default for MockActuator {
    fn default() -> Self {
        Self::new()
    }
}

impl Actuator for MockActuator {
    type Error = ();

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn write_frame(&mut self, frame: &WheelFrame) -> Result<(), ()> {
        if self.fail_writes {
            return Err(());
        }
        self.frames.push(*frame);
        Ok(())
    }
}

/// Mock clock for testing.
///
/// Provides a controllable time source for testing time-dependent behavior.
///
/// # Example
///
/// ```rust
/// use mecanum_drive::hal::MockClock;
/// use mecanum_drive::traits::Clock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.set(1000);
/// assert_eq!(clock.now_ms(), 1000);
///
/// clock.advance(500);
/// assert_eq!(clock.now_ms(), 1500);
/// ```
#[derive(Debug, Default)]
pub struct MockClock {
    current_ms: u64,
}

impl MockClock {
    /// Creates a new mock clock starting at 0ms.
    pub fn new() -> Self {
        Self { current_ms: 0 }
    }

    /// Sets the current time in milliseconds.
    pub fn set(&mut self, ms: u64) {
        self.current_ms = ms;
    }

    /// Advances the clock by the given duration.
    pub fn advance(&mut self, ms: u64) {
        self.current_ms = self.current_ms.wrapping_add(ms);
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.current_ms
    }
}

// ============================================================================
// Bus Mocks
// ============================================================================

/// Error returned by [`MockI2c`] when `fail` is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockI2cError;

impl embedded_hal::i2c::Error for MockI2cError {
    fn kind(&self) -> embedded_hal::i2c::ErrorKind {
        embedded_hal::i2c::ErrorKind::Other
    }
}

/// Mock I2C bus.
///
/// Records every write as `(address, bytes)`. Reads return zeros.
#[derive(Debug, Default)]
pub struct MockI2c {
    /// Writes seen so far, oldest first.
    pub writes: Vec<(u8, Vec<u8>)>,
    /// When true, every transaction fails.
    pub fail: bool,
}

impl MockI2c {
    /// Creates a bus with nothing recorded.
    pub fn new() -> Self {
        Self::default()
    }
}

impl embedded_hal::i2c::ErrorType for MockI2c {
    type Error = MockI2cError;
}

impl embedded_hal::i2c::I2c for MockI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [embedded_hal::i2c::Operation<'_>],
    ) -> Result<(), MockI2cError> {
        if self.fail {
            return Err(MockI2cError);
        }
        for op in operations {
            match op {
                embedded_hal::i2c::Operation::Write(bytes) => {
                    self.writes.push((address, bytes.to_vec()));
                }
                embedded_hal::i2c::Operation::Read(buf) => buf.fill(0),
            }
        }
        Ok(())
    }
}

/// Delay that returns immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDelay;

impl embedded_hal::delay::DelayNs for NoopDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Error returned by [`MockPin`] when `fail` is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockPinError;

impl embedded_hal::digital::Error for MockPinError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

/// Mock output pin.
///
/// Records every level written, `true` for high.
#[derive(Debug, Default)]
pub struct MockPin {
    /// Levels written so far, oldest first.
    pub levels: Vec<bool>,
    /// When true, writes fail without recording.
    pub fail: bool,
}

impl MockPin {
    /// Creates a pin with nothing recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last level written, `false` if never driven.
    pub fn is_high(&self) -> bool {
        self.levels.last().copied().unwrap_or(false)
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = MockPinError;
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), MockPinError> {
        if self.fail {
            return Err(MockPinError);
        }
        self.levels.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), MockPinError> {
        if self.fail {
            return Err(MockPinError);
        }
        self.levels.push(true);
        Ok(())
    }
}

// ============================================================================
// Status Mock
// ============================================================================

/// One call recorded by [`MockSink`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SinkEvent {
    /// `connection_changed`
    Connection(bool),
    /// `message_received`
    Message(String),
    /// `motor_status_changed`
    Motor {
        /// Maneuver reported.
        maneuver: Maneuver,
        /// Speed reported.
        speed_percent: u8,
        /// Running flag reported.
        running: bool,
    },
    /// `encoder_snapshot`
    Encoders(EncoderSnapshot),
    /// `toggle_encoder_view`, with the resulting view state.
    ViewToggled(bool),
}

/// Mock status sink that records every update in order.
///
/// ```rust
/// use mecanum_drive::hal::{MockSink, SinkEvent};
/// use mecanum_drive::traits::StatusSink;
///
/// let mut sink = MockSink::new();
/// sink.connection_changed(true);
/// assert!(sink.toggle_encoder_view());
///
/// assert_eq!(
///     sink.events,
///     vec![SinkEvent::Connection(true), SinkEvent::ViewToggled(true)]
/// );
/// ```
#[derive(Debug, Default)]
pub struct MockSink {
    /// Recorded updates, oldest first.
    pub events: Vec<SinkEvent>,
    /// Whether the encoder view is active.
    pub encoder_view: bool,
}

impl MockSink {
    /// Creates an empty recorder in the motor view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded motor updates as `(maneuver, speed, running)` tuples.
    pub fn motor_updates(&self) -> Vec<(Maneuver, u8, bool)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Motor {
                    maneuver,
                    speed_percent,
                    running,
                } => Some((*maneuver, *speed_percent, *running)),
                _ => None,
            })
            .collect()
    }

    /// Recorded raw messages.
    pub fn messages(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SinkEvent::Message(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Number of encoder snapshots received.
    pub fn snapshot_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SinkEvent::Encoders(_)))
            .count()
    }

    /// Forgets everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl StatusSink for MockSink {
    fn connection_changed(&mut self, connected: bool) {
        self.events.push(SinkEvent::Connection(connected));
    }

    fn message_received(&mut self, message: &str) {
        self.events.push(SinkEvent::Message(message.into()));
    }

    fn motor_status_changed(&mut self, maneuver: Maneuver, speed_percent: u8, running: bool) {
        self.events.push(SinkEvent::Motor {
            maneuver,
            speed_percent,
            running,
        });
    }

    fn encoder_snapshot(&mut self, counts: &EncoderSnapshot) {
        self.events.push(SinkEvent::Encoders(*counts));
    }

    fn toggle_encoder_view(&mut self) -> bool {
        self.encoder_view = !self.encoder_view;
        self.events.push(SinkEvent::ViewToggled(self.encoder_view));
        self.encoder_view
    }

    fn encoder_view_active(&self) -> bool {
        self.encoder_view
    }
}

// ============================================================================
// Link Mock
// ============================================================================

/// Mock wireless transport.
///
/// Captures outbound messages and re-advertisement requests.
///
/// ```rust
/// use mecanum_drive::hal::MockTransport;
/// use mecanum_drive::traits::LinkTransport;
///
/// let mut link = MockTransport::new();
/// link.send(b"hello").unwrap();
/// link.start_advertising().unwrap();
///
/// assert_eq!(link.sent_text(), vec!["hello"]);
/// assert_eq!(link.advertise_count, 1);
/// ```
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Messages sent, oldest first.
    pub sent: Vec<Vec<u8>>,
    /// Number of `start_advertising` calls.
    pub advertise_count: usize,
    /// When true, `send` fails without recording.
    pub fail_sends: bool,
}

impl MockTransport {
    /// Creates a transport with nothing recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sent messages decoded as UTF-8 (lossily).
    pub fn sent_text(&self) -> Vec<String> {
        self.sent
            .iter()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .collect()
    }
}

impl LinkTransport for MockTransport {
    type Error = ();

    fn send(&mut self, bytes: &[u8]) -> Result<(), ()> {
        if self.fail_sends {
            return Err(());
        }
        self.sent.push(bytes.to_vec());
        Ok(())
    }

    fn start_advertising(&mut self) -> Result<(), ()> {
        self.advertise_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uninitialized_actuator_reports_not_ready() {
        let act = MockActuator::uninitialized();
        assert!(!act.is_ready());
        assert!(MockActuator::new().is_ready());
    }

    #[test]
    fn sink_filters_by_kind() {
        let mut sink = MockSink::new();
        sink.message_received("forward");
        sink.motor_status_changed(Maneuver::Forward, 50, true);
        sink.encoder_snapshot(&EncoderSnapshot::splat(3));

        assert_eq!(sink.messages(), vec!["forward"]);
        assert_eq!(sink.motor_updates(), vec![(Maneuver::Forward, 50, true)]);
        assert_eq!(sink.snapshot_count(), 1);
    }

    #[test]
    fn failing_transport_records_nothing() {
        let mut link = MockTransport::new();
        link.fail_sends = true;
        assert!(link.send(b"x").is_err());
        assert!(link.sent.is_empty());
    }
}

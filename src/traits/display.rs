//! Status sink abstraction for the on-robot display.
//!
//! This module defines the [`StatusSink`] trait. The control core pushes
//! connection, message, motor, and encoder updates into it and never reads
//! anything back.

use crate::encoder::EncoderSnapshot;
use crate::maneuver::Maneuver;

/// Fire-and-forget sink for status updates.
///
/// Implementors render to an OLED, a log, or a test recorder. No method
/// returns a value; a sink that fails to draw simply drops the update.
///
/// # Example
///
/// ```ignore
/// use mecanum_drive::traits::StatusSink;
/// use mecanum_drive::{EncoderSnapshot, Maneuver};
///
/// struct SerialSink;
///
/// impl StatusSink for SerialSink {
///     fn connection_changed(&mut self, connected: bool) {}
///     fn message_received(&mut self, message: &str) {}
///     fn motor_status_changed(&mut self, maneuver: Maneuver, speed_percent: u8, running: bool) {}
///     fn encoder_snapshot(&mut self, counts: &EncoderSnapshot) {}
///     fn toggle_encoder_view(&mut self) -> bool { false }
/// }
/// ```
pub trait StatusSink {
    /// The wireless link connected or dropped.
    fn connection_changed(&mut self, connected: bool);

    /// A raw command message arrived, before any parsing.
    fn message_received(&mut self, message: &str);

    /// The drive state after a dispatched command.
    fn motor_status_changed(&mut self, maneuver: Maneuver, speed_percent: u8, running: bool);

    /// A fresh set of encoder counts.
    fn encoder_snapshot(&mut self, counts: &EncoderSnapshot);

    /// Switches between the motor status view and the encoder view.
    ///
    /// Returns true if the encoder view is now active.
    fn toggle_encoder_view(&mut self) -> bool;

    /// Whether the encoder view is active.
    ///
    /// Sinks without an encoder view keep the default.
    fn encoder_view_active(&self) -> bool {
        false
    }
}

impl<S: StatusSink + ?Sized> StatusSink for &mut S {
    fn connection_changed(&mut self, connected: bool) {
        (**self).connection_changed(connected)
    }

    fn message_received(&mut self, message: &str) {
        (**self).message_received(message)
    }

    fn motor_status_changed(&mut self, maneuver: Maneuver, speed_percent: u8, running: bool) {
        (**self).motor_status_changed(maneuver, speed_percent, running)
    }

    fn encoder_snapshot(&mut self, counts: &EncoderSnapshot) {
        (**self).encoder_snapshot(counts)
    }

    fn toggle_encoder_view(&mut self) -> bool {
        (**self).toggle_encoder_view()
    }

    fn encoder_view_active(&self) -> bool {
        (**self).encoder_view_active()
    }
}

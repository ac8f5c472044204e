//! Connection LED.
//!
//! [`ConnectionLed`] wraps any [`StatusSink`] and mirrors the link state on
//! a digital output: lit while a peer is connected, dark otherwise. Every
//! update is forwarded to the wrapped sink unchanged.
//!
//! # Example
//!
//! ```rust
//! use mecanum_drive::hal::{ConnectionLed, MockPin, MockSink, NoopDelay};
//! use mecanum_drive::traits::StatusSink;
//!
//! let mut led = ConnectionLed::new(MockSink::new(), MockPin::new());
//! led.startup_blink(&mut NoopDelay);
//!
//! led.connection_changed(true);
//! assert!(led.pin().is_high());
//! assert_eq!(led.inner().events.len(), 1);
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::encoder::EncoderSnapshot;
use crate::maneuver::Maneuver;
use crate::traits::StatusSink;

/// Number of blinks in the boot signal.
pub const STARTUP_BLINKS: u32 = 3;

/// On and off time of each boot blink, in milliseconds.
pub const STARTUP_BLINK_MS: u32 = 200;

/// Status sink decorator that drives the connection LED.
#[derive(Debug)]
pub struct ConnectionLed<S, P> {
    inner: S,
    pin: P,
    lit: bool,
}

impl<S, P: OutputPin> ConnectionLed<S, P> {
    /// Wraps `inner` and switches the LED off.
    pub fn new(inner: S, pin: P) -> Self {
        let mut led = Self {
            inner,
            pin,
            lit: false,
        };
        led.drive(false);
        led
    }

    /// Blinks the boot signal, then restores the connection level.
    ///
    /// Blocks for `2 * STARTUP_BLINKS * STARTUP_BLINK_MS`.
    pub fn startup_blink(&mut self, delay: &mut impl DelayNs) {
        for _ in 0..STARTUP_BLINKS {
            self.drive(true);
            delay.delay_ms(STARTUP_BLINK_MS);
            self.drive(false);
            delay.delay_ms(STARTUP_BLINK_MS);
        }
        self.drive(self.lit);
    }

    /// Whether the LED shows a connected peer.
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    /// The wrapped sink.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// The wrapped sink, mutably (e.g. to render a dirty screen).
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// The LED pin.
    pub fn pin(&self) -> &P {
        &self.pin
    }

    /// Splits back into the sink and the pin.
    pub fn into_parts(self) -> (S, P) {
        (self.inner, self.pin)
    }

    fn drive(&mut self, high: bool) {
        let result = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if let Err(err) = result {
            tracing::warn!(?err, high, "status LED write failed");
        }
    }
}

impl<S: StatusSink, P: OutputPin> StatusSink for ConnectionLed<S, P> {
    fn connection_changed(&mut self, connected: bool) {
        self.lit = connected;
        self.drive(connected);
        self.inner.connection_changed(connected);
    }

    fn message_received(&mut self, message: &str) {
        self.inner.message_received(message)
    }

    fn motor_status_changed(&mut self, maneuver: Maneuver, speed_percent: u8, running: bool) {
        self.inner
            .motor_status_changed(maneuver, speed_percent, running)
    }

    fn encoder_snapshot(&mut self, counts: &EncoderSnapshot) {
        self.inner.encoder_snapshot(counts)
    }

    fn toggle_encoder_view(&mut self) -> bool {
        self.inner.toggle_encoder_view()
    }

    fn encoder_view_active(&self) -> bool {
        self.inner.encoder_view_active()
    }
}

//! Trait definitions for hardware abstraction, the wireless link, and the
//! status display.
//!
//! This module defines the core abstractions that allow mecanum-drive to:
//! - Run on different hardware (ESP32 + PCA9685, desktop mock)
//! - Use different link transports (BLE, console)
//! - Report status to any display or recorder
//!
//! # Submodules
//!
//! - `hardware`: Wheel actuation, clock
//! - `link`: Transport trait and inbound link events
//! - `display`: Status sink trait
//!
//! # Hardware Abstraction
//!
//! - [`Actuator`]: Four-wheel signed-duty frames
//! - [`Clock`]: Time source for `no_std` environments
//!
//! Encoder inputs have no trait: interrupt lines are bound directly to
//! [`EncoderChannel`](crate::EncoderChannel) trampolines.

pub mod display;
pub mod hardware;
pub mod link;

pub use display::*;
pub use hardware::*;
pub use link::*;

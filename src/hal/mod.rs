//! Hardware Abstraction Layer implementations.
//!
//! This module contains concrete implementations of the traits
//! defined in [`crate::traits`] for various platforms.
//!
//! # Available Implementations
//!
//! - `mock`: Test implementations for desktop development
//! - `pca9685`: PCA9685 PWM expander over any `embedded-hal` I2C bus
//! - `shared_bus`: one I2C controller shared by the expander and the OLED
//! - `status_led`: connection LED on any `embedded-hal` output pin
//! - `console`: stdin/stdout link transport (requires `std` feature)
//! - `StdClock`: `Instant`-backed [`Clock`](crate::traits::Clock) (requires `std` feature)
//! - `esp32`: ESP32-C3 encoder interrupts and OLED (requires `esp32` feature)

pub mod mock;
pub mod pca9685;
pub mod shared_bus;
pub mod status_led;

#[cfg(feature = "std")]
pub mod console;
#[cfg(feature = "std")]
mod std_clock;

#[cfg(feature = "esp32")]
pub mod esp32;

pub use mock::*;
pub use pca9685::{Pca9685, Pca9685Error};
pub use shared_bus::SharedI2c;
pub use status_led::ConnectionLed;

#[cfg(feature = "std")]
pub use console::ConsoleTransport;
#[cfg(feature = "std")]
pub use std_clock::StdClock;

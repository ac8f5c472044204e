//! ESP32-C3 hardware bindings for the mecanum base.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32-C3 (RISC-V 160MHz, single core)
//! - **Motor PWM**: PCA9685 16-channel expander (I2C 0x40) feeding two
//!   dual H-bridges; see [`crate::hal::pca9685`] for the channel map
//! - **Encoders**: four quadrature encoders, A channel on an edge interrupt
//! - **Display**: SSD1306 128x64 OLED (I2C 0x3C), same bus as the expander
//!
//! # Pin Assignments
//!
//! See the [`pins`] module.

mod encoder;

pub use encoder::bind_encoders;

#[cfg(feature = "display")]
mod display;
#[cfg(feature = "display")]
pub use display::{Esp32Display, OledInterface};

/// GPIO assignments.
pub mod pins {
    use crate::wheels::Wheel;

    // =========================================================================
    // Wheel Encoders (A = interrupt, B = direction)
    // =========================================================================

    /// Front-left encoder A
    pub const ENC_FL_A: i32 = 0;
    /// Front-left encoder B
    pub const ENC_FL_B: i32 = 1;
    /// Front-right encoder A
    pub const ENC_FR_A: i32 = 2;
    /// Front-right encoder B
    pub const ENC_FR_B: i32 = 3;
    /// Rear-left encoder A
    pub const ENC_RL_A: i32 = 6;
    /// Rear-left encoder B
    pub const ENC_RL_B: i32 = 7;
    /// Rear-right encoder A
    pub const ENC_RR_A: i32 = 8;
    /// Rear-right encoder B
    pub const ENC_RR_B: i32 = 9;

    /// `(A, B)` pins of one wheel's encoder.
    pub const fn encoder(wheel: Wheel) -> (i32, i32) {
        match wheel {
            Wheel::FrontLeft => (ENC_FL_A, ENC_FL_B),
            Wheel::FrontRight => (ENC_FR_A, ENC_FR_B),
            Wheel::RearLeft => (ENC_RL_A, ENC_RL_B),
            Wheel::RearRight => (ENC_RR_A, ENC_RR_B),
        }
    }

    // =========================================================================
    // I2C (PCA9685 + SSD1306)
    // =========================================================================

    /// I2C data line. GPIO8/9 carry the rear-right encoder.
    pub const I2C_SDA: i32 = 4;

    /// I2C clock line
    pub const I2C_SCL: i32 = 5;

    /// SSD1306 OLED address
    pub const OLED_I2C_ADDR: u8 = 0x3C;

    // =========================================================================
    // Status LED
    // =========================================================================

    /// Onboard LED, lit while a peer is connected. Driven by
    /// [`ConnectionLed`](crate::hal::ConnectionLed).
    pub const LED: i32 = 10;
}

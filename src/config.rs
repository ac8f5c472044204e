//! Shared configuration for desktop and ESP32.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`. Defaults reproduce the robot's
//! stock firmware: device `KIMSF1`, 12-bit PWM at 1 kHz, 50 % boot speed,
//! 500 ms re-advertise settle, encoder report every 5 s.
//!
//! # Example
//!
//! ```rust
//! use mecanum_drive::config::{Config, DriveConfig, LinkConfig};
//!
//! // Use defaults
//! let config = Config::default();
//! assert_eq!(config.link.settle_ms, 500);
//!
//! // Or customize
//! let config = Config::default()
//!     .with_drive(DriveConfig::default().with_default_speed_percent(30))
//!     .with_link(LinkConfig::default().with_stop_on_disconnect(true));
//! ```

use heapless::String as HString;

/// Maximum length for short config strings (device name)
pub const MAX_SHORT_STRING: usize = 64;

/// Maximum length for longer config strings (greeting text)
pub const MAX_LONG_STRING: usize = 128;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Type alias for longer config strings
pub type LongString = HString<MAX_LONG_STRING>;

// ============================================================================
// Helpers for creating heapless strings
// ============================================================================

/// Copies the longest prefix of `s` that fits in `N` bytes on a char boundary.
fn truncated<const N: usize>(s: &str) -> HString<N> {
    let mut end = s.len().min(N);
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    let mut hs = HString::new();
    // Cannot fail: `end <= N`.
    let _ = hs.push_str(&s[..end]);
    hs
}

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    truncated(s)
}

/// Create a LongString from a &str, truncating if too long
pub fn long_string(s: &str) -> LongString {
    truncated(s)
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete robot configuration
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Drive engine and PWM configuration
    pub drive: DriveConfig,
    /// Wireless link configuration
    pub link: LinkConfig,
    /// Encoder telemetry and main loop timing
    pub telemetry: TelemetryConfig,
}

impl Config {
    /// Set drive configuration
    pub fn with_drive(mut self, drive: DriveConfig) -> Self {
        self.drive = drive;
        self
    }

    /// Set link configuration
    pub fn with_link(mut self, link: LinkConfig) -> Self {
        self.link = link;
        self
    }

    /// Set telemetry configuration
    pub fn with_telemetry(mut self, telemetry: TelemetryConfig) -> Self {
        self.telemetry = telemetry;
        self
    }
}

// ============================================================================
// Drive Config
// ============================================================================

/// Drive engine and PWM expander configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriveConfig {
    /// Full-scale PWM duty
    pub max_duty: u16,
    /// PWM frequency in Hz
    pub pwm_freq_hz: u16,
    /// Speed in percent applied at boot
    pub default_speed_percent: u8,
    /// 7-bit I2C address of the PWM expander
    pub i2c_address: u8,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            max_duty: crate::drive::PWM_MAX,
            pwm_freq_hz: 1000,
            default_speed_percent: crate::drive::DEFAULT_SPEED_PERCENT,
            i2c_address: 0x40,
        }
    }
}

impl DriveConfig {
    /// Set the full-scale duty
    pub fn with_max_duty(mut self, max_duty: u16) -> Self {
        self.max_duty = max_duty;
        self
    }

    /// Set the PWM frequency
    pub fn with_pwm_freq_hz(mut self, hz: u16) -> Self {
        self.pwm_freq_hz = hz;
        self
    }

    /// Set the boot speed, clamped to `[0, 100]`
    pub fn with_default_speed_percent(mut self, percent: u8) -> Self {
        self.default_speed_percent = percent.min(100);
        self
    }

    /// Set the expander's I2C address
    pub fn with_i2c_address(mut self, address: u8) -> Self {
        self.i2c_address = address;
        self
    }
}

// ============================================================================
// Link Config
// ============================================================================

/// Wireless link configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkConfig {
    /// Device name, advertised to peers and shown in logs
    pub device_name: ShortString,
    /// Delay between disconnect and re-advertising, in milliseconds
    pub settle_ms: u32,
    /// Message sent to each newly connected peer
    pub greeting: LongString,
    /// Stop the wheels when the peer disconnects
    pub stop_on_disconnect: bool,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            device_name: short_string("KIMSF1"),
            settle_ms: 500,
            greeting: long_string("Connected to Mecanum Robot"),
            stop_on_disconnect: false,
        }
    }
}

impl LinkConfig {
    /// Set the advertised name
    pub fn with_device_name(mut self, name: &str) -> Self {
        self.device_name = short_string(name);
        self
    }

    /// Set the re-advertise settle delay
    pub fn with_settle_ms(mut self, ms: u32) -> Self {
        self.settle_ms = ms;
        self
    }

    /// Set the connect greeting
    pub fn with_greeting(mut self, greeting: &str) -> Self {
        self.greeting = long_string(greeting);
        self
    }

    /// Set whether disconnect stops the wheels
    pub fn with_stop_on_disconnect(mut self, stop: bool) -> Self {
        self.stop_on_disconnect = stop;
        self
    }
}

// ============================================================================
// Telemetry Config
// ============================================================================

/// Encoder telemetry and main loop timing
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TelemetryConfig {
    /// Encoder snapshot interval in milliseconds
    pub encoder_interval_ms: u32,
    /// Main loop sleep between ticks in milliseconds
    pub loop_interval_ms: u32,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            encoder_interval_ms: 5000,
            loop_interval_ms: 10,
        }
    }
}

impl TelemetryConfig {
    /// Set the encoder snapshot interval
    pub fn with_encoder_interval_ms(mut self, ms: u32) -> Self {
        self.encoder_interval_ms = ms;
        self
    }

    /// Set the main loop interval
    pub fn with_loop_interval_ms(mut self, ms: u32) -> Self {
        self.loop_interval_ms = ms;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

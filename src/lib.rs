//! # mecanum-drive
//!
//! Control core for a four-wheel mecanum robot driven by short text
//! commands over a wireless link, with interrupt-fed wheel encoders.
//!
//! ## Features
//!
//! - **Mecanum kinematics**: nine named maneuvers, each a fixed per-wheel
//!   sign pattern scaled by one speed, committed as a single four-wheel frame
//! - **Encoder counting**: four lock-free counters fed from interrupt context
//!   through fixed trampolines, read from the main loop
//! - **Text protocol**: one-pass, case-insensitive command parsing with a
//!   closed result type
//! - **Link session**: connection gating, echo replies, and a non-blocking
//!   re-advertise after disconnect
//! - **Hardware abstraction**: traits for actuation, status display, and
//!   transport, with mocks for desktop testing
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `wheels`, `maneuver` - Per-wheel values and the mecanum sign table
//! - `drive` - Speed + maneuver to committed frames
//! - `encoder` - Interrupt-fed counter bank
//! - `command`, `router` - Text parsing and dispatch
//! - `link`, `telemetry`, `robot` - Session, periodic snapshots, main loop
//! - `status` - Text model of the OLED
//! - `traits` - Hardware and link abstractions
//! - `hal` - Concrete implementations (mock for testing, PCA9685, console,
//!   esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use mecanum_drive::{
//!     config::Config,
//!     hal::{MockActuator, MockSink, MockTransport},
//!     EncoderCounterBank, LinkEvent, Maneuver, MecanumRobot,
//! };
//!
//! static ENCODERS: EncoderCounterBank = EncoderCounterBank::new();
//!
//! let mut robot = MecanumRobot::new(
//!     &Config::default(),
//!     MockActuator::new(),
//!     &ENCODERS,
//!     MockSink::new(),
//!     MockTransport::new(),
//! );
//!
//! robot.handle(LinkEvent::PeerConnected, 0);
//! robot.handle(LinkEvent::text("  SPEED:75  "), 5);
//! robot.handle(LinkEvent::text("Forward"), 10);
//!
//! let engine = robot.router().engine();
//! assert_eq!(engine.current_maneuver(), Maneuver::Forward);
//! assert_eq!(engine.speed_percent(), 75);
//!
//! robot.handle(LinkEvent::text("stop"), 15);
//! assert!(!robot.router().engine().is_running());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Text command parsing.
pub mod command;
/// Shared configuration system for desktop and ESP32.
pub mod config;
/// Mecanum drive engine.
pub mod drive;
/// Interrupt-fed wheel encoder counters.
pub mod encoder;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Wireless link session state machine.
pub mod link;
/// Named maneuvers and their sign patterns.
pub mod maneuver;
/// Main-loop aggregate of link, router, and telemetry.
pub mod robot;
/// Command dispatch to the engine, encoders, and status sink.
pub mod router;
/// Text model of the status display.
pub mod status;
/// Periodic encoder snapshots.
pub mod telemetry;
/// Core traits for hardware and link abstraction.
pub mod traits;
/// Firmware version reporting.
pub mod version;
/// Per-wheel addressing.
pub mod wheels;

// Re-exports for convenience
pub use command::{parse, Command, SystemCommand, UnknownReason};
pub use drive::{DriveEngine, DriveState, FrameOutcome, PWM_MAX};
pub use encoder::{EncoderChannel, EncoderCounterBank, EncoderSnapshot};
pub use link::{ConnectionState, LinkSession};
pub use maneuver::Maneuver;
pub use robot::MecanumRobot;
pub use router::{CommandRouter, Dispatch, OperatingMode};
pub use status::StatusScreen;
pub use telemetry::EncoderTelemetry;
pub use traits::{Actuator, Clock, LinkEvent, LinkTransport, StatusSink};
pub use version::{FirmwareVersion, FIRMWARE_VERSION};
pub use wheels::{Wheel, WheelFrame, WheelSet};

// Config re-exports
pub use config::{Config, DriveConfig, LinkConfig, TelemetryConfig};

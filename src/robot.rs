//! Main-loop aggregate.
//!
//! [`MecanumRobot`] owns the link session, the command router, and the
//! encoder telemetry, and is driven by two calls from one cooperative loop:
//!
//! - [`handle`](MecanumRobot::handle) for each [`LinkEvent`] the transport
//!   delivered since the last iteration,
//! - [`tick`](MecanumRobot::tick) once per iteration for deadlines.
//!
//! # Example
//!
//! ```rust
//! use mecanum_drive::{EncoderCounterBank, LinkEvent, MecanumRobot, Wheel};
//! use mecanum_drive::config::Config;
//! use mecanum_drive::hal::{MockActuator, MockSink, MockTransport};
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
//! robot.handle(LinkEvent::text("rotate_right"), 10);
//! assert!(robot.router().engine().is_running());
//!
//! robot.tick(0);
//! ENCODERS.on_edge(Wheel::RearLeft, true);
//! let snapshot = robot.tick(5_000).unwrap();
//! assert_eq!(snapshot[Wheel::RearLeft], 1);
//! ```

use core::fmt::Debug;

use crate::config::Config;
use crate::drive::DriveEngine;
use crate::encoder::{EncoderCounterBank, EncoderSnapshot};
use crate::link::LinkSession;
use crate::router::{CommandRouter, Dispatch};
use crate::telemetry::EncoderTelemetry;
use crate::traits::{Actuator, LinkEvent, LinkTransport, StatusSink};
use crate::version::FIRMWARE_VERSION;
use crate::wheels::Wheel;

/// The robot's control core.
///
/// # Type Parameters
///
/// - `A`: The actuation boundary ([`Actuator`] trait)
/// - `S`: The status sink ([`StatusSink`] trait)
/// - `T`: The link transport ([`LinkTransport`] trait)
pub struct MecanumRobot<'b, A: Actuator, S: StatusSink, T: LinkTransport> {
    router: CommandRouter<'b, A, S>,
    link: LinkSession<T>,
    telemetry: EncoderTelemetry,
}

impl<'b, A, S, T> MecanumRobot<'b, A, S, T>
where
    A: Actuator,
    A::Error: Debug,
    S: StatusSink,
    T: LinkTransport,
    T::Error: Debug,
{
    /// Assembles the control core from its boundaries.
    pub fn new(
        config: &Config,
        actuator: A,
        encoders: &'b EncoderCounterBank,
        sink: S,
        transport: T,
    ) -> Self {
        let mut engine = DriveEngine::with_max_duty(actuator, config.drive.max_duty);
        engine.set_speed_percent(i32::from(config.drive.default_speed_percent));

        tracing::info!(
            version = %FIRMWARE_VERSION,
            device = config.link.device_name.as_str(),
            "mecanum control core ready"
        );

        Self {
            router: CommandRouter::new(engine, encoders, sink),
            link: LinkSession::new(transport, config.link.clone()),
            telemetry: EncoderTelemetry::new(config.telemetry.encoder_interval_ms),
        }
    }

    /// Applies one transport event.
    ///
    /// Returns the router's result for forwarded messages.
    pub fn handle(&mut self, event: LinkEvent, now_ms: u64) -> Option<Dispatch> {
        match event {
            LinkEvent::PeerConnected => {
                self.link.on_peer_connected(&mut self.router);
                None
            }
            LinkEvent::PeerDisconnected => {
                self.link.on_peer_disconnected(&mut self.router, now_ms);
                None
            }
            LinkEvent::BytesReceived(bytes) => self.link.on_bytes_received(&bytes, &mut self.router),
        }
    }

    /// Runs deadline work: pending re-advertise and encoder telemetry.
    ///
    /// Returns the encoder snapshot if one was due.
    pub fn tick(&mut self, now_ms: u64) -> Option<EncoderSnapshot> {
        self.link.poll(now_ms);

        let counts = self.telemetry.poll(now_ms, self.router.encoders())?;
        tracing::info!(
            "Encoders - FL:{} FR:{} RL:{} RR:{}",
            counts[Wheel::FrontLeft],
            counts[Wheel::FrontRight],
            counts[Wheel::RearLeft],
            counts[Wheel::RearRight],
        );
        self.router.sink_mut().encoder_snapshot(&counts);
        Some(counts)
    }

    /// The command router.
    pub fn router(&self) -> &CommandRouter<'b, A, S> {
        &self.router
    }

    /// Exclusive access to the command router.
    pub fn router_mut(&mut self) -> &mut CommandRouter<'b, A, S> {
        &mut self.router
    }

    /// The link session.
    pub fn link(&self) -> &LinkSession<T> {
        &self.link
    }

    /// Exclusive access to the link session.
    pub fn link_mut(&mut self) -> &mut LinkSession<T> {
        &mut self.link
    }
}

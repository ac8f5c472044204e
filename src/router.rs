//! Command dispatch.
//!
//! [`CommandRouter`] owns the drive engine and the status sink, borrows the
//! encoder bank, and turns each received message into at most one effect.
//!
//! # Example
//!
//! ```rust
//! use mecanum_drive::{CommandRouter, Dispatch, DriveEngine, EncoderCounterBank, Maneuver};
//! use mecanum_drive::hal::{MockActuator, MockSink};
//!
//! let encoders = EncoderCounterBank::new();
//! let engine = DriveEngine::new(MockActuator::new());
//! let mut router = CommandRouter::new(engine, &encoders, MockSink::new());
//!
//! router.dispatch("forward");
//! let outcome = router.dispatch("  SPEED:75  ");
//!
//! assert_eq!(
//!     outcome,
//!     Dispatch::SpeedSet { percent: 75, reapplied: Some(Maneuver::Forward) }
//! );
//! assert_eq!(router.engine().frame().as_array(), &[3071, 3071, 3071, 3071]);
//! ```

use core::fmt::Debug;

use crate::command::{parse, Command, SystemCommand, UnknownReason};
use crate::drive::{DriveEngine, FrameOutcome};
use crate::encoder::EncoderCounterBank;
use crate::maneuver::Maneuver;
use crate::traits::{Actuator, StatusSink};

/// Operating mode. Recorded and reported; never gates other commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OperatingMode {
    /// Commands drive the wheels directly.
    #[default]
    Manual,
    /// Reserved for autonomous behavior.
    Auto,
}

/// What one dispatched message did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    /// `auto` or `manual` was accepted.
    ModeChanged(OperatingMode),
    /// `encoder` toggled the display view; true when the encoder view is on.
    EncoderViewToggled(bool),
    /// `reset` zeroed all encoder counters.
    EncodersReset,
    /// A speed was accepted.
    SpeedSet {
        /// Clamped speed now in effect.
        percent: u8,
        /// The maneuver re-applied at the new speed, if the robot was moving.
        reapplied: Option<Maneuver>,
    },
    /// A maneuver was requested.
    Maneuver {
        /// Requested maneuver.
        maneuver: Maneuver,
        /// Whether the frame reached the wheels.
        outcome: FrameOutcome,
    },
    /// The message was discarded.
    Ignored(UnknownReason),
    /// The actuator rejected a frame; the drive state is unchanged.
    ActuationFailed,
}

impl Dispatch {
    /// True for everything except [`Dispatch::Ignored`].
    pub fn accepted(&self) -> bool {
        !matches!(self, Dispatch::Ignored(_))
    }
}

/// Routes text commands to the drive engine, encoder bank, and status sink.
///
/// # Type Parameters
///
/// - `A`: The actuation boundary ([`Actuator`] trait)
/// - `S`: The status sink ([`StatusSink`] trait)
pub struct CommandRouter<'b, A: Actuator, S: StatusSink> {
    engine: DriveEngine<A>,
    encoders: &'b EncoderCounterBank,
    sink: S,
    mode: OperatingMode,
}

impl<'b, A, S> CommandRouter<'b, A, S>
where
    A: Actuator,
    A::Error: Debug,
    S: StatusSink,
{
    /// Creates a router in [`OperatingMode::Manual`].
    pub fn new(engine: DriveEngine<A>, encoders: &'b EncoderCounterBank, sink: S) -> Self {
        Self {
            engine,
            encoders,
            sink,
            mode: OperatingMode::Manual,
        }
    }

    /// Parses and executes one message.
    ///
    /// The raw message always reaches the status sink first. Accepted
    /// commands finish with a motor status refresh.
    pub fn dispatch(&mut self, message: &str) -> Dispatch {
        self.sink.message_received(message);

        let outcome = match parse(message) {
            Command::System(cmd) => self.run_system(cmd),
            Command::Speed(percent) => self.run_speed(percent),
            Command::Maneuver(maneuver) => self.run_maneuver(maneuver),
            Command::Unknown(reason) => {
                tracing::debug!(%reason, raw = message, "command discarded");
                return Dispatch::Ignored(reason);
            }
        };

        self.refresh_status();
        outcome
    }

    /// Pushes the current drive state to the sink, plus an encoder snapshot
    /// while the encoder view is active.
    pub fn refresh_status(&mut self) {
        let state = self.engine.state();
        self.sink
            .motor_status_changed(state.maneuver, state.speed_percent, state.running);
        if self.sink.encoder_view_active() {
            let counts = self.encoders.snapshot_all();
            self.sink.encoder_snapshot(&counts);
        }
    }

    /// Stops the wheels outside of a command, e.g. on link loss.
    pub fn stop(&mut self) -> Dispatch {
        let outcome = self.run_maneuver(Maneuver::Stop);
        self.refresh_status();
        outcome
    }

    fn run_system(&mut self, cmd: SystemCommand) -> Dispatch {
        match cmd {
            SystemCommand::Auto => self.set_mode(OperatingMode::Auto),
            SystemCommand::Manual => self.set_mode(OperatingMode::Manual),
            SystemCommand::Encoder => {
                let active = self.sink.toggle_encoder_view();
                tracing::info!(active, "encoder view toggled");
                Dispatch::EncoderViewToggled(active)
            }
            SystemCommand::Reset => {
                self.encoders.reset_all();
                tracing::info!("encoder counters reset");
                Dispatch::EncodersReset
            }
        }
    }

    fn set_mode(&mut self, mode: OperatingMode) -> Dispatch {
        self.mode = mode;
        tracing::info!(?mode, "operating mode changed");
        Dispatch::ModeChanged(mode)
    }

    fn run_speed(&mut self, percent: u8) -> Dispatch {
        self.engine.set_speed_percent(i32::from(percent));
        let percent = self.engine.speed_percent();

        if !self.engine.is_running() {
            return Dispatch::SpeedSet {
                percent,
                reapplied: None,
            };
        }

        let current = self.engine.current_maneuver();
        match self.engine.apply_maneuver(current) {
            Ok(FrameOutcome::Committed) => Dispatch::SpeedSet {
                percent,
                reapplied: Some(current),
            },
            Ok(FrameOutcome::BoundaryUnavailable) => Dispatch::SpeedSet {
                percent,
                reapplied: None,
            },
            Err(err) => {
                tracing::warn!(?err, maneuver = ?current, "speed re-apply failed");
                Dispatch::ActuationFailed
            }
        }
    }

    fn run_maneuver(&mut self, maneuver: Maneuver) -> Dispatch {
        match self.engine.apply_maneuver(maneuver) {
            Ok(outcome) => {
                if outcome == FrameOutcome::Committed {
                    tracing::info!(?maneuver, speed = self.engine.speed_percent(), "maneuver");
                }
                Dispatch::Maneuver { maneuver, outcome }
            }
            Err(err) => {
                tracing::warn!(?err, ?maneuver, "actuation failed");
                Dispatch::ActuationFailed
            }
        }
    }

    /// Current operating mode.
    pub fn mode(&self) -> OperatingMode {
        self.mode
    }

    /// The drive engine.
    pub fn engine(&self) -> &DriveEngine<A> {
        &self.engine
    }

    /// Exclusive access to the drive engine.
    pub fn engine_mut(&mut self) -> &mut DriveEngine<A> {
        &mut self.engine
    }

    /// The encoder bank this router resets.
    pub fn encoders(&self) -> &'b EncoderCounterBank {
        self.encoders
    }

    /// The status sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Exclusive access to the status sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{MockActuator, MockSink, SinkEvent};
    use crate::wheels::{Wheel, WheelSet};

    fn router(bank: &EncoderCounterBank) -> CommandRouter<'_, MockActuator, MockSink> {
        CommandRouter::new(DriveEngine::new(MockActuator::new()), bank, MockSink::new())
    }

    #[test]
    fn mode_is_recorded_but_never_gates() {
        let bank = EncoderCounterBank::new();
        let mut r = router(&bank);

        assert_eq!(r.dispatch("auto"), Dispatch::ModeChanged(OperatingMode::Auto));
        assert_eq!(r.mode(), OperatingMode::Auto);

        r.dispatch("forward");
        assert!(r.engine().is_running());

        r.dispatch("MANUAL");
        assert_eq!(r.mode(), OperatingMode::Manual);
    }

    #[test]
    fn reset_zeroes_counters() {
        let bank = EncoderCounterBank::new();
        bank.on_edge(Wheel::FrontLeft, true);
        bank.on_edge(Wheel::RearRight, false);

        let mut r = router(&bank);
        assert_eq!(r.dispatch("reset"), Dispatch::EncodersReset);
        assert_eq!(bank.snapshot_all(), WheelSet::splat(0));
    }

    #[test]
    fn speed_while_stopped_does_not_move() {
        let bank = EncoderCounterBank::new();
        let mut r = router(&bank);

        let outcome = r.dispatch("speed:30");
        assert_eq!(
            outcome,
            Dispatch::SpeedSet {
                percent: 30,
                reapplied: None
            }
        );
        assert!(r.engine().actuator().frames.is_empty());
    }

    #[test]
    fn every_message_reaches_sink() {
        let bank = EncoderCounterBank::new();
        let mut r = router(&bank);

        r.dispatch("hello");
        r.dispatch("stop");

        assert_eq!(r.sink().messages(), vec!["hello", "stop"]);
        // Only the accepted command refreshed motor status.
        assert_eq!(r.sink().motor_updates(), vec![(Maneuver::Stop, 50, false)]);
    }

    #[test]
    fn encoder_view_adds_snapshot_to_refresh() {
        let bank = EncoderCounterBank::new();
        let mut r = router(&bank);

        assert_eq!(r.dispatch("encoder"), Dispatch::EncoderViewToggled(true));
        bank.on_edge(Wheel::FrontRight, true);
        r.sink_mut().clear();

        r.dispatch("forward");
        let events = &r.sink().events;
        assert!(matches!(events.last(), Some(SinkEvent::Encoders(c)) if c[Wheel::FrontRight] == 1));

        r.dispatch("encoder");
        r.sink_mut().clear();
        r.dispatch("stop");
        assert_eq!(r.sink().snapshot_count(), 0);
    }

    #[test]
    fn actuation_failure_is_reported() {
        let bank = EncoderCounterBank::new();
        let mut r = router(&bank);
        r.engine_mut().actuator_mut().fail_writes = true;

        assert_eq!(r.dispatch("forward"), Dispatch::ActuationFailed);
        assert_eq!(r.engine().current_maneuver(), Maneuver::Stop);
    }

    #[test]
    fn unavailable_boundary_is_not_failure() {
        let bank = EncoderCounterBank::new();
        let engine = DriveEngine::new(MockActuator::uninitialized());
        let mut r = CommandRouter::new(engine, &bank, MockSink::new());

        assert_eq!(
            r.dispatch("left"),
            Dispatch::Maneuver {
                maneuver: Maneuver::StrafeLeft,
                outcome: FrameOutcome::BoundaryUnavailable
            }
        );
    }

    #[test]
    fn ignored_is_not_accepted() {
        assert!(!Dispatch::Ignored(UnknownReason::Empty).accepted());
        assert!(Dispatch::EncodersReset.accepted());
    }
}

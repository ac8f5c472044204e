//! Desktop simulator for the mecanum control core.
//!
//! Runs the same [`MecanumRobot`] loop as the firmware with mock wheels and
//! a console link. A background thread feeds the encoder counters with
//! edges that follow the committed wheel directions, so `encoder` and the
//! periodic snapshot show realistic numbers.
//!
//! ```bash
//! RUST_LOG=debug cargo run --bin desktop_sim
//! ```
//!
//! Type `/connect`, then commands (`speed:80`, `rotate_left`, `encoder`,
//! `stop`, ...). `/disconnect` drops the peer; end of input exits.

use std::sync::atomic::{AtomicI8, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use mecanum_drive::hal::console::spawn_stdin_reader;
use mecanum_drive::hal::{ConsoleTransport, StdClock};
use mecanum_drive::traits::{Actuator, Clock};
use mecanum_drive::{Config, EncoderCounterBank, MecanumRobot, StatusScreen, Wheel, WheelFrame};
use tracing_subscriber::EnvFilter;

static ENCODERS: EncoderCounterBank = EncoderCounterBank::new();

/// Edges per simulated wheel per second at full duty.
const EDGES_PER_SECOND: u32 = 400;

/// Wheel directions shared with the encoder thread: -1, 0, or 1.
type Directions = Arc<[AtomicI8; 4]>;

/// Actuator that publishes wheel directions instead of driving hardware.
struct SimWheels {
    directions: Directions,
}

impl Actuator for SimWheels {
    type Error = core::convert::Infallible;

    fn is_ready(&self) -> bool {
        true
    }

    fn write_frame(&mut self, frame: &WheelFrame) -> Result<(), Self::Error> {
        for (wheel, duty) in frame.iter() {
            self.directions[wheel.index()].store(duty.signum() as i8, Ordering::Relaxed);
        }
        tracing::debug!(
            fl = frame[Wheel::FrontLeft],
            fr = frame[Wheel::FrontRight],
            rl = frame[Wheel::RearLeft],
            rr = frame[Wheel::RearRight],
            "wheels"
        );
        Ok(())
    }
}

fn spawn_encoder_feed(directions: Directions) -> std::io::Result<()> {
    let period = Duration::from_micros(1_000_000 / u64::from(EDGES_PER_SECOND));
    thread::Builder::new()
        .name("encoder-feed".into())
        .spawn(move || loop {
            for wheel in Wheel::ALL {
                match directions[wheel.index()].load(Ordering::Relaxed) {
                    0 => {}
                    d => ENCODERS.on_edge(wheel, d > 0),
                }
            }
            thread::sleep(period);
        })?;
    Ok(())
}

fn print_screen(screen: &StatusScreen) {
    println!("+----------------+");
    for row in screen.rows() {
        println!("|{row:<16}|");
    }
    println!("+----------------+");
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::default();

    let directions: Directions = Arc::new(Default::default());
    spawn_encoder_feed(directions.clone())?;
    println!("[OK] Encoder feed running ({EDGES_PER_SECOND} edges/s)");

    let (tx, events) = mpsc::channel();
    spawn_stdin_reader(tx)?;

    let mut screen = StatusScreen::new();
    screen.startup();

    let clock = StdClock::new();
    let mut robot = MecanumRobot::new(
        &config,
        SimWheels { directions },
        &ENCODERS,
        screen,
        ConsoleTransport::stdout(&config.link.device_name),
    );
    robot.link_mut().start()?;

    let tick = Duration::from_millis(u64::from(config.telemetry.loop_interval_ms));

    loop {
        match events.recv_timeout(tick) {
            Ok(event) => {
                robot.handle(event, clock.now_ms());
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        robot.tick(clock.now_ms());

        let screen = robot.router_mut().sink_mut();
        if screen.take_dirty() {
            print_screen(screen);
        }
    }

    robot.router_mut().stop();
    println!("[OK] Input closed, wheels stopped");
    Ok(())
}

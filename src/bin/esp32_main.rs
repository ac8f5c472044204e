//! ESP32-C3 mecanum base controller.
//!
//! This is the main entry point for the physical robot. It brings up the
//! PWM expander, the wheel encoders, the connection LED, and (optionally)
//! the OLED, then runs a cooperative loop that:
//! - Drains link events and applies them to the control core
//! - Runs link and encoder-telemetry deadlines
//! - Redraws the OLED when the status text changed (if enabled)
//!
//! The link is the serial console: type `/connect`, then commands such as
//! `speed:60`, `forward`, `stop`.
//!
//! # Build
//!
//! ```bash
//! # Basic (motors + encoders)
//! cargo build --release --features esp32 --bin esp32_main
//!
//! # With display
//! cargo build --release --features display --bin esp32_main
//! ```

use std::cell::RefCell;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::PinDriver;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::prelude::*;
use mecanum_drive::encoder::EncoderCounterBank;
use mecanum_drive::hal::console::spawn_stdin_reader;
use mecanum_drive::hal::esp32::{bind_encoders, pins};
use mecanum_drive::hal::{ConnectionLed, ConsoleTransport, Pca9685, SharedI2c, StdClock};
use mecanum_drive::traits::Clock;
use mecanum_drive::{Config, MecanumRobot, StatusScreen, FIRMWARE_VERSION};
use tracing_subscriber::EnvFilter;

/// Counters written from the encoder interrupts.
static ENCODERS: EncoderCounterBank = EncoderCounterBank::new();

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!();
    println!("================================");
    println!("  mecanum-drive {FIRMWARE_VERSION}");
    println!("================================");
    println!();

    let config = Config::default();
    let peripherals = Peripherals::take()?;

    // =========================================================================
    // Shared I2C bus (GPIO4 SDA / GPIO5 SCL)
    // =========================================================================
    let bus = RefCell::new(I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio4,
        peripherals.pins.gpio5,
        &I2cConfig::new().baudrate(400.kHz().into()),
    )?);
    println!("[OK] I2C bus initialized (GPIO4/5)");

    // =========================================================================
    // Initialize Motors (PCA9685)
    // =========================================================================
    let mut expander = Pca9685::new(SharedI2c::new(&bus), config.drive.i2c_address);
    expander
        .init(config.drive.pwm_freq_hz, &mut FreeRtos)
        .map_err(|e| anyhow::anyhow!("PCA9685 init failed: {e}"))?;
    println!(
        "[OK] PCA9685 initialized (0x{:02X}, {} Hz)",
        config.drive.i2c_address, config.drive.pwm_freq_hz
    );

    // =========================================================================
    // Initialize Encoders
    // =========================================================================
    bind_encoders(&ENCODERS)?;
    println!("[OK] Encoders bound (GPIO0-3, GPIO6-9)");

    // =========================================================================
    // Initialize Display (SSD1306) - Optional
    // =========================================================================
    #[cfg(feature = "display")]
    let mut display = {
        use mecanum_drive::hal::esp32::Esp32Display;

        let mut oled = Esp32Display::new(SharedI2c::new(&bus), pins::OLED_I2C_ADDR);
        match oled.init() {
            Ok(()) => {
                println!("[OK] Display initialized (0x{:02X})", pins::OLED_I2C_ADDR);
                Some(oled)
            }
            Err(e) => {
                println!("[WARN] Display init failed: {e:?}");
                None
            }
        }
    };

    let mut screen = StatusScreen::new();
    screen.startup();

    // =========================================================================
    // Connection LED (GPIO10)
    // =========================================================================
    let mut status = ConnectionLed::new(screen, PinDriver::output(peripherals.pins.gpio10)?);
    status.startup_blink(&mut FreeRtos);
    println!("[OK] Status LED ready (GPIO{})", pins::LED);

    // =========================================================================
    // Initialize Link (serial console)
    // =========================================================================
    let (tx, events) = mpsc::channel();
    spawn_stdin_reader(tx)?;
    let transport = ConsoleTransport::stdout(&config.link.device_name);
    println!("[OK] Console link ready as {}", config.link.device_name);

    // =========================================================================
    // Initialize Clock and Control Core
    // =========================================================================
    let clock = StdClock::new();
    let mut robot = MecanumRobot::new(&config, expander, &ENCODERS, status, transport);
    robot.link_mut().start()?;

    let tick = Duration::from_millis(u64::from(config.telemetry.loop_interval_ms));

    println!();
    println!("Commands:");
    println!("  /connect, /disconnect     Attach or drop the peer");
    println!("  speed:<0-100>             Set speed percent");
    println!("  forward, backward, left, right, rotate_left, rotate_right,");
    println!("  diagonal_fl, diagonal_fr, stop");
    println!("  auto, manual, encoder, reset");
    println!();

    // =========================================================================
    // Main Loop
    // =========================================================================
    loop {
        let now = clock.now_ms();

        // ---------------------------------------------------------------------
        // Apply link events
        // ---------------------------------------------------------------------
        while let Ok(event) = events.try_recv() {
            robot.handle(event, now);
        }

        // ---------------------------------------------------------------------
        // Deadlines (re-advertise, encoder telemetry)
        // ---------------------------------------------------------------------
        robot.tick(now);

        // ---------------------------------------------------------------------
        // Update display
        // ---------------------------------------------------------------------
        #[cfg(feature = "display")]
        if let Some(oled) = display.as_mut() {
            let screen = robot.router_mut().sink_mut().inner_mut();
            if screen.take_dirty() {
                if let Err(e) = oled.render(screen) {
                    tracing::warn!(?e, "display render failed");
                }
            }
        }

        thread::sleep(tick);
    }
}

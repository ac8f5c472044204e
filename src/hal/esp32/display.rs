//! SSD1306 OLED rendering of the [`StatusScreen`] text grid.
//!
//! The panel shares its I2C bus with the PWM expander, so the display
//! interface is built over any `embedded-hal` 1.0 bus handle (normally a
//! [`SharedI2c`](crate::hal::SharedI2c)) rather than owning the driver.
//!
//! # Layout
//!
//! ```text
//! ┌────────────────┐
//! │Connected!      │  row 0
//! │                │
//! │Received:       │
//! │forward         │
//! │                │
//! │Dir: FORWARD    │
//! │Speed: 50%      │
//! │Status: RUNNING │  row 7
//! └────────────────┘
//! ```

use display_interface::{DataFormat, DisplayError, WriteOnlyDataCommand};
use embedded_graphics::{
    mono_font::{ascii::FONT_5X8, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use embedded_hal::i2c::I2c;
use ssd1306::{mode::BufferedGraphicsMode, prelude::*, Ssd1306};

use crate::status::StatusScreen;

/// Control byte announcing a command stream.
const CONTROL_COMMAND: u8 = 0x00;
/// Control byte announcing display RAM data.
const CONTROL_DATA: u8 = 0x40;
/// Payload bytes per I2C write.
const CHUNK: usize = 16;

/// Pixel height of one text row.
const ROW_HEIGHT: i32 = 8;

/// SSD1306 I2C protocol over an `embedded-hal` 1.0 bus.
pub struct OledInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> OledInterface<I2C> {
    /// Talks to the panel at `address` over `i2c`.
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    fn send(&mut self, control: u8, payload: DataFormat<'_>) -> Result<(), DisplayError> {
        let DataFormat::U8(bytes) = payload else {
            return Err(DisplayError::DataFormatNotImplemented);
        };

        let mut buf = [0u8; CHUNK + 1];
        buf[0] = control;
        for chunk in bytes.chunks(CHUNK) {
            let end = chunk.len() + 1;
            buf[1..end].copy_from_slice(chunk);
            self.i2c
                .write(self.address, &buf[..end])
                .map_err(|_| DisplayError::BusWriteError)?;
        }
        Ok(())
    }
}

impl<I2C: I2c> WriteOnlyDataCommand for OledInterface<I2C> {
    fn send_commands(&mut self, cmds: DataFormat<'_>) -> Result<(), DisplayError> {
        self.send(CONTROL_COMMAND, cmds)
    }

    fn send_data(&mut self, buf: DataFormat<'_>) -> Result<(), DisplayError> {
        self.send(CONTROL_DATA, buf)
    }
}

type Panel<I2C> =
    Ssd1306<OledInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// 128x64 OLED showing eight rows of status text.
///
/// # Example
///
/// ```ignore
/// let bus = RefCell::new(i2c_driver);
/// let mut oled = Esp32Display::new(SharedI2c::new(&bus), pins::OLED_I2C_ADDR);
/// oled.init()?;
///
/// let mut screen = StatusScreen::new();
/// screen.startup();
/// oled.render(&screen)?;
/// ```
pub struct Esp32Display<I2C> {
    panel: Panel<I2C>,
}

impl<I2C: I2c> Esp32Display<I2C> {
    /// Wraps the panel. The board mounts it upside down.
    pub fn new(i2c: I2C, address: u8) -> Self {
        let panel = Ssd1306::new(
            OledInterface::new(i2c, address),
            DisplaySize128x64,
            DisplayRotation::Rotate180,
        )
        .into_buffered_graphics_mode();
        Self { panel }
    }

    /// Powers the panel up and blanks it.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.panel.init()?;
        self.panel.clear(BinaryColor::Off)?;
        self.panel.flush()
    }

    /// Draws every row of `screen` and pushes the frame.
    pub fn render(&mut self, screen: &StatusScreen) -> Result<(), DisplayError> {
        self.panel.clear(BinaryColor::Off)?;
        let style = MonoTextStyle::new(&FONT_5X8, BinaryColor::On);

        for (row, text) in screen.rows().enumerate() {
            if text.is_empty() {
                continue;
            }
            let origin = Point::new(0, row as i32 * ROW_HEIGHT);
            Text::with_baseline(text, origin, style, Baseline::Top).draw(&mut self.panel)?;
        }

        self.panel.flush()
    }
}

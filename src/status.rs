//! Text model of the 128x64 status display.
//!
//! [`StatusScreen`] is a [`StatusSink`] that keeps eight rows of at most
//! sixteen characters each, the grid an 8x8 font gives on the robot's OLED:
//!
//! | Row | Content |
//! |-----|---------|
//! | 0 | `Connected!` / `Disconnected` |
//! | 2 | `Received:` |
//! | 3-4 | last message, wrapped at 16 characters |
//! | 5 | `Dir: <maneuver>` |
//! | 6 | `Speed: <n>%` |
//! | 7 | `Status: RUNNING` / `STOPPED`, or front encoder counts / 100 |
//!
//! Rendering to pixels is left to the display adapter, which redraws when
//! [`StatusScreen::take_dirty`] reports a change.
//!
//! ```rust
//! use mecanum_drive::StatusScreen;
//! use mecanum_drive::traits::StatusSink;
//! use mecanum_drive::Maneuver;
//!
//! let mut screen = StatusScreen::new();
//! screen.connection_changed(true);
//! screen.motor_status_changed(Maneuver::RotateLeft, 75, true);
//!
//! assert_eq!(screen.row(0), "Connected!");
//! assert_eq!(screen.row(5), "Dir: ROT_LEFT");
//! assert_eq!(screen.row(6), "Speed: 75%");
//! assert_eq!(screen.row(7), "Status: RUNNING");
//! ```

use core::fmt::{self, Write};

use heapless::String as HString;

use crate::encoder::EncoderSnapshot;
use crate::maneuver::Maneuver;
use crate::traits::StatusSink;
use crate::wheels::{Wheel, WheelSet};

/// Text rows on the display.
pub const ROWS: usize = 8;

/// Characters per row.
pub const COLUMNS: usize = 16;

/// One display row. Sized in bytes for four-byte UTF-8 at full width.
pub type Row = HString<{ COLUMNS * 4 }>;

const MESSAGE_ROWS: usize = 2;
const ELLIPSIS: &str = "...";

/// Writer that keeps the first [`COLUMNS`] characters and drops the rest.
struct Clip<'a> {
    row: &'a mut Row,
    chars: usize,
}

impl Write for Clip<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for c in s.chars() {
            if self.chars == COLUMNS {
                break;
            }
            // Capacity covers COLUMNS chars of any width.
            let _ = self.row.push(c);
            self.chars += 1;
        }
        Ok(())
    }
}

/// Eight-row text model of the status display.
#[derive(Clone, Debug)]
pub struct StatusScreen {
    rows: [Row; ROWS],
    encoder_view: bool,
    running: bool,
    counts: EncoderSnapshot,
    dirty: bool,
}

impl StatusScreen {
    /// Creates a blank screen in the motor view.
    pub fn new() -> Self {
        Self {
            rows: Default::default(),
            encoder_view: false,
            running: false,
            counts: WheelSet::splat(0),
            dirty: true,
        }
    }

    /// Replaces the screen with the boot banner.
    pub fn startup(&mut self) {
        self.clear();
        self.set_row(0, format_args!("ESP32C3 4Motor"));
        self.set_row(1, format_args!("Mecanum Robot"));
        self.set_row(2, format_args!("BLE Ready!"));
    }

    /// Blanks every row.
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.clear();
        }
        self.dirty = true;
    }

    /// Text of one row; empty for out-of-range indices.
    pub fn row(&self, index: usize) -> &str {
        self.rows.get(index).map_or("", |r| r.as_str())
    }

    /// All rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.as_str())
    }

    /// Returns true once after any change, then false until the next one.
    pub fn take_dirty(&mut self) -> bool {
        core::mem::replace(&mut self.dirty, false)
    }

    fn set_row(&mut self, index: usize, args: fmt::Arguments<'_>) {
        let row = &mut self.rows[index];
        row.clear();
        let _ = Clip { row, chars: 0 }.write_fmt(args);
        self.dirty = true;
    }

    fn render_bottom_row(&mut self) {
        if self.encoder_view {
            let fl = self.counts[Wheel::FrontLeft] / 100;
            let fr = self.counts[Wheel::FrontRight] / 100;
            self.set_row(7, format_args!("FL:{fl} FR:{fr}"));
        } else {
            let status = if self.running { "RUNNING" } else { "STOPPED" };
            self.set_row(7, format_args!("Status: {status}"));
        }
    }
}

impl Default for StatusScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusSink for StatusScreen {
    fn connection_changed(&mut self, connected: bool) {
        let text = if connected { "Connected!" } else { "Disconnected" };
        self.set_row(0, format_args!("{text}"));
    }

    fn message_received(&mut self, message: &str) {
        self.set_row(2, format_args!("Received:"));

        let total = message.chars().count();
        let mut chunks = [""; MESSAGE_ROWS];
        let mut rest = message;
        for chunk in &mut chunks {
            let split = rest
                .char_indices()
                .nth(COLUMNS)
                .map_or(rest.len(), |(i, _)| i);
            *chunk = &rest[..split];
            rest = &rest[split..];
        }

        self.set_row(3, format_args!("{}", chunks[0]));
        if total > COLUMNS * MESSAGE_ROWS {
            // Keep the ellipsis on screen by giving up the last columns.
            let keep = chunks[1]
                .char_indices()
                .nth(COLUMNS - ELLIPSIS.len())
                .map_or(chunks[1].len(), |(i, _)| i);
            self.set_row(4, format_args!("{}{ELLIPSIS}", &chunks[1][..keep]));
        } else {
            self.set_row(4, format_args!("{}", chunks[1]));
        }
    }

    fn motor_status_changed(&mut self, maneuver: Maneuver, speed_percent: u8, running: bool) {
        self.running = running;
        self.set_row(5, format_args!("Dir: {}", maneuver.display_name()));
        self.set_row(6, format_args!("Speed: {speed_percent}%"));
        self.render_bottom_row();
    }

    fn encoder_snapshot(&mut self, counts: &EncoderSnapshot) {
        self.counts = *counts;
        if self.encoder_view {
            self.render_bottom_row();
        }
    }

    fn toggle_encoder_view(&mut self) -> bool {
        self.encoder_view = !self.encoder_view;
        self.render_bottom_row();
        self.encoder_view
    }

    fn encoder_view_active(&self) -> bool {
        self.encoder_view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_banner() {
        let mut s = StatusScreen::new();
        s.connection_changed(true);
        s.startup();
        let rows: Vec<&str> = s.rows().collect();
        assert_eq!(
            rows,
            vec!["ESP32C3 4Motor", "Mecanum Robot", "BLE Ready!", "", "", "", "", ""]
        );
    }

    #[test]
    fn short_message_fits_one_row() {
        let mut s = StatusScreen::new();
        s.message_received("forward");
        assert_eq!(s.row(2), "Received:");
        assert_eq!(s.row(3), "forward");
        assert_eq!(s.row(4), "");
    }

    #[test]
    fn message_wraps_at_sixteen() {
        let mut s = StatusScreen::new();
        s.message_received("abcdefghijklmnopqrstuvwxyz");
        assert_eq!(s.row(3), "abcdefghijklmnop");
        assert_eq!(s.row(4), "qrstuvwxyz");
    }

    #[test]
    fn long_message_is_elided() {
        let mut s = StatusScreen::new();
        s.message_received("0123456789abcdefGHIJKLMNOPQRSTUVwxyz");
        assert_eq!(s.row(3), "0123456789abcdef");
        assert_eq!(s.row(4), "GHIJKLMNOPQRS...");
    }

    #[test]
    fn exactly_thirty_two_is_not_elided() {
        let mut s = StatusScreen::new();
        s.message_received("0123456789abcdefGHIJKLMNOPQRSTUV");
        assert_eq!(s.row(4), "GHIJKLMNOPQRSTUV");
    }

    #[test]
    fn wraps_by_character_not_byte() {
        let mut s = StatusScreen::new();
        let msg = "é".repeat(20);
        s.message_received(&msg);
        assert_eq!(s.row(3).chars().count(), 16);
        assert_eq!(s.row(4).chars().count(), 4);
    }

    #[test]
    fn encoder_view_shows_front_counts() {
        let mut s = StatusScreen::new();
        s.motor_status_changed(Maneuver::Forward, 50, true);
        assert_eq!(s.row(7), "Status: RUNNING");

        assert!(s.toggle_encoder_view());
        s.encoder_snapshot(&WheelSet::new(1234, -567, 9, 9));
        assert_eq!(s.row(7), "FL:12 FR:-5");

        assert!(!s.toggle_encoder_view());
        assert_eq!(s.row(7), "Status: RUNNING");
    }

    #[test]
    fn snapshot_ignored_in_motor_view() {
        let mut s = StatusScreen::new();
        s.motor_status_changed(Maneuver::Stop, 50, false);
        s.encoder_snapshot(&WheelSet::splat(500));
        assert_eq!(s.row(7), "Status: STOPPED");
    }

    #[test]
    fn wide_counts_are_clipped() {
        let mut s = StatusScreen::new();
        s.toggle_encoder_view();
        s.encoder_snapshot(&WheelSet::new(i32::MIN, i32::MIN, 0, 0));
        assert_eq!(s.row(7).chars().count(), COLUMNS);
    }

    #[test]
    fn dirty_flag_clears_on_take() {
        let mut s = StatusScreen::new();
        assert!(s.take_dirty());
        assert!(!s.take_dirty());
        s.connection_changed(false);
        assert!(s.take_dirty());
        assert_eq!(s.row(0), "Disconnected");
    }
}

//! Text command protocol.
//!
//! One received message is one command. [`parse`] turns it into exactly one
//! [`Command`] in a single pass. Matching is ASCII case-insensitive and
//! ignores surrounding whitespace; the first rule that matches wins:
//!
//! 1. `auto`, `manual`, `encoder`, `reset`
//! 2. `speed:<digits>`
//! 3. a maneuver keyword (`forward`, `backward`, `left`, `right`,
//!    `rotate_left`, `rotate_right`, `diagonal_fl`, `diagonal_fr`, `stop`,
//!    plus the short display names `rot_left`, `rot_right`, `diag_fl`,
//!    `diag_fr`)
//! 4. anything else is [`Command::Unknown`]
//!
//! ```
//! use mecanum_drive::command::{parse, Command, SystemCommand, UnknownReason};
//! use mecanum_drive::Maneuver;
//!
//! assert_eq!(parse("  SPEED:75  "), Command::Speed(75));
//! assert_eq!(parse("Forward"), Command::Maneuver(Maneuver::Forward));
//! assert_eq!(parse("encoder"), Command::System(SystemCommand::Encoder));
//! assert_eq!(parse("speed:fast"), Command::Unknown(UnknownReason::MalformedSpeed));
//! ```

use core::fmt;

use crate::maneuver::Maneuver;

/// Prefix of the speed command, matched case-insensitively.
pub const SPEED_PREFIX: &str = "speed:";

/// Mode and bookkeeping commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SystemCommand {
    /// Switch to autonomous mode (recorded only).
    Auto,
    /// Switch to manual mode (recorded only).
    Manual,
    /// Toggle the encoder view on the status display.
    Encoder,
    /// Zero all four encoder counters.
    Reset,
}

impl SystemCommand {
    /// Every system command.
    pub const ALL: [SystemCommand; 4] = [
        SystemCommand::Auto,
        SystemCommand::Manual,
        SystemCommand::Encoder,
        SystemCommand::Reset,
    ];

    /// Wire keyword.
    pub const fn keyword(self) -> &'static str {
        match self {
            SystemCommand::Auto => "auto",
            SystemCommand::Manual => "manual",
            SystemCommand::Encoder => "encoder",
            SystemCommand::Reset => "reset",
        }
    }

    fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|cmd| word.eq_ignore_ascii_case(cmd.keyword()))
    }
}

/// Why a message was not understood. Used for logging only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnknownReason {
    /// Nothing but whitespace.
    Empty,
    /// `speed:` followed by something other than decimal digits.
    MalformedSpeed,
    /// No rule matched.
    Unrecognized,
}

impl fmt::Display for UnknownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnknownReason::Empty => write!(f, "empty"),
            UnknownReason::MalformedSpeed => write!(f, "malformed speed"),
            UnknownReason::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// Result of parsing one message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// A mode or bookkeeping command.
    System(SystemCommand),
    /// A speed request, already clamped to `[0, 100]`.
    Speed(u8),
    /// A motion request.
    Maneuver(Maneuver),
    /// Not a command; discarded by the router.
    Unknown(UnknownReason),
}

/// Parses one message. Total: every input maps to exactly one [`Command`].
///
/// Keywords match ASCII case-insensitively. Non-ASCII characters are compared
/// exactly and never folded, so `ſpeed:5` or a Kelvin-sign `K` is unrecognized.
pub fn parse(message: &str) -> Command {
    let cmd = message.trim();
    if cmd.is_empty() {
        return Command::Unknown(UnknownReason::Empty);
    }

    if let Some(sys) = SystemCommand::from_keyword(cmd) {
        return Command::System(sys);
    }

    if let Some(rest) = strip_speed_prefix(cmd) {
        return match parse_percent(rest) {
            Some(percent) => Command::Speed(percent),
            None => Command::Unknown(UnknownReason::MalformedSpeed),
        };
    }

    match Maneuver::from_keyword(cmd) {
        Some(m) => Command::Maneuver(m),
        None => Command::Unknown(UnknownReason::Unrecognized),
    }
}

fn strip_speed_prefix(cmd: &str) -> Option<&str> {
    let head = cmd.get(..SPEED_PREFIX.len())?;
    if head.eq_ignore_ascii_case(SPEED_PREFIX) {
        cmd.get(SPEED_PREFIX.len()..)
    } else {
        None
    }
}

/// Decimal digits only, surrounding whitespace allowed. Values past 100
/// (including ones that overflow) clamp to 100.
fn parse_percent(text: &str) -> Option<u8> {
    let digits = text.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let value = digits.bytes().fold(0u32, |acc, b| {
        acc.saturating_mul(10).saturating_add(u32::from(b - b'0'))
    });
    Some(value.min(100) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_commands_take_priority() {
        assert_eq!(parse("AUTO"), Command::System(SystemCommand::Auto));
        assert_eq!(parse(" manual\n"), Command::System(SystemCommand::Manual));
        assert_eq!(parse("Reset"), Command::System(SystemCommand::Reset));
    }

    #[test]
    fn non_ascii_case_mappings_are_not_folded() {
        // U+017F long s uppercases to 'S'; U+212A Kelvin sign lowercases to 'k'.
        let unknown = Command::Unknown(UnknownReason::Unrecognized);
        assert_eq!(parse("\u{17F}peed:5"), unknown);
        assert_eq!(parse("re\u{17F}et"), unknown);
        assert_eq!(parse("bac\u{212A}ward"), unknown);

        assert_eq!(parse("SPEED:5"), Command::Speed(5));
        assert_eq!(parse("RESET"), Command::System(SystemCommand::Reset));
        assert_eq!(parse("bacKward"), Command::Maneuver(Maneuver::Backward));
    }

    #[test]
    fn speed_accepts_digits_only() {
        assert_eq!(parse("speed:0"), Command::Speed(0));
        assert_eq!(parse("speed: 42 "), Command::Speed(42));
        assert_eq!(parse("Speed:100"), Command::Speed(100));

        for bad in ["speed:", "speed:-5", "speed:+5", "speed:5x", "speed:1.5"] {
            assert_eq!(
                parse(bad),
                Command::Unknown(UnknownReason::MalformedSpeed),
                "{bad}"
            );
        }
    }

    #[test]
    fn speed_clamps_high_values() {
        assert_eq!(parse("speed:101"), Command::Speed(100));
        assert_eq!(parse("speed:99999999999999999999"), Command::Speed(100));
    }

    #[test]
    fn maneuver_keywords_and_aliases() {
        for m in Maneuver::ALL {
            assert_eq!(parse(m.keyword()), Command::Maneuver(m));
        }
        assert_eq!(parse("ROT_LEFT"), Command::Maneuver(Maneuver::RotateLeft));
        assert_eq!(parse("diag_fr"), Command::Maneuver(Maneuver::DiagonalFrontRight));
    }

    #[test]
    fn unknown_inputs() {
        assert_eq!(parse(""), Command::Unknown(UnknownReason::Empty));
        assert_eq!(parse("   \t"), Command::Unknown(UnknownReason::Empty));
        assert_eq!(parse("jump"), Command::Unknown(UnknownReason::Unrecognized));
        assert_eq!(parse("forwards"), Command::Unknown(UnknownReason::Unrecognized));
        assert_eq!(parse("spee"), Command::Unknown(UnknownReason::Unrecognized));
    }

    #[test]
    fn multibyte_input_does_not_panic() {
        assert_eq!(parse("spéed:10"), Command::Unknown(UnknownReason::Unrecognized));
        assert_eq!(parse("ü"), Command::Unknown(UnknownReason::Unrecognized));
    }
}

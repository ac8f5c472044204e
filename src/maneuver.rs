//! Named whole-robot motions and their mecanum sign patterns.
//!
//! A [`Maneuver`] is realized as a fixed sign per wheel multiplied by the
//! current speed magnitude:
//!
//! | Maneuver | FL | FR | RL | RR |
//! |---|---|---|---|---|
//! | Stop | 0 | 0 | 0 | 0 |
//! | Forward | + | + | + | + |
//! | Backward | - | - | - | - |
//! | StrafeLeft | - | + | + | - |
//! | StrafeRight | + | - | - | + |
//! | RotateLeft | - | + | - | + |
//! | RotateRight | + | - | + | - |
//! | DiagonalFrontLeft | 0 | + | + | 0 |
//! | DiagonalFrontRight | + | 0 | 0 | + |

use crate::wheels::{WheelFrame, WheelSet};

/// Whole-robot motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Maneuver {
    /// All wheels coast.
    #[default]
    Stop,
    /// Drive straight ahead.
    Forward,
    /// Drive straight back.
    Backward,
    /// Translate left without turning.
    StrafeLeft,
    /// Translate right without turning.
    StrafeRight,
    /// Spin counter-clockwise in place.
    RotateLeft,
    /// Spin clockwise in place.
    RotateRight,
    /// Translate diagonally forward-left (FR and RL only).
    DiagonalFrontLeft,
    /// Translate diagonally forward-right (FL and RR only).
    DiagonalFrontRight,
}

impl Maneuver {
    /// Every maneuver, `Stop` first.
    pub const ALL: [Maneuver; 9] = [
        Maneuver::Stop,
        Maneuver::Forward,
        Maneuver::Backward,
        Maneuver::StrafeLeft,
        Maneuver::StrafeRight,
        Maneuver::RotateLeft,
        Maneuver::RotateRight,
        Maneuver::DiagonalFrontLeft,
        Maneuver::DiagonalFrontRight,
    ];

    /// Per-wheel sign pattern (FL, FR, RL, RR), entries in `{-1, 0, 1}`.
    pub const fn signs(self) -> WheelSet<i8> {
        match self {
            Maneuver::Stop => WheelSet::new(0, 0, 0, 0),
            Maneuver::Forward => WheelSet::new(1, 1, 1, 1),
            Maneuver::Backward => WheelSet::new(-1, -1, -1, -1),
            Maneuver::StrafeLeft => WheelSet::new(-1, 1, 1, -1),
            Maneuver::StrafeRight => WheelSet::new(1, -1, -1, 1),
            Maneuver::RotateLeft => WheelSet::new(-1, 1, -1, 1),
            Maneuver::RotateRight => WheelSet::new(1, -1, 1, -1),
            Maneuver::DiagonalFrontLeft => WheelSet::new(0, 1, 1, 0),
            Maneuver::DiagonalFrontRight => WheelSet::new(1, 0, 0, 1),
        }
    }

    /// Sign pattern scaled by `duty`.
    ///
    /// ```
    /// use mecanum_drive::Maneuver;
    ///
    /// let frame = Maneuver::StrafeLeft.frame(2047);
    /// assert_eq!(frame.as_array(), &[-2047, 2047, 2047, -2047]);
    /// ```
    pub fn frame(self, duty: i16) -> WheelFrame {
        self.signs().map(|sign| i16::from(sign) * duty)
    }

    /// Protocol keyword that selects this maneuver.
    pub const fn keyword(self) -> &'static str {
        match self {
            Maneuver::Stop => "stop",
            Maneuver::Forward => "forward",
            Maneuver::Backward => "backward",
            Maneuver::StrafeLeft => "left",
            Maneuver::StrafeRight => "right",
            Maneuver::RotateLeft => "rotate_left",
            Maneuver::RotateRight => "rotate_right",
            Maneuver::DiagonalFrontLeft => "diagonal_fl",
            Maneuver::DiagonalFrontRight => "diagonal_fr",
        }
    }

    /// Upper-case name shown on the status display.
    pub const fn display_name(self) -> &'static str {
        match self {
            Maneuver::Stop => "STOP",
            Maneuver::Forward => "FORWARD",
            Maneuver::Backward => "BACKWARD",
            Maneuver::StrafeLeft => "LEFT",
            Maneuver::StrafeRight => "RIGHT",
            Maneuver::RotateLeft => "ROT_LEFT",
            Maneuver::RotateRight => "ROT_RIGHT",
            Maneuver::DiagonalFrontLeft => "DIAG_FL",
            Maneuver::DiagonalFrontRight => "DIAG_FR",
        }
    }

    /// Looks up a maneuver by keyword, ignoring ASCII case.
    ///
    /// Accepts the protocol keywords and the short display forms
    /// (`rot_left`, `diag_fr`, ...). Input is expected to be trimmed already.
    ///
    /// ```
    /// use mecanum_drive::Maneuver;
    ///
    /// assert_eq!(Maneuver::from_keyword("Rotate_Left"), Some(Maneuver::RotateLeft));
    /// assert_eq!(Maneuver::from_keyword("diag_fr"), Some(Maneuver::DiagonalFrontRight));
    /// assert_eq!(Maneuver::from_keyword("sideways"), None);
    /// ```
    pub fn from_keyword(word: &str) -> Option<Self> {
        const ALIASES: [(&str, Maneuver); 4] = [
            ("rot_left", Maneuver::RotateLeft),
            ("rot_right", Maneuver::RotateRight),
            ("diag_fl", Maneuver::DiagonalFrontLeft),
            ("diag_fr", Maneuver::DiagonalFrontRight),
        ];

        Self::ALL
            .iter()
            .map(|m| (m.keyword(), *m))
            .chain(ALIASES)
            .find(|(kw, _)| kw.eq_ignore_ascii_case(word))
            .map(|(_, m)| m)
    }

    /// True for every maneuver except [`Maneuver::Stop`].
    #[inline]
    pub const fn is_motion(self) -> bool {
        !matches!(self, Maneuver::Stop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheels::Wheel;

    #[test]
    fn stop_is_all_zero() {
        assert_eq!(Maneuver::Stop.frame(4095), WheelFrame::splat(0));
    }

    #[test]
    fn translations_cancel_rotation() {
        // Pure translations have equal left/right wheel sums.
        for m in [Maneuver::Forward, Maneuver::StrafeLeft, Maneuver::StrafeRight] {
            let s = m.signs();
            assert_eq!(
                s[Wheel::FrontLeft] + s[Wheel::RearLeft],
                s[Wheel::FrontRight] + s[Wheel::RearRight],
                "{m:?}"
            );
        }
    }

    #[test]
    fn rotations_are_opposite() {
        let left = Maneuver::RotateLeft.signs().map(|s| -s);
        assert_eq!(left, Maneuver::RotateRight.signs());
    }

    #[test]
    fn keywords_round_trip() {
        for m in Maneuver::ALL {
            assert_eq!(Maneuver::from_keyword(m.keyword()), Some(m));
        }
    }

    #[test]
    fn display_names_are_accepted_case_insensitively() {
        for m in Maneuver::ALL {
            assert_eq!(Maneuver::from_keyword(m.display_name()), Some(m), "{m:?}");
        }
    }

    #[test]
    fn unknown_keyword() {
        assert_eq!(Maneuver::from_keyword(""), None);
        assert_eq!(Maneuver::from_keyword("forwards"), None);
        assert_eq!(Maneuver::from_keyword(" forward"), None);
    }

    #[test]
    fn only_stop_is_not_motion() {
        assert!(!Maneuver::Stop.is_motion());
        assert!(Maneuver::ALL[1..].iter().all(|m| m.is_motion()));
    }
}

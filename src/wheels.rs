//! Per-wheel addressing for the four-wheel mecanum base.
//!
//! Everything that carries one value per wheel (signed duty frames, sign
//! patterns, encoder counts) is a [`WheelSet<T>`]. Wheels are always
//! visited in [`Wheel::ALL`] order: front-left, front-right, rear-left,
//! rear-right.

use core::ops::{Index, IndexMut};

/// One of the four mecanum wheels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Wheel {
    /// Front-left wheel.
    FrontLeft = 0,
    /// Front-right wheel.
    FrontRight = 1,
    /// Rear-left wheel.
    RearLeft = 2,
    /// Rear-right wheel.
    RearRight = 3,
}

impl Wheel {
    /// All wheels in frame order.
    pub const ALL: [Wheel; 4] = [
        Wheel::FrontLeft,
        Wheel::FrontRight,
        Wheel::RearLeft,
        Wheel::RearRight,
    ];

    /// Slot index of this wheel inside a [`WheelSet`].
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Two-letter label used in logs and on the status display.
    ///
    /// ```
    /// use mecanum_drive::Wheel;
    ///
    /// assert_eq!(Wheel::FrontLeft.label(), "FL");
    /// assert_eq!(Wheel::RearRight.label(), "RR");
    /// ```
    #[inline]
    pub const fn label(self) -> &'static str {
        match self {
            Wheel::FrontLeft => "FL",
            Wheel::FrontRight => "FR",
            Wheel::RearLeft => "RL",
            Wheel::RearRight => "RR",
        }
    }
}

/// One value per wheel.
///
/// # Example
///
/// ```
/// use mecanum_drive::{Wheel, WheelSet};
///
/// let mut set = WheelSet::splat(0i16);
/// set[Wheel::RearLeft] = -100;
///
/// assert_eq!(set.as_array(), &[0, 0, -100, 0]);
/// assert!(set.any(|v| *v != 0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WheelSet<T> {
    values: [T; 4],
}

impl<T> WheelSet<T> {
    /// Builds a set from front-left, front-right, rear-left, rear-right.
    #[inline]
    pub const fn new(front_left: T, front_right: T, rear_left: T, rear_right: T) -> Self {
        Self {
            values: [front_left, front_right, rear_left, rear_right],
        }
    }

    /// Builds a set from an array in frame order.
    #[inline]
    pub const fn from_array(values: [T; 4]) -> Self {
        Self { values }
    }

    /// The values in frame order.
    #[inline]
    pub const fn as_array(&self) -> &[T; 4] {
        &self.values
    }

    /// Consumes the set, returning the values in frame order.
    #[inline]
    pub fn into_array(self) -> [T; 4] {
        self.values
    }

    /// Applies `f` to every slot, keeping wheel positions.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> WheelSet<U> {
        WheelSet {
            values: self.values.map(f),
        }
    }

    /// Iterates `(wheel, value)` pairs in frame order.
    pub fn iter(&self) -> impl Iterator<Item = (Wheel, &T)> {
        Wheel::ALL.into_iter().zip(self.values.iter())
    }

    /// True if `pred` holds for at least one wheel.
    pub fn any(&self, pred: impl FnMut(&T) -> bool) -> bool {
        self.values.iter().any(pred)
    }
}

impl<T: Copy> WheelSet<T> {
    /// Same value on every wheel.
    #[inline]
    pub const fn splat(value: T) -> Self {
        Self { values: [value; 4] }
    }
}

impl<T> Index<Wheel> for WheelSet<T> {
    type Output = T;

    #[inline]
    fn index(&self, wheel: Wheel) -> &T {
        &self.values[wheel.index()]
    }
}

impl<T> IndexMut<Wheel> for WheelSet<T> {
    #[inline]
    fn index_mut(&mut self, wheel: Wheel) -> &mut T {
        &mut self.values[wheel.index()]
    }
}

/// Signed duty per wheel as committed to the actuation boundary.
///
/// Positive drives the wheel forward, negative in reverse, zero coasts.
pub type WheelFrame = WheelSet<i16>;

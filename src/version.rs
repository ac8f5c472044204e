//! Firmware version reporting.

use core::fmt;

/// Semantic version of the robot firmware.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FirmwareVersion {
    /// Incompatible protocol changes.
    pub major: u8,
    /// Backward-compatible additions.
    pub minor: u8,
    /// Fixes.
    pub patch: u8,
}

/// Version of this firmware.
pub const FIRMWARE_VERSION: FirmwareVersion = FirmwareVersion::new(1, 0, 0);

impl FirmwareVersion {
    /// Creates a version.
    pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// True if this version can serve a peer that needs at least
    /// `major.minor.patch`: same major, and not older.
    ///
    /// ```
    /// use mecanum_drive::FIRMWARE_VERSION;
    ///
    /// assert!(FIRMWARE_VERSION.is_compatible(1, 0, 0));
    /// assert!(!FIRMWARE_VERSION.is_compatible(1, 1, 0));
    /// assert!(!FIRMWARE_VERSION.is_compatible(2, 0, 0));
    /// ```
    pub fn is_compatible(&self, major: u8, minor: u8, patch: u8) -> bool {
        self.major == major && (self.minor, self.patch) >= (minor, patch)
    }
}

impl fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}.{}.{}", self.major, self.minor, self.patch)
    }
}

//! PCA9685 16-channel PWM expander driving four H-bridge channels.
//!
//! Each wheel uses three expander outputs: one PWM speed line and two
//! direction lines (IN1/IN2 on an L298N-style bridge).
//!
//! | Wheel | Speed | Dir A | Dir B |
//! |-------|-------|-------|-------|
//! | FL | 0 | 1 | 2 |
//! | FR | 3 | 4 | 5 |
//! | RL | 6 | 7 | 8 |
//! | RR | 9 | 10 | 11 |
//!
//! Direction encoding per wheel: positive duty drives A high and B low,
//! negative drives A low and B high, zero pulls both low (coast).
//!
//! A frame is written as one auto-increment I2C transaction covering
//! channels 0 through 11, so all twelve outputs latch from a single write.

use core::fmt;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::traits::Actuator;
use crate::wheels::{Wheel, WheelFrame};

/// Default 7-bit I2C address (all address pins low).
pub const DEFAULT_ADDRESS: u8 = 0x40;

const MODE1: u8 = 0x00;
const MODE2: u8 = 0x01;
const LED0_ON_L: u8 = 0x06;
const PRE_SCALE: u8 = 0xFE;

const MODE1_RESTART: u8 = 0x80;
const MODE1_AI: u8 = 0x20;
const MODE1_SLEEP: u8 = 0x10;
const MODE1_ALLCALL: u8 = 0x01;
const MODE2_OUTDRV: u8 = 0x04;

/// Bit 4 of `ON_H` / `OFF_H`: output fully on / fully off.
const FULL: u8 = 0x10;

const OSC_HZ: u32 = 25_000_000;
const DUTY_MAX: u16 = 4095;

/// Channels this driver writes (three per wheel).
pub const DRIVEN_CHANNELS: usize = 12;

/// Register address byte plus four bytes per driven channel.
pub const FRAME_PAYLOAD_LEN: usize = 1 + DRIVEN_CHANNELS * 4;

/// Expander outputs wired to one wheel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WheelChannels {
    /// PWM speed (bridge enable) output.
    pub speed: u8,
    /// Direction input A.
    pub dir_a: u8,
    /// Direction input B.
    pub dir_b: u8,
}

/// Channel assignment for `wheel`.
pub const fn channels(wheel: Wheel) -> WheelChannels {
    let base = (wheel.index() * 3) as u8;
    WheelChannels {
        speed: base,
        dir_a: base + 1,
        dir_b: base + 2,
    }
}

/// PCA9685 driver error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pca9685Error<E> {
    /// The I2C bus reported an error.
    I2c(E),
    /// The requested PWM frequency is outside what the prescaler can reach.
    InvalidFrequency(u16),
}

impl<E: fmt::Debug> fmt::Display for Pca9685Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pca9685Error::I2c(e) => write!(f, "I2C error: {e:?}"),
            Pca9685Error::InvalidFrequency(hz) => write!(f, "PWM frequency {hz} Hz out of range"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for Pca9685Error<E> {}

/// Prescaler value for `freq_hz`, or `None` if unreachable.
///
/// ```
/// use mecanum_drive::hal::pca9685::prescale_for;
///
/// assert_eq!(prescale_for(1000), Some(5));
/// assert_eq!(prescale_for(50), Some(121));
/// assert_eq!(prescale_for(5000), None);
/// ```
pub fn prescale_for(freq_hz: u16) -> Option<u8> {
    if freq_hz == 0 {
        return None;
    }
    let div = 4096 * u32::from(freq_hz);
    let rounded = (OSC_HZ + div / 2) / div;
    let prescale = rounded.checked_sub(1)?;
    // Hardware clamps below 3.
    if (3..=255).contains(&prescale) {
        Some(prescale as u8)
    } else {
        None
    }
}

fn full_on() -> [u8; 4] {
    [0, FULL, 0, 0]
}

fn full_off() -> [u8; 4] {
    [0, 0, 0, FULL]
}

fn duty_bytes(duty: u16) -> [u8; 4] {
    match duty.min(DUTY_MAX) {
        0 => full_off(),
        d => [0, 0, (d & 0xFF) as u8, (d >> 8) as u8],
    }
}

/// Encodes `frame` as the single auto-increment write starting at LED0.
pub fn frame_payload(frame: &WheelFrame) -> [u8; FRAME_PAYLOAD_LEN] {
    let mut buf = [0u8; FRAME_PAYLOAD_LEN];
    buf[0] = LED0_ON_L;

    for (wheel, &duty) in frame.iter() {
        let ch = channels(wheel);
        let (a, b) = match duty.signum() {
            1 => (full_on(), full_off()),
            -1 => (full_off(), full_on()),
            _ => (full_off(), full_off()),
        };
        let speed = duty_bytes(duty.unsigned_abs());

        for (channel, bytes) in [(ch.speed, speed), (ch.dir_a, a), (ch.dir_b, b)] {
            let at = 1 + usize::from(channel) * 4;
            buf[at..at + 4].copy_from_slice(&bytes);
        }
    }
    buf
}

/// [`Actuator`] over a PCA9685 on any `embedded-hal` I2C bus.
///
/// Reports not ready until [`init`](Self::init) succeeds.
///
/// # Example
///
/// ```ignore
/// use mecanum_drive::hal::Pca9685;
/// use mecanum_drive::DriveEngine;
///
/// let mut pwm = Pca9685::new(i2c, 0x40);
/// pwm.init(1000, &mut delay)?;
/// let mut engine = DriveEngine::new(pwm);
/// ```
pub struct Pca9685<I2C> {
    i2c: I2C,
    address: u8,
    ready: bool,
}

impl<I2C: I2c> Pca9685<I2C> {
    /// Wraps the bus. No I2C traffic until [`init`](Self::init).
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self {
            i2c,
            address,
            ready: false,
        }
    }

    /// Programs the PWM frequency, enables auto-increment and totem-pole
    /// outputs, then writes an all-stop frame.
    pub fn init(
        &mut self,
        freq_hz: u16,
        delay: &mut impl DelayNs,
    ) -> Result<(), Pca9685Error<I2C::Error>> {
        let prescale = prescale_for(freq_hz).ok_or(Pca9685Error::InvalidFrequency(freq_hz))?;

        // Prescale is only writable while asleep.
        self.write_register(MODE1, MODE1_SLEEP | MODE1_ALLCALL)?;
        self.write_register(PRE_SCALE, prescale)?;
        self.write_register(MODE1, MODE1_AI | MODE1_ALLCALL)?;
        delay.delay_us(500);
        self.write_register(MODE1, MODE1_RESTART | MODE1_AI | MODE1_ALLCALL)?;
        self.write_register(MODE2, MODE2_OUTDRV)?;

        self.write_payload(&WheelFrame::splat(0))?;
        self.ready = true;
        tracing::info!(address = self.address, freq_hz, prescale, "PCA9685 initialized");
        Ok(())
    }

    /// Gives the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Pca9685Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(Pca9685Error::I2c)
    }

    fn write_payload(&mut self, frame: &WheelFrame) -> Result<(), Pca9685Error<I2C::Error>> {
        self.i2c
            .write(self.address, &frame_payload(frame))
            .map_err(Pca9685Error::I2c)
    }
}

impl<I2C: I2c> Actuator for Pca9685<I2C> {
    type Error = Pca9685Error<I2C::Error>;

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn write_frame(&mut self, frame: &WheelFrame) -> Result<(), Self::Error> {
        self.write_payload(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::mock::{MockI2c, NoopDelay};

    fn channel_bytes(payload: &[u8], channel: u8) -> [u8; 4] {
        let at = 1 + usize::from(channel) * 4;
        [payload[at], payload[at + 1], payload[at + 2], payload[at + 3]]
    }

    #[test]
    fn channel_map_matches_wiring() {
        assert_eq!(
            channels(Wheel::FrontRight),
            WheelChannels {
                speed: 3,
                dir_a: 4,
                dir_b: 5
            }
        );
        assert_eq!(channels(Wheel::RearRight).dir_b, 11);
    }

    #[test]
    fn payload_encodes_sign_and_magnitude() {
        let frame = WheelFrame::new(2047, -4095, 0, 1);
        let p = frame_payload(&frame);

        assert_eq!(p.len(), 49);
        assert_eq!(p[0], LED0_ON_L);

        // FL forward at 2047
        assert_eq!(channel_bytes(&p, 0), [0, 0, 0xFF, 0x07]);
        assert_eq!(channel_bytes(&p, 1), full_on());
        assert_eq!(channel_bytes(&p, 2), full_off());

        // FR reverse at full scale
        assert_eq!(channel_bytes(&p, 3), [0, 0, 0xFF, 0x0F]);
        assert_eq!(channel_bytes(&p, 4), full_off());
        assert_eq!(channel_bytes(&p, 5), full_on());

        // RL coast
        for ch in 6..=8 {
            assert_eq!(channel_bytes(&p, ch), full_off());
        }

        // RR forward at minimum duty
        assert_eq!(channel_bytes(&p, 9), [0, 0, 1, 0]);
    }

    #[test]
    fn oversized_duty_is_capped() {
        let p = frame_payload(&WheelFrame::new(i16::MIN, 0, 0, 0));
        assert_eq!(channel_bytes(&p, 0), [0, 0, 0xFF, 0x0F]);
    }

    #[test]
    fn not_ready_until_init() {
        let mut pwm = Pca9685::new(MockI2c::new(), DEFAULT_ADDRESS);
        assert!(!pwm.is_ready());

        pwm.init(1000, &mut NoopDelay).unwrap();
        assert!(pwm.is_ready());

        let bus = pwm.release();
        assert_eq!(bus.writes[0], (0x40, vec![MODE1, 0x11]));
        assert_eq!(bus.writes[1], (0x40, vec![PRE_SCALE, 5]));
        assert_eq!(bus.writes[3], (0x40, vec![MODE1, 0xA1]));
        assert_eq!(bus.writes[4], (0x40, vec![MODE2, MODE2_OUTDRV]));
        assert_eq!(bus.writes.last().map(|(_, b)| b.len()), Some(49));
    }

    #[test]
    fn bad_frequency_leaves_driver_unready() {
        let mut pwm = Pca9685::new(MockI2c::new(), DEFAULT_ADDRESS);
        assert_eq!(
            pwm.init(0, &mut NoopDelay),
            Err(Pca9685Error::InvalidFrequency(0))
        );
        assert!(!pwm.is_ready());
        assert!(pwm.release().writes.is_empty());
    }

    #[test]
    fn one_transaction_per_frame() {
        let mut pwm = Pca9685::new(MockI2c::new(), 0x41);
        pwm.init(1000, &mut NoopDelay).unwrap();
        let before = pwm.i2c.writes.len();

        pwm.write_frame(&WheelFrame::new(100, -100, 100, -100)).unwrap();
        assert_eq!(pwm.i2c.writes.len(), before + 1);
        assert_eq!(pwm.i2c.writes[before].0, 0x41);
    }

    #[test]
    fn bus_error_is_wrapped() {
        let mut pwm = Pca9685::new(MockI2c::new(), DEFAULT_ADDRESS);
        pwm.i2c.fail = true;
        assert!(matches!(
            pwm.init(1000, &mut NoopDelay),
            Err(Pca9685Error::I2c(_))
        ));
    }
}

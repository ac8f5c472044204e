//! One I2C controller shared by several drivers on the main loop.
//!
//! The PWM expander and the OLED sit on the same two wires. Each driver gets
//! a [`SharedI2c`] handle; every transaction borrows the bus for its own
//! duration only. Handles must not be used from interrupt context.

use core::cell::RefCell;

use embedded_hal::i2c::{ErrorType, I2c, Operation};

/// Borrowing handle to a bus owned by a `RefCell`.
///
/// ```
/// use core::cell::RefCell;
/// use embedded_hal::i2c::I2c;
/// use mecanum_drive::hal::{MockI2c, SharedI2c};
///
/// let bus = RefCell::new(MockI2c::new());
/// let mut pwm = SharedI2c::new(&bus);
/// let mut oled = SharedI2c::new(&bus);
///
/// pwm.write(0x40, &[0x00, 0x21]).unwrap();
/// oled.write(0x3C, &[0x00, 0xAF]).unwrap();
///
/// assert_eq!(bus.borrow().writes.len(), 2);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct SharedI2c<'a, I2C> {
    bus: &'a RefCell<I2C>,
}

impl<'a, I2C> SharedI2c<'a, I2C> {
    /// Creates a handle to `bus`.
    pub fn new(bus: &'a RefCell<I2C>) -> Self {
        Self { bus }
    }
}

impl<I2C: ErrorType> ErrorType for SharedI2c<'_, I2C> {
    type Error = I2C::Error;
}

impl<I2C: I2c> I2c for SharedI2c<'_, I2C> {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.bus.borrow_mut().transaction(address, operations)
    }
}

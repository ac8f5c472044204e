//! Interrupt binding for the four wheel encoders.
//!
//! Each A channel gets a rising-edge interrupt. The handler reads the B
//! channel and forwards one edge to the wheel's [`EncoderChannel`]. Binding
//! happens once at startup; the handler arguments are leaked so their
//! addresses stay fixed for the life of the firmware.
//!
//! The ISR service is used directly rather than through `PinDriver`
//! subscriptions, which disable the interrupt after every edge.

use core::ffi::c_void;

use esp_idf_hal::sys::{self, esp, EspError};

use super::pins;
use crate::encoder::{EncoderChannel, EncoderCounterBank};
use crate::wheels::Wheel;

/// What one interrupt line needs inside its handler.
struct EncoderLine {
    channel: EncoderChannel<'static>,
    b_pin: i32,
}

/// Rising edge on an A channel. Runs in interrupt context.
unsafe extern "C" fn on_a_rising(arg: *mut c_void) {
    // SAFETY: `arg` is the leaked `EncoderLine` registered for this pin.
    let line = unsafe { &*(arg as *const EncoderLine) };
    let forward = unsafe { sys::gpio_get_level(line.b_pin) } != 0;
    line.channel.edge(forward);
}

fn configure_inputs(a: i32, b: i32) -> Result<(), EspError> {
    let config = sys::gpio_config_t {
        pin_bit_mask: (1u64 << a) | (1u64 << b),
        mode: sys::gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: sys::gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: sys::gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type: sys::gpio_int_type_t_GPIO_INTR_DISABLE,
        ..Default::default()
    };
    esp!(unsafe { sys::gpio_config(&config) })
}

/// Binds all four encoder interrupt lines to `bank`.
///
/// Call once, before the main loop. Counting starts immediately.
///
/// # Errors
///
/// Returns the first ESP-IDF error from GPIO or ISR setup.
pub fn bind_encoders(bank: &'static EncoderCounterBank) -> Result<(), EspError> {
    let installed = unsafe { sys::gpio_install_isr_service(0) };
    // Already installed by another driver is fine.
    if installed != sys::ESP_ERR_INVALID_STATE as sys::esp_err_t {
        esp!(installed)?;
    }

    for wheel in Wheel::ALL {
        let (a, b) = pins::encoder(wheel);
        configure_inputs(a, b)?;

        let line: &'static EncoderLine = Box::leak(Box::new(EncoderLine {
            channel: bank.channel(wheel),
            b_pin: b,
        }));

        esp!(unsafe { sys::gpio_set_intr_type(a, sys::gpio_int_type_t_GPIO_INTR_POSEDGE) })?;
        esp!(unsafe {
            sys::gpio_isr_handler_add(
                a,
                Some(on_a_rising),
                line as *const EncoderLine as *mut c_void,
            )
        })?;
        esp!(unsafe { sys::gpio_intr_enable(a) })?;

        tracing::info!(wheel = wheel.label(), a, b, "encoder bound");
    }
    Ok(())
}

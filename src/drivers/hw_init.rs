//! One-shot chain-counter interrupt setup.
//!
//! Configures the pulse and direction inputs using raw ESP-IDF sys calls
//! and registers the pulse ISR.  Called once from `main()` before the
//! control loop starts.  The relay outputs, home sensor and remote buttons
//! are owned by `esp-idf-hal` pin drivers instead.
//!
//! The ISR is kept minimal: read the direction pin, adjust the atomic
//! counter.  It never calls into winch or automatic-mode logic.

use std::sync::Arc;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;
#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;
use crate::sensors::pulse::PulseCounter;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    IsrInstallFailed(i32),
    IsrHandlerFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::IsrInstallFailed(rc) => write!(f, "GPIO ISR service install failed (rc={})", rc),
            Self::IsrHandlerFailed(rc) => write!(f, "pulse ISR registration failed (rc={})", rc),
        }
    }
}

impl core::error::Error for HwInitError {}

// ── Pulse ISR ─────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe extern "C" fn pulse_gpio_isr(arg: *mut core::ffi::c_void) {
    // SAFETY: `arg` is the pointer leaked by `init_pulse_isr` from an
    // `Arc<PulseCounter>`; it is never released, so it outlives the ISR.
    let counter = unsafe { &*(arg as *const PulseCounter) };
    // SAFETY: gpio_get_level is a register read; safe in ISR context.
    let paying_out = unsafe { gpio_get_level(pins::DIRECTION_GPIO) } != 0;
    counter.record_pulse(paying_out);
}

#[cfg(target_os = "espidf")]
unsafe fn config_input(pin: i32, intr_type: gpio_int_type_t) -> Result<(), HwInitError> {
    let cfg = gpio_config_t {
        pin_bit_mask: 1u64 << pin,
        mode: gpio_mode_t_GPIO_MODE_INPUT,
        pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
        pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
        intr_type,
        ..Default::default()
    };
    let ret = unsafe { gpio_config(&cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::GpioConfigFailed(ret));
    }
    Ok(())
}

/// Configure the chain-counter inputs and attach the pulse ISR to `counter`.
///
/// The ISR holds its own strong reference to the counter for the rest of
/// the program's life.
#[cfg(target_os = "espidf")]
pub fn init_pulse_isr(counter: &Arc<PulseCounter>) -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop;
    // single-threaded.  ESP_ERR_INVALID_STATE from the ISR service install
    // means it was already installed (acceptable).
    unsafe {
        config_input(pins::DIRECTION_GPIO, gpio_int_type_t_GPIO_INTR_DISABLE)?;
        config_input(pins::PULSE_INPUT_GPIO, gpio_int_type_t_GPIO_INTR_POSEDGE)?;

        let ret = gpio_install_isr_service(0);
        if ret != ESP_OK as i32 && ret != ESP_ERR_INVALID_STATE as i32 {
            return Err(HwInitError::IsrInstallFailed(ret));
        }

        let arg = Arc::into_raw(Arc::clone(counter)) as *mut core::ffi::c_void;
        let ret = gpio_isr_handler_add(pins::PULSE_INPUT_GPIO, Some(pulse_gpio_isr), arg);
        if ret != ESP_OK as i32 {
            // Reclaim the handle the ISR never got.
            drop(Arc::from_raw(arg as *const PulseCounter));
            return Err(HwInitError::IsrHandlerFailed(ret));
        }
        gpio_intr_enable(pins::PULSE_INPUT_GPIO);
    }

    info!(
        "hw_init: pulse ISR on GPIO{} (direction GPIO{})",
        pins::PULSE_INPUT_GPIO,
        pins::DIRECTION_GPIO
    );
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_pulse_isr(_counter: &Arc<PulseCounter>) -> Result<(), HwInitError> {
    log::info!("hw_init(sim): pulse ISR skipped");
    Ok(())
}

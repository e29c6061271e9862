//! One-shot hardware initialization.
//!
//! Configures all 18 magnet output lines as push-pull outputs driven LOW,
//! using raw ESP-IDF sys calls, then hands them out as [`MagnetLines`].
//! Called once from `main()` before the service loop starts.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

use log::info;

use crate::error::InitError;
use crate::pins::{self, MAGNET_COUNT, PIN_MAP};

use super::gpio::GpioLine;
use super::magnet::MagnetLines;

/// Configure every magnet line as an output at LOW.
///
/// With `diagnostics` set, each line is confirmed on the console.
#[cfg(target_os = "espidf")]
pub fn init_magnet_outputs(diagnostics: bool) -> Result<(), InitError> {
    for &gpio in &pins::OUTPUT_GPIOS {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << gpio,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        // SAFETY: called once from main() before the loop; single-threaded.
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(InitError::GpioConfigFailed { gpio, code: ret });
        }
        // SAFETY: pin configured as output just above.
        let ret = unsafe { gpio_set_level(gpio, 0) };
        if ret != ESP_OK as i32 {
            return Err(InitError::GpioConfigFailed { gpio, code: ret });
        }
        if diagnostics {
            info!("Pin GPIO{} initialized as OUTPUT.", gpio);
        }
    }

    info!("hw_init: {} magnet outputs configured LOW", pins::OUTPUT_LINE_COUNT);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_magnet_outputs(diagnostics: bool) -> Result<(), InitError> {
    if diagnostics {
        for gpio in pins::OUTPUT_GPIOS {
            info!("Pin GPIO{} initialized as OUTPUT.", gpio);
        }
    }
    info!("hw_init(sim): GPIO config skipped");
    Ok(())
}

/// Build the line pairs for every magnet from the pin map.
pub fn magnet_lines() -> [MagnetLines<GpioLine>; MAGNET_COUNT] {
    PIN_MAP.map(|pair| MagnetLines::new(GpioLine::new(pair.in1), GpioLine::new(pair.in2)))
}

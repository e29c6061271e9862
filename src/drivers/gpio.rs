//! Push-pull output line exposed through `embedded_hal::digital::OutputPin`.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes the level with `gpio_set_level` on a pin already
//! configured as output by [`hw_init`](super::hw_init).
//! On host/test: tracks the level in-memory only.

use embedded_hal::digital::{self, ErrorKind, ErrorType, OutputPin};

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::{ESP_OK, gpio_set_level};

/// `gpio_set_level` returned a non-OK code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpioError(pub i32);

impl digital::Error for GpioError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

pub struct GpioLine {
    gpio: i32,
    high: bool,
}

impl GpioLine {
    /// Wrap an output GPIO.  The line is assumed LOW (hw_init leaves it so).
    pub fn new(gpio: i32) -> Self {
        Self { gpio, high: false }
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }

    /// Last level successfully written.
    pub fn is_high(&self) -> bool {
        self.high
    }

    #[cfg(target_os = "espidf")]
    fn write(&mut self, high: bool) -> Result<(), GpioError> {
        // SAFETY: the pin was configured as an output in hw_init and is
        // only written from the main loop.
        let rc = unsafe { gpio_set_level(self.gpio, u32::from(high)) };
        if rc != ESP_OK as i32 {
            return Err(GpioError(rc));
        }
        self.high = high;
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn write(&mut self, high: bool) -> Result<(), GpioError> {
        self.high = high;
        Ok(())
    }
}

impl ErrorType for GpioLine {
    type Error = GpioError;
}

impl OutputPin for GpioLine {
    fn set_low(&mut self) -> Result<(), GpioError> {
        self.write(false)
    }

    fn set_high(&mut self) -> Result<(), GpioError> {
        self.write(true)
    }
}

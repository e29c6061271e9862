//! Blocking delay exposed through `embedded_hal::delay::DelayNs`.
//!
//! On ESP-IDF: esp-idf-hal's hybrid delay (busy-wait below its threshold,
//! FreeRTOS sleep above it), so the 10 ms settle and 15 ms pulse are not
//! rounded to the RTOS tick.
//! On host/test: `std::thread::sleep`.

use embedded_hal::delay::DelayNs;

pub struct SystemDelay {
    #[cfg(target_os = "espidf")]
    inner: esp_idf_hal::delay::Delay,
}

impl Default for SystemDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemDelay {
    pub fn new() -> Self {
        Self {
            #[cfg(target_os = "espidf")]
            inner: esp_idf_hal::delay::Delay::new_default(),
        }
    }
}

#[cfg(target_os = "espidf")]
impl DelayNs for SystemDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.inner.delay_ns(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.inner.delay_us(us);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.inner.delay_ms(ms);
    }
}

#[cfg(not(target_os = "espidf"))]
impl DelayNs for SystemDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}

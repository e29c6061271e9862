//! UART0 transport adapter (ESP-IDF only).
//!
//! Wraps `esp_idf_hal::uart::UartDriver` as a non-blocking
//! [`Transport`].  UART0 is also the log console, so diagnostic text and
//! the command stream share one cable; the host ignores anything that is
//! not addressed to it.

use esp_idf_hal::delay::NON_BLOCK;
use esp_idf_hal::gpio::{AnyIOPin, Gpio1, Gpio3};
use esp_idf_hal::uart::{UART0, UartDriver, config::Config};
use esp_idf_hal::units::Hertz;
use esp_idf_svc::sys::EspError;
use log::info;

use crate::error::InitError;
use crate::pins;
use crate::protocol::transport::Transport;

pub struct UartTransport {
    driver: UartDriver<'static>,
}

impl UartTransport {
    /// Install the UART0 driver on GPIO1 (TX) / GPIO3 (RX), 8N1.
    pub fn open(uart: UART0, tx: Gpio1, rx: Gpio3, baud: u32) -> Result<Self, InitError> {
        let config = Config::default().baudrate(Hertz(baud));
        let driver = UartDriver::new(
            uart,
            tx,
            rx,
            Option::<AnyIOPin>::None,
            Option::<AnyIOPin>::None,
            &config,
        )
        .map_err(|_| InitError::UartInitFailed)?;

        info!(
            "UART0 open: TX=GPIO{} RX=GPIO{} @ {} baud",
            pins::UART_TX_GPIO,
            pins::UART_RX_GPIO,
            baud
        );
        Ok(Self { driver })
    }
}

impl Transport for UartTransport {
    type Error = EspError;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, EspError> {
        self.driver.read(buf, NON_BLOCK)
    }

    fn available(&self) -> bool {
        self.driver.remaining_read().is_ok_and(|n| n > 0)
    }
}

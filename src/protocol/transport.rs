//! Transport abstraction for the inbound command stream.
//!
//! The link is receive-only: the host never gets an acknowledgment, so the
//! trait carries no write side.
//!
//! Concrete implementations:
//! - UART0 on the ESP32 ([`UartTransport`](crate::adapters::uart::UartTransport))
//! - scripted byte streams in the host tests
//!
//! The service loop is generic over `Transport`, so the parser and
//! dispatcher never see the peripheral.

/// Byte-oriented receive channel.
pub trait Transport {
    /// Error type for this transport.
    type Error: core::fmt::Debug;

    /// Read up to `buf.len()` bytes into `buf`.
    /// Returns the number of bytes actually read.
    /// Returns 0 if no data is available (non-blocking).
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Check if data is available for reading.
    fn available(&self) -> bool;

    /// Read one byte if one is waiting.
    fn read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if !self.available() {
            return Ok(None);
        }
        let mut b = [0u8; 1];
        match self.read(&mut b)? {
            0 => Ok(None),
            _ => Ok(Some(b[0])),
        }
    }
}

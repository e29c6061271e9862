//! Resync watchdog for partially received frames.
//!
//! Bounds how long a non-empty parser buffer may wait for its next byte.
//! The loop calls [`ResyncWatchdog::check`] once per tick *before* feeding
//! the next available byte, and [`ResyncWatchdog::note_byte`] whenever the
//! parser stores a byte.  Timestamps are `u32` milliseconds and compared
//! with wrapping arithmetic, so the ~49-day rollover is harmless.

use super::parser::FrameParser;

pub struct ResyncWatchdog {
    timeout_ms: u32,
    last_byte_ms: u32,
}

impl ResyncWatchdog {
    pub fn new(timeout_ms: u32) -> Self {
        Self {
            timeout_ms,
            last_byte_ms: 0,
        }
    }

    /// Record that the parser stored a byte at `now_ms`.
    #[inline]
    pub fn note_byte(&mut self, now_ms: u32) {
        self.last_byte_ms = now_ms;
    }

    /// Clear a stalled partial frame.
    ///
    /// Returns the number of bytes dropped, or `None` if the parser was idle
    /// or the frame is still within its timeout.
    pub fn check(&self, parser: &mut FrameParser, now_ms: u32) -> Option<usize> {
        if parser.is_idle() || !self.expired(now_ms) {
            return None;
        }
        let dropped = parser.buffered();
        parser.reset();
        Some(dropped)
    }

    /// Whether more than the timeout has elapsed since the last stored byte.
    pub fn expired(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.last_byte_ms) > self.timeout_ms
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }
}

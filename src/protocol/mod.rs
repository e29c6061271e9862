//! Serial command protocol.
//!
//! Wire format (one command per frame, no acknowledgment):
//! ```text
//! ┌──────┬──────┬─────────────┬───────────────────┐
//! │ 0xAA │ 0x55 │ magnet + 10 │ direction + 10    │
//! └──────┴──────┴─────────────┴───────────────────┘
//! ```
//!
//! The +10 offset keeps every legal payload byte (10..=18, 10..=11) far from
//! both header values, so a header is never mistaken for payload while the
//! parser resynchronises.
//!
//! ```text
//! ┌────────────┐   ┌──────────────────┐   ┌────────────┐   ┌───────────┐
//! │ Transport  │──▶│ FrameParser      │──▶│ dispatch   │──▶│ MagnetBank│
//! │ (bytes)    │   │ + ResyncWatchdog │   │ (validate) │   │ (pulse)   │
//! └────────────┘   └──────────────────┘   └────────────┘   └───────────┘
//! ```

pub mod dispatch;
pub mod parser;
pub mod resync;
pub mod transport;

use crate::app::commands::Command;

/// First sync byte.
pub const HEADER1: u8 = 0xAA;
/// Second sync byte.
pub const HEADER2: u8 = 0x55;
/// Offset added to the magnet ID and direction on the wire.
pub const FIELD_OFFSET: u8 = 0x0A;
/// Total frame length in bytes.
pub const FRAME_LEN: usize = 4;

/// A complete 4-byte frame as collected by the parser.
///
/// Not yet validated beyond the header match the parser performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame([u8; FRAME_LEN]);

impl Frame {
    pub const fn from_bytes(bytes: [u8; FRAME_LEN]) -> Self {
        Self(bytes)
    }

    #[inline]
    pub fn bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    #[inline]
    pub fn headers(&self) -> (u8, u8) {
        (self.0[0], self.0[1])
    }

    #[inline]
    pub fn magnet_byte(&self) -> u8 {
        self.0[2]
    }

    #[inline]
    pub fn direction_byte(&self) -> u8 {
        self.0[3]
    }
}

/// Build the wire frame for a command.
pub fn encode(cmd: Command) -> Frame {
    Frame([
        HEADER1,
        HEADER2,
        cmd.magnet.get() + FIELD_OFFSET,
        cmd.direction.code() + FIELD_OFFSET,
    ])
}

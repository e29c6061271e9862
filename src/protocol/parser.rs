//! Byte-at-a-time frame parser.
//!
//! ```text
//!            0xAA                 0x55                 any × 2
//!   Idle ──────────▶ SawHeader1 ──────────▶ Collecting ─────────▶ frame
//!    ▲  ╲ other        │  ╲ 0xAA (restart)    │ (2 → 4)            │
//!    │   ╰─(drop)      │   ╰──▶ SawHeader1 ◀──╯ 0xAA (restart)     │
//!    │                 │ other (drop buffer)                        │
//!    ╰─────────────────┴────────────────────────────────────────────╯
//! ```
//!
//! Payload bytes are offset by `0x0A`, so a legal payload byte is never
//! `0xAA`.  Seeing `0xAA` in the payload slots therefore means the sender
//! restarted mid-frame, and matching restarts from that byte.
//!
//! Malformed input never raises an error: bytes that cannot extend a valid
//! frame are dropped and reported through [`Step`] for diagnostics only.
//! The parser has no notion of time; stalled partial frames are cleared by
//! the [`ResyncWatchdog`](super::resync::ResyncWatchdog).

use heapless::Vec;

use super::{FRAME_LEN, Frame, HEADER1, HEADER2};

/// Observable parser state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Buffer empty, waiting for `HEADER1`.
    Idle,
    /// `HEADER1` buffered, waiting for `HEADER2`.
    SawHeader1,
    /// Both headers buffered; `count` bytes held so far (2 or 3).
    Collecting { count: u8 },
}

/// Result of feeding one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Byte stored; frame not yet complete.
    Buffered,
    /// Byte ignored while idle (not a frame start).
    Ignored(u8),
    /// `HEADER1` arrived after the first header byte: the old candidate
    /// was dropped and this byte starts a new one.
    Restarted,
    /// Byte could not follow `HEADER1`; the partial frame was dropped.
    Discarded(u8),
    /// Fourth byte stored; the parser is back to idle.
    Complete(Frame),
}

impl Step {
    /// Whether the byte was stored in the frame buffer.
    pub fn stored(&self) -> bool {
        matches!(self, Self::Buffered | Self::Restarted | Self::Complete(_))
    }
}

/// Streaming parser for `AA 55 id dir` frames.
pub struct FrameParser {
    state: ParserState,
    buf: Vec<u8, FRAME_LEN>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    pub fn new() -> Self {
        Self {
            state: ParserState::Idle,
            buf: Vec::new(),
        }
    }

    /// Process a single incoming byte.
    pub fn push(&mut self, byte: u8) -> Step {
        match self.state {
            ParserState::Idle => {
                if byte == HEADER1 {
                    self.start_candidate();
                    Step::Buffered
                } else {
                    Step::Ignored(byte)
                }
            }
            ParserState::SawHeader1 => {
                if byte == HEADER2 {
                    self.store(byte);
                    self.state = ParserState::Collecting { count: 2 };
                    Step::Buffered
                } else if byte == HEADER1 {
                    self.start_candidate();
                    Step::Restarted
                } else {
                    self.reset();
                    Step::Discarded(byte)
                }
            }
            ParserState::Collecting { .. } if byte == HEADER1 => {
                self.start_candidate();
                Step::Restarted
            }
            ParserState::Collecting { count } => {
                self.store(byte);
                let count = count + 1;
                if count as usize == FRAME_LEN {
                    let frame = self.take_frame();
                    self.reset();
                    Step::Complete(frame)
                } else {
                    self.state = ParserState::Collecting { count };
                    Step::Buffered
                }
            }
        }
    }

    /// Drop any partial frame and return to idle.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.state = ParserState::Idle;
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Number of bytes currently held for the candidate frame.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    pub fn is_idle(&self) -> bool {
        self.buf.is_empty()
    }

    fn start_candidate(&mut self) {
        self.buf.clear();
        self.store(HEADER1);
        self.state = ParserState::SawHeader1;
    }

    fn store(&mut self, byte: u8) {
        // Capacity is FRAME_LEN and every path that fills the last slot
        // resets the buffer, so this push cannot overflow.
        let pushed = self.buf.push(byte);
        debug_assert!(pushed.is_ok(), "frame buffer overflow");
    }

    fn take_frame(&self) -> Frame {
        let mut bytes = [0u8; FRAME_LEN];
        bytes.copy_from_slice(&self.buf);
        Frame::from_bytes(bytes)
    }
}

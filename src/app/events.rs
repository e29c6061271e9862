//! Outbound application events.
//!
//! The [`MagnetService`](super::service::MagnetService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  None of them travel
//! back over the wire; adapters decide whether to print them.

use crate::error::{ActuatorError, FrameError};

use super::commands::Command;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The service is listening (carries the resync timeout in ms).
    Started { resync_timeout_ms: u32 },

    /// A byte arrived while idle and was not a frame start.
    NoiseDiscarded { byte: u8 },

    /// `0xAA` arrived mid-frame; matching restarted from it.
    HeaderRestarted,

    /// A byte other than `0x55` followed `0xAA`; the candidate was dropped.
    HeaderMismatch { byte: u8 },

    /// A partial frame sat idle past the resync timeout and was cleared.
    FrameTimedOut { dropped: usize },

    /// A complete frame failed validation; no hardware action taken.
    FrameRejected(FrameError),

    /// A magnet finished its settle/pulse/release sequence.
    Actuated(Command),

    /// A GPIO write failed mid-sequence.  Lines were forced LOW.
    ActuationFailed {
        command: Command,
        error: ActuatorError,
    },
}

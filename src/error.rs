//! Unified error types for the magnet bank firmware.
//!
//! A single `Error` enum that every subsystem can convert into, keeping the
//! top-level loop's error handling uniform.  All variants are `Copy` so they
//! can be carried inside [`AppEvent`](crate::app::events::AppEvent)s without
//! allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A completed frame failed validation.
    Frame(FrameError),
    /// An actuation could not be carried out.
    Actuator(ActuatorError),
    /// Peripheral initialisation failed.
    Init(InitError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Frame(e) => write!(f, "frame: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Frame validation errors
// ---------------------------------------------------------------------------

/// Why a completed 4-byte frame was discarded by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Header bytes differ from `AA 55`.
    BadHeader { h1: u8, h2: u8 },
    /// Decoded magnet ID (raw byte minus offset) is outside `0..MAGNET_COUNT`.
    MagnetOutOfRange { raw: u8 },
    /// Decoded direction (raw byte minus offset) is neither 0 nor 1.
    DirectionOutOfRange { raw: u8 },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decoded = |raw: u8| i16::from(raw) - i16::from(crate::protocol::FIELD_OFFSET);
        match *self {
            Self::BadHeader { h1, h2 } => {
                write!(f, "invalid command headers: 0x{h1:02X} 0x{h2:02X}")
            }
            Self::MagnetOutOfRange { raw } => write!(
                f,
                "invalid magnet ID in command: {} (raw byte: 0x{raw:02X})",
                decoded(raw)
            ),
            Self::DirectionOutOfRange { raw } => write!(
                f,
                "invalid action in command: {} (raw byte: 0x{raw:02X})",
                decoded(raw)
            ),
        }
    }
}

impl From<FrameError> for Error {
    fn from(e: FrameError) -> Self {
        Self::Frame(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// An output line rejected a level change.
    GpioWriteFailed,
    /// The bank has no lines for this magnet index.
    UnknownMagnet(u8),
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioWriteFailed => write!(f, "GPIO write failed"),
            Self::UnknownMagnet(id) => write!(f, "no lines for magnet {id}"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Initialisation errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// `gpio_config` returned a non-OK code for an output line.
    GpioConfigFailed { gpio: i32, code: i32 },
    /// The UART driver could not be installed.
    UartInitFailed,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GpioConfigFailed { gpio, code } => {
                write!(f, "GPIO{gpio} config failed (rc={code})")
            }
            Self::UartInitFailed => write!(f, "UART driver install failed"),
        }
    }
}

impl From<InitError> for Error {
    fn from(e: InitError) -> Self {
        Self::Init(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

//! Application service: the device-context object.
//!
//! [`MagnetService`] owns every piece of mutable state on the device: the
//! frame parser, the resync watchdog, the magnet bank and the link
//! statistics.  The scheduling loop owns the service and passes the
//! transport, clock and sink into each [`tick`](MagnetService::tick), so the
//! whole pipeline runs in tests against a scripted stream and a virtual clock.
//!
//! ```text
//!  Transport ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                │        MagnetService         │
//!      Clock ──▶ │ parser · resync · dispatch   │ ──▶ MagnetBank ──▶ pins
//!                └──────────────────────────────┘
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use log::info;

use crate::config::SystemConfig;
use crate::drivers::magnet::MagnetBank;
use crate::error::ActuatorError;
use crate::protocol::{FRAME_LEN, Frame};
use crate::protocol::dispatch;
use crate::protocol::parser::{FrameParser, ParserState, Step};
use crate::protocol::resync::ResyncWatchdog;
use crate::protocol::transport::Transport;

use super::events::AppEvent;
use super::ports::{Clock, EventSink};

/// Running counters for the serial link since boot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkStats {
    /// Bytes dropped because they could not start or extend a frame.
    pub noise_bytes: u64,
    /// Times a second `0xAA` restarted header matching.
    pub header_restarts: u64,
    /// Partial frames cleared by the resync watchdog.
    pub resync_timeouts: u64,
    /// Four-byte frames handed to the dispatcher.
    pub frames_completed: u64,
    /// Completed frames that failed validation.
    pub frames_rejected: u64,
    /// Valid commands that completed the settle/pulse sequence.
    pub actuations: u64,
    /// Valid commands aborted by a GPIO write error.
    pub actuation_failures: u64,
}

/// Bytes one [`tick`](MagnetService::tick) may consume.  One frame's worth,
/// so a tick completes at most one frame and blocks for at most one
/// settle/pulse sequence before the loop yields again.
pub const BYTES_PER_TICK: usize = FRAME_LEN;

// ───────────────────────────────────────────────────────────────
// MagnetService
// ───────────────────────────────────────────────────────────────

pub struct MagnetService<P, D> {
    parser: FrameParser,
    resync: ResyncWatchdog,
    bank: MagnetBank<P, D>,
    config: SystemConfig,
    stats: LinkStats,
}

impl<P: OutputPin, D: DelayNs> MagnetService<P, D> {
    /// Construct the service.  Call [`start`](Self::start) before polling.
    pub fn new(config: SystemConfig, bank: MagnetBank<P, D>) -> Self {
        Self {
            parser: FrameParser::new(),
            resync: ResyncWatchdog::new(config.resync_timeout_ms),
            bank,
            config,
            stats: LinkStats::default(),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Force every magnet line LOW and announce that the link is listening.
    pub fn start(&mut self, sink: &mut impl EventSink) -> Result<(), ActuatorError> {
        self.bank.release_all()?;
        self.parser.reset();
        sink.emit(&AppEvent::Started {
            resync_timeout_ms: self.resync.timeout_ms(),
        });
        info!(
            "MagnetService started (resync {} ms, settle {} ms, pulse {} ms)",
            self.resync.timeout_ms(),
            self.config.settle_ms,
            self.config.pulse_ms
        );
        Ok(())
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// One pass of the scheduling loop: up to [`BYTES_PER_TICK`] polls.
    ///
    /// Stops early once the transport runs dry.  Returns the number of bytes
    /// consumed; the caller feeds the task watchdog and yields after every
    /// call, however busy the link is.
    pub fn tick<T: Transport>(
        &mut self,
        transport: &mut T,
        clock: &impl Clock,
        sink: &mut impl EventSink,
    ) -> Result<usize, T::Error> {
        let mut consumed = 0;
        while consumed < BYTES_PER_TICK && self.poll(transport, clock, sink)? {
            consumed += 1;
        }
        Ok(consumed)
    }

    /// Resync check, then at most one byte.
    ///
    /// Returns `Ok(true)` if a byte was consumed.  A completed valid frame
    /// actuates before this returns, blocking for the settle and pulse time.
    pub fn poll<T: Transport>(
        &mut self,
        transport: &mut T,
        clock: &impl Clock,
        sink: &mut impl EventSink,
    ) -> Result<bool, T::Error> {
        let now = clock.now_ms();
        self.check_resync(now, sink);

        match transport.read_byte()? {
            Some(byte) => {
                self.feed_byte(byte, now, sink);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Clear a partial frame that has waited past the resync timeout.
    pub fn check_resync(&mut self, now_ms: u32, sink: &mut impl EventSink) {
        if let Some(dropped) = self.resync.check(&mut self.parser, now_ms) {
            self.stats.resync_timeouts += 1;
            sink.emit(&AppEvent::FrameTimedOut { dropped });
        }
    }

    /// Feed one received byte to the parser and act on the outcome.
    pub fn feed_byte(&mut self, byte: u8, now_ms: u32, sink: &mut impl EventSink) {
        let step = self.parser.push(byte);
        if step.stored() {
            self.resync.note_byte(now_ms);
        }

        match step {
            Step::Buffered => {}
            Step::Ignored(byte) => {
                self.stats.noise_bytes += 1;
                sink.emit(&AppEvent::NoiseDiscarded { byte });
            }
            Step::Restarted => {
                self.stats.header_restarts += 1;
                sink.emit(&AppEvent::HeaderRestarted);
            }
            Step::Discarded(byte) => {
                self.stats.noise_bytes += 1;
                sink.emit(&AppEvent::HeaderMismatch { byte });
            }
            Step::Complete(frame) => self.handle_frame(&frame, sink),
        }
    }

    /// Validate a completed frame and, if it holds, actuate synchronously.
    pub fn handle_frame(&mut self, frame: &Frame, sink: &mut impl EventSink) {
        self.stats.frames_completed += 1;

        let cmd = match dispatch::decode(frame) {
            Ok(cmd) => cmd,
            Err(e) => {
                self.stats.frames_rejected += 1;
                sink.emit(&AppEvent::FrameRejected(e));
                return;
            }
        };

        match self.bank.actuate(cmd) {
            Ok(()) => {
                self.stats.actuations += 1;
                sink.emit(&AppEvent::Actuated(cmd));
            }
            Err(error) => {
                self.stats.actuation_failures += 1;
                sink.emit(&AppEvent::ActuationFailed {
                    command: cmd,
                    error,
                });
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn parser_state(&self) -> ParserState {
        self.parser.state()
    }

    pub fn stats(&self) -> LinkStats {
        self.stats
    }
}

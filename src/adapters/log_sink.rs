//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the ESP-IDF
//! logger, which shares UART0 with the command stream.  Diagnostic text is
//! advisory only; hosts never parse it.
//!
//! With diagnostics off only hardware faults are printed, so a quiet link
//! carries nothing but the startup banner.

use log::{debug, info, warn};

use crate::app::commands::Direction;
use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs [`AppEvent`]s to the serial console.
pub struct LogEventSink {
    diagnostics: bool,
}

impl LogEventSink {
    pub fn new(diagnostics: bool) -> Self {
        Self { diagnostics }
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        if let AppEvent::ActuationFailed { command, error } = event {
            warn!(
                "ACT   | magnet {} {:?} failed: {}",
                command.magnet, command.direction, error
            );
            return;
        }
        if !self.diagnostics {
            return;
        }

        match event {
            AppEvent::Started { resync_timeout_ms } => {
                info!("START | listening, resync timeout {} ms", resync_timeout_ms);
            }
            AppEvent::NoiseDiscarded { byte } => {
                debug!("RX    | noise byte 0x{:02X} ignored", byte);
            }
            AppEvent::HeaderRestarted => {
                debug!("RX    | repeated header, restarting frame");
            }
            AppEvent::HeaderMismatch { byte } => {
                debug!("RX    | 0x{:02X} after header, frame dropped", byte);
            }
            AppEvent::FrameTimedOut { dropped } => {
                info!("RX    | command timeout, resetting buffer ({} byte(s))", dropped);
            }
            AppEvent::FrameRejected(e) => {
                info!("CMD   | rejected: {}", e);
            }
            AppEvent::Actuated(cmd) => {
                let motion = match cmd.direction {
                    Direction::Retract => "IN (retracting)",
                    Direction::Extend => "OUT (extending)",
                };
                info!("ACT   | Magnet {} -> {}", cmd.magnet, motion);
            }
            AppEvent::ActuationFailed { .. } => {}
        }
    }
}

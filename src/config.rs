//! System configuration parameters
//!
//! All tunable parameters for the magnet bank firmware.  The configuration
//! is fixed at startup; nothing received over the command link changes it.

use serde::{Deserialize, Serialize};

use crate::pins;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Diagnostics ---
    /// Emit human-readable diagnostic lines (init confirmations, drops,
    /// rejected frames, actuations) over the console.
    pub diagnostics: bool,

    // --- Link ---
    /// Serial link rate (bits/s)
    pub baud_rate: u32,
    /// Maximum gap (ms) between bytes of one frame before the partial
    /// frame is discarded
    pub resync_timeout_ms: u32,

    // --- Actuation ---
    /// Forced-low settle interval before a pulse (ms)
    pub settle_ms: u32,
    /// Drive pulse duration (ms)
    pub pulse_ms: u32,

    // --- Timing ---
    /// Yield at the end of every loop iteration (ms)
    pub loop_yield_ms: u32,
    /// Task watchdog timeout (ms)
    pub task_watchdog_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Diagnostics
            diagnostics: false,

            // Link
            baud_rate: pins::LINK_BAUD,
            resync_timeout_ms: 100,

            // Actuation
            settle_ms: 10,
            pulse_ms: 15,

            // Timing
            loop_yield_ms: 1,
            task_watchdog_ms: 5_000,
        }
    }
}

impl SystemConfig {
    /// Default configuration with diagnostic reporting switched on.
    pub fn with_diagnostics() -> Self {
        Self {
            diagnostics: true,
            ..Self::default()
        }
    }

    /// Longest time one actuation blocks the loop (settle + pulse).
    pub fn worst_case_actuation_ms(&self) -> u32 {
        self.settle_ms.saturating_add(self.pulse_ms)
    }

    /// Reject configurations the loop cannot run safely with.
    ///
    /// The resync timeout must exceed the worst-case actuation time,
    /// otherwise a frame arriving right after an actuation could be
    /// discarded as stalled.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.baud_rate == 0 {
            return Err("baud_rate must be non-zero");
        }
        if self.pulse_ms == 0 {
            return Err("pulse_ms must be non-zero");
        }
        if self.resync_timeout_ms == 0 {
            return Err("resync_timeout_ms must be non-zero");
        }
        if self.resync_timeout_ms <= self.worst_case_actuation_ms() {
            return Err("resync_timeout_ms must exceed settle_ms + pulse_ms");
        }
        if self.task_watchdog_ms <= self.worst_case_actuation_ms().saturating_add(self.loop_yield_ms) {
            return Err("task_watchdog_ms shorter than one loop iteration");
        }
        Ok(())
    }

    /// JSON rendering for the startup diagnostics dump.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

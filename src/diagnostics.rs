//! Startup banner, link statistics summary and panic logging.
//!
//! All of this is human-readable text on UART0, interleaved with the
//! command stream.  Hosts never parse it.

use log::info;

use crate::app::commands::{Command, MagnetId};
use crate::app::service::LinkStats;
use crate::config::SystemConfig;
use crate::protocol::{self, FIELD_OFFSET, HEADER1, HEADER2};

pub const FIRMWARE_NAME: &str = "ESP32 Magnet Control System";

/// Banner lines printed once at boot, before the outputs are configured.
pub fn banner_lines(config: &SystemConfig) -> Vec<String> {
    let mut lines = vec![
        format!("{} v{} started", FIRMWARE_NAME, env!("CARGO_PKG_VERSION")),
        format!(
            "Command Format: [0x{:02X}][0x{:02X}][Magnet_ID+0x{:02X}][Action+0x{:02X}]",
            HEADER1, HEADER2, FIELD_OFFSET, FIELD_OFFSET
        ),
    ];

    if let Some(first) = MagnetId::new(0) {
        for (label, cmd) in [
            ("IN ", Command::retract(first)),
            ("OUT", Command::extend(first)),
        ] {
            lines.push(format!(
                "Example: Magnet {} {} = {}",
                first,
                label,
                hex_bytes(protocol::encode(cmd).bytes())
            ));
        }
    }

    lines.push(format!(
        "Debug Mode: {}",
        if config.diagnostics { "ON" } else { "OFF" }
    ));
    lines
}

pub fn log_banner(config: &SystemConfig) {
    for line in banner_lines(config) {
        info!("{}", line);
    }
}

/// One-line summary of the link counters.
pub fn summary(stats: &LinkStats) -> String {
    format!(
        "frames={} actuated={} rejected={} failed={} noise={} restarts={} timeouts={}",
        stats.frames_completed,
        stats.actuations,
        stats.frames_rejected,
        stats.actuation_failures,
        stats.noise_bytes,
        stats.header_restarts,
        stats.resync_timeouts,
    )
}

fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("0x{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

// ───────────────────────────────────────────────────────────────
// Panic hook
// ───────────────────────────────────────────────────────────────

/// Install a panic hook that logs the reason before the default handler
/// resets the device.
///
/// Must be called once during init, after the logger is up.
pub fn install_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        let reason = if let Some(msg) = info.payload().downcast_ref::<&str>() {
            *msg
        } else if let Some(msg) = info.payload().downcast_ref::<String>() {
            msg.as_str()
        } else {
            "unknown panic"
        };

        match info.location() {
            Some(loc) => log::error!("PANIC: {} at {}:{}", reason, loc.file(), loc.line()),
            None => log::error!("PANIC: {}", reason),
        }
    }));
}

//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MagnetService (domain)
//! ```
//!
//! Driven adapters (clock, event sink) implement these traits.  The
//! [`MagnetService`](super::service::MagnetService) consumes them via
//! generics, so the domain core never touches the SoC directly.  The byte
//! source is the [`Transport`](crate::protocol::transport::Transport) trait
//! and the output lines are `embedded_hal` pins.

// ───────────────────────────────────────────────────────────────
// Clock port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock.
///
/// The value wraps at `u32::MAX`; consumers compare timestamps with
/// `wrapping_sub`.
pub trait Clock {
    fn now_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log, test
/// recorder).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

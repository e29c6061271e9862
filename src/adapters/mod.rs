//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements | Connects to             |
//! |------------|------------|-------------------------|
//! | `log_sink` | EventSink  | Serial log output       |
//! | `time`     | Clock      | ESP32 high-res timer    |
//! | `uart`     | Transport  | UART0 (espidf only)     |

pub mod log_sink;
pub mod time;
#[cfg(target_os = "espidf")]
pub mod uart;

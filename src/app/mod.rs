//! Application core: pure domain logic, zero I/O.
//!
//! This module holds the command types, the diagnostic event stream and
//! the [`MagnetService`](service::MagnetService) that ties the protocol
//! layer to the magnet bank.  All interaction with the SoC happens through
//! the **port traits** in [`ports`] and `embedded_hal`, keeping this layer
//! fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;

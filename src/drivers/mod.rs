//! Magnet drivers, hardware initialisation, and peripheral helpers.

pub mod delay;
pub mod gpio;
pub mod hw_init;
pub mod magnet;
pub mod watchdog;

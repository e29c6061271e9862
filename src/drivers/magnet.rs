//! Bistable magnet bank driver.
//!
//! Each magnet sits behind an H-bridge with two logic inputs (`in1`, `in2`).
//! One actuation is a fixed, blocking sequence:
//!
//! ```text
//!            settle            pulse
//!   in1  ___________________/‾‾‾‾‾‾‾‾‾‾\____   (Extend)
//!   in2  ___________________________________
//!        ↑ both LOW          ↑ one HIGH    ↑ both LOW
//! ```
//!
//! Retract mirrors this on `in2`.  The lines are held through a
//! [`DriveGuard`] whose `Drop` forces both LOW, so every exit path,
//! including a GPIO error halfway through, leaves the magnet at rest.
//!
//! ## Safety contract
//!
//! `in1` and `in2` of one pair are never HIGH at the same instant: the
//! line that must be LOW is written before the other goes HIGH, and both
//! have already been LOW for the settle interval.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::app::commands::{Command, Direction};
use crate::config::SystemConfig;
use crate::error::ActuatorError;
use crate::pins::MAGNET_COUNT;

/// The two output lines of one magnet.
pub struct MagnetLines<P> {
    in1: P,
    in2: P,
}

impl<P: OutputPin> MagnetLines<P> {
    pub fn new(in1: P, in2: P) -> Self {
        Self { in1, in2 }
    }

    /// Drive both lines LOW.  Both writes are attempted even if the first fails.
    pub fn release(&mut self) -> Result<(), ActuatorError> {
        let a = self.in1.set_low();
        let b = self.in2.set_low();
        a.and(b).map_err(|_| ActuatorError::GpioWriteFailed)
    }
}

/// Scoped hold over one magnet's lines.
///
/// Created with both lines LOW; dropping it without [`finish`](Self::finish)
/// forces them LOW again.
struct DriveGuard<'a, P: OutputPin> {
    lines: &'a mut MagnetLines<P>,
    released: bool,
}

impl<'a, P: OutputPin> DriveGuard<'a, P> {
    fn engage(lines: &'a mut MagnetLines<P>) -> Result<Self, ActuatorError> {
        let mut guard = Self {
            lines,
            released: false,
        };
        guard.lines.release()?;
        Ok(guard)
    }

    fn drive(&mut self, direction: Direction) -> Result<(), ActuatorError> {
        let (low, high) = match direction {
            Direction::Retract => (&mut self.lines.in1, &mut self.lines.in2),
            Direction::Extend => (&mut self.lines.in2, &mut self.lines.in1),
        };
        low.set_low().map_err(|_| ActuatorError::GpioWriteFailed)?;
        high.set_high().map_err(|_| ActuatorError::GpioWriteFailed)
    }

    fn finish(mut self) -> Result<(), ActuatorError> {
        let result = self.lines.release();
        self.released = result.is_ok();
        result
    }
}

impl<P: OutputPin> Drop for DriveGuard<'_, P> {
    fn drop(&mut self) {
        if !self.released {
            let _ = self.lines.release();
        }
    }
}

/// Settle and pulse durations for one actuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseTiming {
    pub settle_ms: u32,
    pub pulse_ms: u32,
}

impl From<&SystemConfig> for PulseTiming {
    fn from(config: &SystemConfig) -> Self {
        Self {
            settle_ms: config.settle_ms,
            pulse_ms: config.pulse_ms,
        }
    }
}

/// All magnets on the board plus the delay used to time their pulses.
pub struct MagnetBank<P, D> {
    lines: [MagnetLines<P>; MAGNET_COUNT],
    delay: D,
    timing: PulseTiming,
}

impl<P: OutputPin, D: DelayNs> MagnetBank<P, D> {
    pub fn new(lines: [MagnetLines<P>; MAGNET_COUNT], delay: D, timing: PulseTiming) -> Self {
        Self {
            lines,
            delay,
            timing,
        }
    }

    /// Run one settle → pulse → release sequence.  Blocks for
    /// `settle_ms + pulse_ms`; both lines are LOW on return, error or not.
    pub fn actuate(&mut self, cmd: Command) -> Result<(), ActuatorError> {
        let lines = self
            .lines
            .get_mut(cmd.magnet.index())
            .ok_or(ActuatorError::UnknownMagnet(cmd.magnet.get()))?;

        let mut guard = DriveGuard::engage(lines)?;
        self.delay.delay_ms(self.timing.settle_ms);

        guard.drive(cmd.direction)?;
        self.delay.delay_ms(self.timing.pulse_ms);

        guard.finish()
    }

    /// Force every line LOW (startup / shutdown).
    pub fn release_all(&mut self) -> Result<(), ActuatorError> {
        self.lines
            .iter_mut()
            .map(MagnetLines::release)
            .fold(Ok(()), Result::and)
    }
}

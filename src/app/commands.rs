//! Validated actuation commands.
//!
//! A [`Command`] only exists after the dispatcher's range checks pass; it is
//! consumed immediately by the magnet sequencer and never queued.

use core::fmt;

use crate::pins::MAGNET_COUNT;

/// Index of one magnet in the bank, guaranteed `< MAGNET_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MagnetId(u8);

impl MagnetId {
    /// Every magnet on the board, in index order.
    pub fn all() -> impl Iterator<Item = MagnetId> {
        (0..MAGNET_COUNT as u8).map(MagnetId)
    }

    pub fn new(id: u8) -> Option<Self> {
        ((id as usize) < MAGNET_COUNT).then_some(Self(id))
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for MagnetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which way to throw the magnet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    /// Pull in (`in2` driven HIGH).
    Retract = 0,
    /// Push out (`in1` driven HIGH).
    Extend = 1,
}

impl Direction {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Retract),
            1 => Some(Self::Extend),
            _ => None,
        }
    }

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// A decoded, range-checked actuation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Command {
    pub magnet: MagnetId,
    pub direction: Direction,
}

impl Command {
    pub fn new(magnet: MagnetId, direction: Direction) -> Self {
        Self { magnet, direction }
    }

    pub fn retract(magnet: MagnetId) -> Self {
        Self::new(magnet, Direction::Retract)
    }

    pub fn extend(magnet: MagnetId) -> Self {
        Self::new(magnet, Direction::Extend)
    }
}

//! Command validation for completed frames.
//!
//! Checks run in wire order: headers, magnet ID, direction.  The header
//! check duplicates what the parser already guarantees and is kept so that
//! frames built by any other path are held to the same rules.

use crate::app::commands::{Command, Direction, MagnetId};
use crate::error::FrameError;

use super::{FIELD_OFFSET, Frame, HEADER1, HEADER2};

/// Turn a completed frame into a [`Command`], or explain why not.
pub fn decode(frame: &Frame) -> Result<Command, FrameError> {
    let (h1, h2) = frame.headers();
    if h1 != HEADER1 || h2 != HEADER2 {
        return Err(FrameError::BadHeader { h1, h2 });
    }

    let raw_id = frame.magnet_byte();
    let magnet = raw_id
        .checked_sub(FIELD_OFFSET)
        .and_then(MagnetId::new)
        .ok_or(FrameError::MagnetOutOfRange { raw: raw_id })?;

    let raw_dir = frame.direction_byte();
    let direction = raw_dir
        .checked_sub(FIELD_OFFSET)
        .and_then(Direction::from_code)
        .ok_or(FrameError::DirectionOutOfRange { raw: raw_dir })?;

    Ok(Command::new(magnet, direction))
}

//! Integration tests for frame resynchronization on the virtual timeline.
//!
//! The rig ticks once per millisecond, so `idle(n)` moves the clock by
//! exactly `n` ms and every byte is stamped with the tick that read it.

use magnetbank::app::commands::Direction;
use magnetbank::app::events::AppEvent;
use magnetbank::protocol::parser::ParserState;

use crate::mock_hw::Rig;

#[test]
fn stale_header_is_cleared() {
    let mut rig = Rig::new();
    rig.send(&[0xAA]);
    rig.idle(150);

    assert_eq!(rig.service.parser_state(), ParserState::Idle);
    assert!(rig.sink.events.contains(&AppEvent::FrameTimedOut { dropped: 1 }));

    rig.send(&[0x55, 0x0A, 0x0A]);
    assert!(rig.board.writes().is_empty());
    assert_eq!(rig.service.stats().resync_timeouts, 1);
}

#[test]
fn byte_exactly_at_timeout_still_counts() {
    let mut rig = Rig::new();
    rig.send(&[0xAA]); // read at t=0
    rig.idle(99); // now t=100

    rig.send(&[0x55, 0x0A, 0x0A]);
    assert_eq!(rig.sink.timeouts(), 0);
    assert_eq!(rig.board.pulses(), vec![(0, Direction::Retract)]);
}

#[test]
fn one_past_timeout_drops_the_frame() {
    let mut rig = Rig::new();
    rig.send(&[0xAA]);
    rig.idle(100); // now t=101

    rig.send(&[0x55, 0x0A, 0x0A]);
    assert_eq!(rig.sink.timeouts(), 1);
    assert!(rig.board.pulses().is_empty());
}

#[test]
fn second_header_pair_restarts_matching() {
    let mut rig = Rig::new();
    rig.send(&[0xAA, 0x55]);
    rig.idle(20);
    rig.send(&[0xAA, 0x55, 0x0A, 0x0A]);

    assert_eq!(rig.board.pulses(), vec![(0, Direction::Retract)]);
    let stats = rig.service.stats();
    assert_eq!(stats.frames_completed, 1);
    assert_eq!(stats.frames_rejected, 0);
    assert_eq!(stats.header_restarts, 1);
}

#[test]
fn slow_sender_within_timeout_is_accepted() {
    let mut rig = Rig::new();
    for byte in [0xAA, 0x55, 0x0C, 0x0B] {
        rig.send(&[byte]);
        rig.idle(89); // next byte 90 ms after this one
    }
    assert_eq!(rig.board.pulses(), vec![(2, Direction::Extend)]);
    assert_eq!(rig.sink.timeouts(), 0);
}

#[test]
fn stalled_payload_is_dropped_and_link_recovers() {
    let mut rig = Rig::new();
    rig.send(&[0xAA, 0x55, 0x0A]);
    rig.idle(200);
    assert!(rig.sink.events.contains(&AppEvent::FrameTimedOut { dropped: 3 }));

    // The late direction byte is noise; the next full frame works.
    rig.send(&[0x0B, 0xAA, 0x55, 0x0A, 0x0B]);
    assert_eq!(rig.board.pulses(), vec![(0, Direction::Extend)]);
    assert_eq!(rig.service.stats().noise_bytes, 1);
}

#[test]
fn frame_across_clock_wrap() {
    let mut rig = Rig::new();
    rig.board.set_time(u32::MAX - 1);
    rig.send(&[0xAA, 0x55, 0x0A, 0x0B]);

    assert_eq!(rig.sink.timeouts(), 0);
    assert_eq!(rig.board.pulses(), vec![(0, Direction::Extend)]);
}

#[test]
fn idle_parser_never_times_out() {
    let mut rig = Rig::new();
    rig.send(&[0xAA, 0x55, 0x0A, 0x0A]);
    rig.idle(1_000);
    assert_eq!(rig.sink.timeouts(), 0);
}

//! Fuzz target: `FrameParser::push` + `ResyncWatchdog::check`
//!
//! Reads the input as `(gap_ms, byte)` pairs and replays them against the
//! parser and resync watchdog the way the service loop does.  Asserts that
//! the buffer never exceeds one frame and that every command the
//! dispatcher accepts re-encodes to the exact bytes received.
//!
//! cargo fuzz run fuzz_frame_parser

#![no_main]

use libfuzzer_sys::fuzz_target;
use magnetbank::protocol::parser::{FrameParser, Step};
use magnetbank::protocol::resync::ResyncWatchdog;
use magnetbank::protocol::{FRAME_LEN, dispatch, encode};

fuzz_target!(|data: &[u8]| {
    let mut parser = FrameParser::new();
    let mut resync = ResyncWatchdog::new(100);
    let mut now: u32 = 0;

    for pair in data.chunks_exact(2) {
        now = now.wrapping_add(u32::from(pair[0]));
        let _ = resync.check(&mut parser, now);

        let step = parser.push(pair[1]);
        if step.stored() {
            resync.note_byte(now);
        }
        assert!(parser.buffered() < FRAME_LEN, "buffer must reset on completion");

        if let Step::Complete(frame) = step {
            if let Ok(cmd) = dispatch::decode(&frame) {
                assert_eq!(encode(cmd).bytes(), frame.bytes());
            }
        }
    }
});

//! Mock board for integration tests.
//!
//! Every output line, the delay and the clock share one [`MockBoard`], so
//! a test sees the full write history against a single virtual timeline
//! without touching real GPIO registers.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use magnetbank::app::commands::Direction;
use magnetbank::app::events::AppEvent;
use magnetbank::app::ports::{Clock, EventSink};
use magnetbank::app::service::MagnetService;
use magnetbank::config::SystemConfig;
use magnetbank::drivers::magnet::{MagnetBank, MagnetLines, PulseTiming};
use magnetbank::pins::{MAGNET_COUNT, OUTPUT_LINE_COUNT};
use magnetbank::protocol::transport::Transport;

// ── Shared board state ────────────────────────────────────────

/// One recorded line write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineWrite {
    /// Index into the output line table (`2k` = in1, `2k+1` = in2).
    pub line: usize,
    pub high: bool,
    pub at_ms: u32,
}

#[derive(Default)]
struct BoardState {
    now_ms: u32,
    levels: [bool; OUTPUT_LINE_COUNT],
    writes: Vec<LineWrite>,
    overlap_seen: bool,
}

#[derive(Clone, Default)]
pub struct MockBoard(Rc<RefCell<BoardState>>);

impl MockBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u32 {
        self.0.borrow().now_ms
    }

    pub fn set_time(&self, ms: u32) {
        self.0.borrow_mut().now_ms = ms;
    }

    pub fn advance(&self, ms: u32) {
        let mut s = self.0.borrow_mut();
        s.now_ms = s.now_ms.wrapping_add(ms);
    }

    pub fn writes(&self) -> Vec<LineWrite> {
        self.0.borrow().writes.clone()
    }

    pub fn clear_writes(&self) {
        self.0.borrow_mut().writes.clear();
    }

    /// Whether both lines of any pair were ever HIGH together.
    pub fn overlap_seen(&self) -> bool {
        self.0.borrow().overlap_seen
    }

    pub fn all_low(&self) -> bool {
        self.0.borrow().levels.iter().all(|high| !high)
    }

    /// Every HIGH write decoded as (magnet, direction), in order.
    pub fn pulses(&self) -> Vec<(u8, Direction)> {
        self.0
            .borrow()
            .writes
            .iter()
            .filter(|w| w.high)
            .map(|w| {
                let direction = if w.line % 2 == 0 {
                    Direction::Extend
                } else {
                    Direction::Retract
                };
                ((w.line / 2) as u8, direction)
            })
            .collect()
    }

    pub fn line(&self, line: usize) -> MockLine {
        MockLine {
            line,
            board: self.clone(),
        }
    }

    pub fn delay(&self) -> MockDelay {
        MockDelay(self.clone())
    }

    pub fn clock(&self) -> MockClock {
        MockClock(self.clone())
    }
}

// ── Output lines ──────────────────────────────────────────────

pub struct MockLine {
    line: usize,
    board: MockBoard,
}

impl MockLine {
    fn write(&mut self, high: bool) {
        let mut s = self.board.0.borrow_mut();
        s.levels[self.line] = high;
        if high && s.levels[self.line ^ 1] {
            s.overlap_seen = true;
        }
        let at_ms = s.now_ms;
        s.writes.push(LineWrite {
            line: self.line,
            high,
            at_ms,
        });
    }
}

impl ErrorType for MockLine {
    type Error = Infallible;
}

impl OutputPin for MockLine {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.write(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.write(true);
        Ok(())
    }
}

// ── Virtual time ──────────────────────────────────────────────

/// Delay that advances the board clock instead of sleeping.
pub struct MockDelay(MockBoard);

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.advance(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.advance(ms);
    }
}

pub struct MockClock(MockBoard);

impl Clock for MockClock {
    fn now_ms(&self) -> u32 {
        self.0.now_ms()
    }
}

// ── Transport ─────────────────────────────────────────────────

/// Byte source fed by the test.
#[derive(Default)]
pub struct ScriptedTransport {
    rx: VecDeque<u8>,
}

impl ScriptedTransport {
    pub fn send(&mut self, bytes: &[u8]) {
        self.rx.extend(bytes);
    }

    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

impl Transport for ScriptedTransport {
    type Error = Infallible;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Infallible> {
        let n = buf.len().min(self.rx.len());
        for (slot, byte) in buf.iter_mut().zip(self.rx.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    fn available(&self) -> bool {
        !self.rx.is_empty()
    }
}

/// A host that never stops sending: `pattern` repeats forever and a byte
/// is always waiting.
pub struct EndlessTransport {
    pattern: &'static [u8],
    next: usize,
}

impl EndlessTransport {
    pub fn repeating(pattern: &'static [u8]) -> Self {
        Self { pattern, next: 0 }
    }
}

impl Transport for EndlessTransport {
    type Error = Infallible;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Infallible> {
        for slot in buf.iter_mut() {
            *slot = self.pattern[self.next];
            self.next = (self.next + 1) % self.pattern.len();
        }
        Ok(buf.len())
    }

    fn available(&self) -> bool {
        true
    }
}

// ── Event sink ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeouts(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::FrameTimedOut { .. }))
            .count()
    }

    pub fn actuations(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AppEvent::Actuated(_)))
            .count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

// ── Harness ───────────────────────────────────────────────────

pub type MockService = MagnetService<MockLine, MockDelay>;

/// A started service wired to a fresh board.
pub struct Rig {
    pub board: MockBoard,
    pub service: MockService,
    pub link: ScriptedTransport,
    pub sink: RecordingSink,
    clock: MockClock,
}

impl Rig {
    pub fn new() -> Self {
        let config = SystemConfig::default();
        let board = MockBoard::new();
        let lines: [MagnetLines<MockLine>; MAGNET_COUNT] =
            core::array::from_fn(|k| MagnetLines::new(board.line(2 * k), board.line(2 * k + 1)));
        let bank = MagnetBank::new(lines, board.delay(), PulseTiming::from(&config));
        let mut service = MagnetService::new(config, bank);
        let mut sink = RecordingSink::new();
        service
            .start(&mut sink)
            .expect("mock lines never fail");
        // Startup release is not part of any scenario.
        board.clear_writes();
        sink.events.clear();

        Self {
            clock: board.clock(),
            board,
            service,
            link: ScriptedTransport::default(),
            sink,
        }
    }

    /// One single-byte scheduling step followed by the 1 ms loop yield.
    pub fn tick(&mut self) -> bool {
        let read = match self.service.poll(&mut self.link, &self.clock, &mut self.sink) {
            Ok(read) => read,
            Err(never) => match never {},
        };
        self.board.advance(1);
        read
    }

    /// One pass of the device loop against `link`: a bounded service tick,
    /// then the 1 ms yield.  Returns the bytes consumed.
    pub fn pass(&mut self, link: &mut impl Transport<Error = Infallible>) -> usize {
        let consumed = match self.service.tick(link, &self.clock, &mut self.sink) {
            Ok(n) => n,
            Err(never) => match never {},
        };
        self.board.advance(1);
        consumed
    }

    /// Tick until every queued byte has been consumed.
    pub fn drain(&mut self) {
        while self.link.pending() > 0 {
            self.tick();
        }
    }

    /// Queue `bytes` and run the loop until they are consumed.
    pub fn send(&mut self, bytes: &[u8]) {
        self.link.send(bytes);
        self.drain();
    }

    /// Let `ms` of idle loop time pass (one tick per millisecond).
    pub fn idle(&mut self, ms: u32) {
        for _ in 0..ms {
            self.tick();
        }
    }
}

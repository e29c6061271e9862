//! GPIO / peripheral pin assignments for the magnet driver board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.
//!
//! Each magnet is wired to an H-bridge with two logic inputs.  The GPIOs
//! are listed in board order in [`OUTPUT_GPIOS`]; magnet `k` owns the
//! consecutive pair at indices `2k` (`in1`) and `2k + 1` (`in2`).

// ---------------------------------------------------------------------------
// Magnet bank
// ---------------------------------------------------------------------------

/// Number of bistable magnets on the board.
pub const MAGNET_COUNT: usize = 9;

/// Number of digital output lines (two per magnet).
pub const OUTPUT_LINE_COUNT: usize = MAGNET_COUNT * 2;

/// Output GPIOs in board order.  Indices `2k` / `2k + 1` belong to magnet `k`.
pub const OUTPUT_GPIOS: [i32; OUTPUT_LINE_COUNT] = [
    4, 5, 13, 14, 15, 16, 17, 18, 19, 21, 22, 23, 25, 26, 27, 32, 33, 2,
];

/// The two output lines driving one magnet's H-bridge.
///
/// Both lines idle LOW.  Extend drives `in1` HIGH, retract drives `in2` HIGH;
/// the two are never HIGH together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinPair {
    pub in1: i32,
    pub in2: i32,
}

/// Static magnet → pin pair table, built from [`OUTPUT_GPIOS`].
pub const PIN_MAP: [PinPair; MAGNET_COUNT] = build_pin_map();

const fn build_pin_map() -> [PinPair; MAGNET_COUNT] {
    let mut map = [PinPair { in1: 0, in2: 0 }; MAGNET_COUNT];
    let mut k = 0;
    while k < MAGNET_COUNT {
        map[k] = PinPair {
            in1: OUTPUT_GPIOS[2 * k],
            in2: OUTPUT_GPIOS[2 * k + 1],
        };
        k += 1;
    }
    map
}

// ---------------------------------------------------------------------------
// UART0 (command stream + diagnostic console)
// ---------------------------------------------------------------------------

pub const UART_TX_GPIO: i32 = 1;
pub const UART_RX_GPIO: i32 = 3;

/// Serial link rate shared with the host-side sender.
pub const LINK_BAUD: u32 = 115_200;

//! Magnet bank firmware: main entry point.
//!
//! Hexagonal architecture with a single cooperative service loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  UartTransport     LogEventSink   Esp32TimeAdapter             │
//! │  (Transport)       (EventSink)    (Clock)                      │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              MagnetService (pure logic)                │    │
//! │  │  FrameParser · ResyncWatchdog · dispatch · MagnetBank  │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  GpioLine × 18 (OutputPin) · SystemDelay (DelayNs) · TWDT      │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result, anyhow};
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::peripherals::Peripherals;
use log::{info, warn};

use magnetbank::adapters::log_sink::LogEventSink;
use magnetbank::adapters::time::Esp32TimeAdapter;
use magnetbank::adapters::uart::UartTransport;
use magnetbank::app::ports::Clock;
use magnetbank::app::service::MagnetService;
use magnetbank::config::SystemConfig;
use magnetbank::diagnostics;
use magnetbank::drivers::delay::SystemDelay;
use magnetbank::drivers::gpio::GpioLine;
use magnetbank::drivers::hw_init;
use magnetbank::drivers::magnet::{MagnetBank, PulseTiming};
use magnetbank::drivers::watchdog::Watchdog;
use magnetbank::error::Error;

/// How often the link counters are logged when diagnostics are on.
const STATS_INTERVAL_MS: u32 = 60_000;

/// Configure the 18 magnet outputs and wrap them in the sequencer.
fn build_bank(config: &SystemConfig) -> magnetbank::error::Result<MagnetBank<GpioLine, SystemDelay>> {
    hw_init::init_magnet_outputs(config.diagnostics)?;
    Ok(MagnetBank::new(
        hw_init::magnet_lines(),
        SystemDelay::new(),
        PulseTiming::from(config),
    ))
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;
    diagnostics::install_panic_handler();

    // ── 2. Static configuration ───────────────────────────────
    let config = SystemConfig::default();
    config
        .validate()
        .map_err(|msg| anyhow!(Error::Config(msg)))?;

    diagnostics::log_banner(&config);
    if config.diagnostics {
        match config.to_json() {
            Ok(json) => info!("Config: {}", json),
            Err(e) => warn!("Config serialisation failed: {}", e),
        }
    }

    // ── 3. Magnet outputs (all LOW) ───────────────────────────
    let bank = build_bank(&config)?;

    // ── 4. Serial link ────────────────────────────────────────
    let peripherals = Peripherals::take().context("peripherals already taken")?;
    let mut uart = UartTransport::open(
        peripherals.uart0,
        peripherals.pins.gpio1,
        peripherals.pins.gpio3,
        config.baud_rate,
    )
    .map_err(Error::from)?;

    // ── 5. Service + adapters ─────────────────────────────────
    let clock = Esp32TimeAdapter::new();
    let mut sink = LogEventSink::new(config.diagnostics);
    let mut service = MagnetService::new(config.clone(), bank);
    service.start(&mut sink).map_err(Error::from)?;

    let watchdog = Watchdog::new(config.task_watchdog_ms);
    info!("Setup complete. Ready to receive commands...");

    // ── 6. Service loop ───────────────────────────────────────
    let mut last_stats_ms = clock.now_ms();
    loop {
        // Bounded per pass; a busy link must not starve the TWDT feed below.
        if let Err(e) = service.tick(&mut uart, &clock, &mut sink) {
            warn!("UART read failed: {}", e);
        }

        if config.diagnostics {
            let now = clock.now_ms();
            if now.wrapping_sub(last_stats_ms) >= STATS_INTERVAL_MS {
                info!("LINK  | {}", diagnostics::summary(&service.stats()));
                last_stats_ms = now;
            }
        }

        watchdog.feed();
        FreeRtos::delay_ms(config.loop_yield_ms);
    }
}

//! battpwr firmware entry point.
//!
//! Hexagonal layout: the power coordinator is pure logic behind port
//! traits; everything below talks to the board.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  Board (DisplaySink + RailController + DelayNs)                │
//! │    ├─ EpdDisplay ── Ssd1681 ── SPI2                            │
//! │    └─ BoardPower ── VBAT / EPD / AUX switch GPIOs              │
//! │  LogEventSink (EventSink)    ButtonEventGroup (EventSource)    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │        PowerCoordinator (pure logic, own task)         │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Tasks (core 1): coordinator · button poller · indicator LED   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use std::time::Duration;

use anyhow::Result;
use log::{error, info};

use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, Gpio8, Gpio9, Gpio10, Input, Output, PinDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::spi::config::Config as SpiConfig;
use esp_idf_hal::spi::{SpiDeviceDriver, SpiDriver, SpiDriverConfig};
use esp_idf_hal::units::FromValueType;

use battpwr::adapters::board::Board;
use battpwr::adapters::epd_display::EpdDisplay;
use battpwr::adapters::log_sink::LogEventSink;
use battpwr::app::coordinator::PowerCoordinator;
use battpwr::config::PowerConfig;
use battpwr::drivers::button::ButtonDriver;
use battpwr::drivers::hw_init;
use battpwr::drivers::indicator;
use battpwr::drivers::rails::BoardPower;
use battpwr::drivers::ssd1681::Ssd1681;
use battpwr::drivers::task_pin::{spawn_pinned, TaskSpec};
use battpwr::events::ButtonEventGroup;
use battpwr::pins;

/// Shared by the button poller (producer) and the coordinator (consumer).
static EVENTS: ButtonEventGroup = ButtonEventGroup::new();

type PanelSpi = SpiDeviceDriver<'static, SpiDriver<'static>>;
type Panel = EpdDisplay<
    PanelSpi,
    PinDriver<'static, Gpio10, Output>,
    PinDriver<'static, Gpio9, Output>,
    PinDriver<'static, Gpio8, Input>,
    FreeRtos,
>;
type FirmwareBoard = Board<Panel, FreeRtos>;

/// Everything `app_init` hands to `ui_init`.
struct App {
    config: PowerConfig,
    coordinator: PowerCoordinator,
    board: FirmwareBoard,
    sink: LogEventSink,
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  battpwr v{}                        ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let app = app_init()?;
    ui_init(app)?;

    info!("System ready. Tasks running.");
    Ok(())
}

/// Configuration, GPIO bring-up, rails on, panel init, button poller.
fn app_init() -> Result<App> {
    let config = PowerConfig::default();
    config.validate()?;

    let p = Peripherals::take()?;

    if let Err(e) = hw_init::init_rail_gpios() {
        error!("Rail GPIO init failed: {}; continuing", e);
    }

    // ── Panel on SPI2 ─────────────────────────────────────────
    let spi = SpiDriver::new(
        p.spi2,
        p.pins.gpio12,
        p.pins.gpio13,
        None::<AnyIOPin>,
        &SpiDriverConfig::new(),
    )?;
    let spi = SpiDeviceDriver::new(
        spi,
        Some(p.pins.gpio11),
        &SpiConfig::new().baudrate(pins::EPD_SPI_HZ.Hz()),
    )?;
    let epd = Ssd1681::new(
        spi,
        PinDriver::output(p.pins.gpio10)?,
        PinDriver::output(p.pins.gpio9)?,
        PinDriver::input(p.pins.gpio8)?,
        FreeRtos,
        config.busy_timeout_ms,
    );

    let mut board = Board::new(EpdDisplay::new(epd), BoardPower::new(), FreeRtos);
    let mut sink = LogEventSink::new();
    let mut coordinator = PowerCoordinator::new(&config);
    coordinator.bring_up(&mut board, &mut sink);

    // ── Button poller ─────────────────────────────────────────
    match hw_init::init_button_gpio() {
        Ok(()) => {
            let driver = ButtonDriver::new(&config);
            let period = Duration::from_millis(u64::from(config.button_poll_ms));
            spawn_pinned(TaskSpec::app("button\0", &config), move || {
                driver.run_poller(&EVENTS, period)
            })?;
        }
        Err(e) => error!("Button GPIO init failed: {}; no power-off gesture", e),
    }

    Ok(App {
        config,
        coordinator,
        board,
        sink,
    })
}

/// Initial screen, then the LED and coordinator tasks.
fn ui_init(app: App) -> Result<()> {
    let App {
        config,
        mut coordinator,
        mut board,
        mut sink,
    } = app;

    coordinator.start(&mut board, &mut sink);

    let half_period = Duration::from_millis(u64::from(config.led_half_period_ms));
    spawn_pinned(TaskSpec::app("led\0", &config), move || {
        indicator::run_led_task(half_period)
    })?;

    spawn_pinned(TaskSpec::app("power\0", &config), move || {
        coordinator.run(&EVENTS, board, sink)
    })?;

    Ok(())
}

//! SoilWatch Firmware — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareSensors  EpaperPanel  SerialConsole  BoardPower       │
//! │  (SensorPort)     (PanelPort)  (ConsolePort)  (PowerPort)      │
//! │                                              LogEventSink      │
//! │                                              (EventSink)       │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │  CycleScheduler                                        │    │
//! │  │  SensorGateway · Classifier · DisplayOrchestrator(FSM) │    │
//! │  │  Pacing (BusyDelay | LowPowerSleep)                    │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use embedded_graphics::prelude::Size;
use esp_idf_hal::delay::{Ets, FreeRtos};
use esp_idf_hal::gpio::{AnyIOPin, PinDriver, Pull};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::spi::config::Config as SpiConfig;
use esp_idf_hal::spi::{SpiDeviceDriver, SpiDriver, SpiDriverConfig};
use esp_idf_hal::units::FromValueType;
use log::info;

use soilwatch::adapters::console::SerialConsole;
use soilwatch::adapters::hardware::HardwareSensors;
use soilwatch::adapters::log_sink::LogEventSink;
use soilwatch::adapters::power::BoardPower;
use soilwatch::config::{CycleConfig, MAX_PLANTS};
use soilwatch::display::DisplayOrchestrator;
use soilwatch::drivers::epaper::EpaperPanel;
use soilwatch::drivers::hw_init;
use soilwatch::pins;
use soilwatch::power::Pacing;
use soilwatch::scheduler::CycleScheduler;
use soilwatch::sensors::SensorGateway;
use soilwatch::sensors::dht11::Dht11;
use soilwatch::sensors::moisture::MoistureProbes;

// ── Pin map ───────────────────────────────────────────────────

// esp-idf-hal hands out one typed field per GPIO; these tie the fields
// taken in `main` to the board map so the two cannot drift apart.
const _: () = {
    assert!(pins::DHT_DATA_GPIO == 2);
    assert!(pins::EPD_DC_GPIO == 4);
    assert!(pins::EPD_CS_GPIO == 5);
    assert!(pins::EPD_RESET_GPIO == 8);
    assert!(pins::EPD_BUSY_GPIO == 9);
    assert!(pins::SPI_MOSI_GPIO == 11);
    assert!(pins::SPI_SCLK_GPIO == 12);
};

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  SoilWatch v{}                    ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration (compiled in, validated before anything runs) ──
    let config = CycleConfig::from_json(include_str!("../config/plants.json"))?;
    let channels: heapless::Vec<u8, MAX_PLANTS> =
        config.plants.iter().filter_map(|p| p.channel).collect();

    // ── 3. Raw peripherals (ADC1, sensor rail, unused chip selects) ──
    hw_init::init_peripherals(&channels)?;

    // ── 4. Typed drivers ──────────────────────────────────────
    // GPIO fields below are checked against `soilwatch::pins` above.
    let peripherals = Peripherals::take()?;
    let io = peripherals.pins;

    let mut dht_pin = PinDriver::input_output_od(io.gpio2)?;
    dht_pin.set_pull(Pull::Up)?;
    dht_pin.set_high()?;
    let sensors = HardwareSensors::new(MoistureProbes::new(&channels), Dht11::new(dht_pin, Ets));

    let spi = SpiDriver::new(
        peripherals.spi2,
        io.gpio12,
        io.gpio11,
        Option::<AnyIOPin>::None,
        &SpiDriverConfig::new(),
    )?;
    let spi = SpiDeviceDriver::new(
        spi,
        Some(io.gpio5),
        &SpiConfig::new().baudrate(pins::EPD_SPI_HZ.Hz()),
    )?;
    let panel = EpaperPanel::new(
        spi,
        PinDriver::output(io.gpio4)?,
        PinDriver::output(io.gpio8)?,
        PinDriver::input(io.gpio9)?,
        FreeRtos,
        Size::new(config.geometry.canvas_width, config.geometry.canvas_height),
    );

    // ── 5. Core ───────────────────────────────────────────────
    let display = DisplayOrchestrator::new(&config, panel, SerialConsole::stdout(), FreeRtos)?;
    let pacing = Pacing::from_config(&config, BoardPower::new(pins::SENSOR_POWER_GPIO), FreeRtos);
    let mut scheduler = CycleScheduler::new(config, SensorGateway::new(sensors), display, pacing)?;

    let mut log_sink = LogEventSink::new();
    scheduler.start(&mut log_sink);

    info!("System ready. Entering cycle loop.");

    // ── 6. Cycle loop (never returns) ─────────────────────────
    scheduler.run(&mut log_sink)
}

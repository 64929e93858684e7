//! GPIO / peripheral pin assignments for the SoilWatch board.
//!
//! Single source of truth: `hw_init` drives its outputs from these
//! constants, and `main` asserts at compile time that the typed GPIO
//! fields it takes match them.
//!
//! Moisture probes are addressed by ADC1 *channel* (see the plant table),
//! not by GPIO.  On the ESP32-S3 ADC1 channel `n` is GPIO `n + 1`, so
//! channel 0 lands on GPIO 1, clear of everything below.

// ---------------------------------------------------------------------------
// Environment sensor
// ---------------------------------------------------------------------------

/// DHT11 single-wire data line (open drain, external pull-up).
pub const DHT_DATA_GPIO: i32 = 2;

// ---------------------------------------------------------------------------
// ePaper panel (SPI)
// ---------------------------------------------------------------------------

/// Panel BUSY output; LOW while the controller is working.
pub const EPD_BUSY_GPIO: i32 = 9;
/// Panel hardware reset, active LOW.
pub const EPD_RESET_GPIO: i32 = 8;
/// Panel chip select.
pub const EPD_CS_GPIO: i32 = 5;
/// Data / command select: LOW = command, HIGH = data.
pub const EPD_DC_GPIO: i32 = 4;

pub const SPI_SCLK_GPIO: i32 = 12;
pub const SPI_MOSI_GPIO: i32 = 11;

/// Panel SPI clock.
pub const EPD_SPI_HZ: u32 = 4_000_000;

// ---------------------------------------------------------------------------
// Unused devices sharing the SPI bus (held deselected)
// ---------------------------------------------------------------------------

/// SD-card slot on the display breakout.
pub const SD_CS_GPIO: i32 = 7;
/// SRAM frame buffer on the display breakout.
pub const SRAM_CS_GPIO: i32 = 6;

// ---------------------------------------------------------------------------
// Power
// ---------------------------------------------------------------------------

/// High-side switch for the probe and DHT11 supply; HIGH = powered.
pub const SENSOR_POWER_GPIO: i32 = 10;

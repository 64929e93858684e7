//! Port traits — the boundary between the cycle logic and the hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ SensorGateway / DisplayOrchestrator / Pacer
//! ```
//!
//! Driven adapters (probe ADC, DHT11, ePaper panel, serial console, board
//! power) implement these traits.  The core consumes them via generics or
//! `dyn` references, so it never touches a register directly and tests can
//! substitute scripted fakes.
//!
//! Waiting is not a port here: every blocking pause goes through
//! [`embedded_hal::delay::DelayNs`].

use crate::display::layout::Layout;
use crate::error::{DisplayError, PowerError, SensorError};
use crate::readings::{EnvironmentReading, Frame};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → core)
// ───────────────────────────────────────────────────────────────

/// The sensor driver boundary.  Each call triggers one hardware sample;
/// retries, if any, are the driver's business.
pub trait SensorPort {
    /// Sample the moisture probe on `channel`.
    fn sample(&mut self, channel: u8) -> Result<u16, SensorError>;

    /// Sample the ambient temperature/humidity sensor.
    fn sample_environment(&mut self) -> Result<EnvironmentReading, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Display ports (driven adapter: core → panel / console)
// ───────────────────────────────────────────────────────────────

/// The bistable panel boundary.
pub trait PanelPort {
    fn power_up(&mut self) -> Result<(), DisplayError>;

    fn power_down(&mut self) -> Result<(), DisplayError>;

    /// Paint a whole frame using the precomputed box layout.
    fn paint(&mut self, layout: &Layout, frame: &Frame) -> Result<(), DisplayError>;
}

/// The calibration text path.
pub trait ConsolePort {
    fn write_line(&mut self, line: &str) -> Result<(), DisplayError>;
}

// ───────────────────────────────────────────────────────────────
// Power port (driven adapter: core → board power)
// ───────────────────────────────────────────────────────────────

/// Board power control used by the low-power pacer.
pub trait PowerPort {
    /// Switch off peripherals that are not needed while asleep.
    fn suspend_peripherals(&mut self);

    /// Light-sleep the SoC for `duration_ms`, waking on a timer.
    fn light_sleep(&mut self, duration_ms: u32) -> Result<(), PowerError>;

    /// Restore what [`suspend_peripherals`](Self::suspend_peripherals) switched off.
    fn resume_peripherals(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: core → logging)
// ───────────────────────────────────────────────────────────────

/// The scheduler emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

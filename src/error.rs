//! Unified error types for the SoilWatch firmware.
//!
//! Each subsystem has its own small `Copy` error enum; the top-level
//! [`Error`] wraps them so `main` can funnel startup failures through a
//! single type.  None of these are fatal once the cycle loop is running:
//! sensor and display errors are carried as data and rendered.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not produce a reading.
    Sensor(SensorError),
    /// The panel or console rejected an operation.
    Display(DisplayError),
    /// Configuration is invalid and the loop must not start.
    Config(ConfigError),
    /// The platform refused a low-power request.
    Power(PowerError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Display(e) => write!(f, "display: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Power(e) => write!(f, "power: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The plant has no probe wired to a channel.
    NotConnected,
    /// ADC or GPIO read returned an error.
    ReadFailed,
    /// The sensor did not answer within its protocol window.
    Timeout,
    /// A digital sensor frame failed its checksum.
    Checksum,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => write!(f, "not connected"),
            Self::ReadFailed => write!(f, "read failed"),
            Self::Timeout => write!(f, "timeout"),
            Self::Checksum => write!(f, "checksum mismatch"),
        }
    }
}

impl std::error::Error for SensorError {}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Display errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// Panel did not come up after power-on.
    PowerUpFailed,
    /// Panel rejected or failed to complete a paint.
    PaintRejected,
    /// Panel did not acknowledge power-off.
    PowerDownFailed,
    /// SPI or control-pin transfer failed.
    Bus,
    /// BUSY line stayed asserted past the timeout.
    BusyTimeout,
    /// Console line could not be written.
    ConsoleWrite,
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PowerUpFailed => write!(f, "panel power-up failed"),
            Self::PaintRejected => write!(f, "panel rejected paint"),
            Self::PowerDownFailed => write!(f, "panel power-down failed"),
            Self::Bus => write!(f, "panel bus error"),
            Self::BusyTimeout => write!(f, "panel busy timeout"),
            Self::ConsoleWrite => write!(f, "console write failed"),
        }
    }
}

impl std::error::Error for DisplayError {}

impl From<DisplayError> for Error {
    fn from(e: DisplayError) -> Self {
        Self::Display(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Rejections raised while loading or validating [`CycleConfig`](crate::config::CycleConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The plant table has no entries.
    EmptyPlantTable,
    /// More plants than [`MAX_PLANTS`](crate::config::MAX_PLANTS).
    TooManyPlants(usize),
    /// A plant name is empty.
    EmptyName,
    /// A plant name does not fit [`MAX_NAME_LEN`](crate::config::MAX_NAME_LEN).
    NameTooLong,
    /// Two plants share one sensor channel.
    DuplicateChannel(u8),
    /// Calibration bounds with `min >= max`.
    InvalidCalibration { min: i32, max: i32 },
    /// Watering threshold outside `[0, 100]` or not finite.
    ThresholdOutOfRange,
    /// Refresh interval of zero would spin the loop.
    ZeroRefreshInterval,
    /// Geometry has a zero dimension or the boxes overflow the canvas.
    LayoutOverflow,
    /// The configuration document could not be parsed.
    Malformed,
    /// The display was built for a different plant table or run mode.
    DisplayMismatch,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPlantTable => write!(f, "plant table is empty"),
            Self::TooManyPlants(n) => write!(f, "{n} plants configured, too many"),
            Self::EmptyName => write!(f, "plant name is empty"),
            Self::NameTooLong => write!(f, "plant name too long"),
            Self::DuplicateChannel(ch) => write!(f, "channel {ch} assigned twice"),
            Self::InvalidCalibration { min, max } => {
                write!(f, "calibration min {min} must be below max {max}")
            }
            Self::ThresholdOutOfRange => write!(f, "watering threshold outside 0..=100"),
            Self::ZeroRefreshInterval => write!(f, "refresh interval must be non-zero"),
            Self::LayoutOverflow => write!(f, "display layout does not fit the canvas"),
            Self::Malformed => write!(f, "malformed configuration document"),
            Self::DisplayMismatch => write!(f, "display was built from another configuration"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Power errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerError {
    /// The platform refused to enter light sleep (ESP-IDF return code).
    SleepRejected(i32),
}

impl fmt::Display for PowerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SleepRejected(rc) => write!(f, "light sleep rejected (rc={rc})"),
        }
    }
}

impl std::error::Error for PowerError {}

impl From<PowerError> for Error {
    fn from(e: PowerError) -> Self {
        Self::Power(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;

//! Cycle configuration.
//!
//! All tunable parameters for the monitor.  The table is loaded once at
//! startup (from the JSON document compiled into the image) and validated
//! before the cycle loop begins; nothing here changes while running.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Upper bound on the plant table (sizes every per-cycle buffer).
pub const MAX_PLANTS: usize = 8;

/// Longest plant name, in bytes.
pub const MAX_NAME_LEN: usize = 24;

pub type PlantName = heapless::String<MAX_NAME_LEN>;

/// One row of the plant table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlantConfig {
    pub name: PlantName,
    /// ADC channel of the moisture probe; `None` when no probe is wired.
    pub channel: Option<u8>,
}

impl PlantConfig {
    pub fn new(name: &str, channel: Option<u8>) -> Result<Self, ConfigError> {
        let mut bounded = PlantName::new();
        bounded
            .push_str(name)
            .map_err(|()| ConfigError::NameTooLong)?;
        Ok(Self {
            name: bounded,
            channel,
        })
    }
}

/// Raw-reading bounds: `min` is fully saturated soil, `max` is dry soil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Calibration {
    pub min: i32,
    pub max: i32,
}

impl Default for Calibration {
    fn default() -> Self {
        // 175 is the theoretical floor (probe dipped in water); 275 is
        // what fully saturated succulent soil actually reads.
        Self { min: 275, max: 1023 }
    }
}

/// Which render path the display orchestrator takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Slow ePaper render with warmup and cooldown.
    #[default]
    Full,
    /// Fast text dump on the serial console only.
    Calibrate,
}

/// How the scheduler spends the refresh interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepStrategy {
    /// Block with everything powered.
    #[default]
    BusyDelay,
    /// Power down peripherals and light-sleep the SoC.
    LowPowerSleep,
}

/// Panel canvas and plant box geometry, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayGeometry {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub box_width: u32,
    pub box_height: u32,
    /// Gap between boxes and from the canvas edge.
    pub box_offset: u32,
}

impl Default for DisplayGeometry {
    fn default() -> Self {
        Self {
            canvas_width: 640,
            canvas_height: 385,
            box_width: 200,
            box_height: 45,
            box_offset: 20,
        }
    }
}

/// Complete cycle configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CycleConfig {
    // --- Plants ---
    /// Plant table, sampled and rendered in this order.
    pub plants: heapless::Vec<PlantConfig, MAX_PLANTS>,

    // --- Classification ---
    #[serde(default)]
    pub calibration: Calibration,
    /// Moisture percentage strictly below which a plant needs water.
    #[serde(default = "default_threshold_pct")]
    pub watering_threshold_pct: f32,

    // --- Display timing ---
    /// Settle time after powering the panel, before painting.
    #[serde(default = "default_settle_ms")]
    pub warmup_ms: u32,
    /// Settle time after painting, before powering the panel down.
    #[serde(default = "default_settle_ms")]
    pub cooldown_ms: u32,

    // --- Pacing ---
    /// Pause between cycles.  Required: there is no built-in cadence.
    pub refresh_interval_ms: u32,
    /// Wait after waking from low-power sleep before the first read.
    #[serde(default = "default_wake_settle_ms")]
    pub wake_settle_ms: u32,

    // --- Modes ---
    #[serde(default)]
    pub run_mode: RunMode,
    #[serde(default)]
    pub sleep_strategy: SleepStrategy,

    #[serde(default)]
    pub geometry: DisplayGeometry,
}

fn default_threshold_pct() -> f32 {
    15.0
}

fn default_settle_ms() -> u32 {
    1000
}

fn default_wake_settle_ms() -> u32 {
    200
}

impl CycleConfig {
    /// Build a validated configuration with the stock tuning constants.
    pub fn new(plants: &[PlantConfig], refresh_interval_ms: u32) -> Result<Self, ConfigError> {
        let plants = heapless::Vec::from_slice(plants)
            .map_err(|()| ConfigError::TooManyPlants(plants.len()))?;
        let config = Self {
            plants,
            calibration: Calibration::default(),
            watering_threshold_pct: default_threshold_pct(),
            warmup_ms: default_settle_ms(),
            cooldown_ms: default_settle_ms(),
            refresh_interval_ms,
            wake_settle_ms: default_wake_settle_ms(),
            run_mode: RunMode::default(),
            sleep_strategy: SleepStrategy::default(),
            geometry: DisplayGeometry::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(doc: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(doc).map_err(|e| {
            warn!("Config parse failed: {}", e);
            ConfigError::Malformed
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reject anything that cannot be handled safely per reading.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.plants.is_empty() {
            return Err(ConfigError::EmptyPlantTable);
        }

        let mut seen: heapless::Vec<u8, MAX_PLANTS> = heapless::Vec::new();
        for plant in &self.plants {
            if plant.name.trim().is_empty() {
                return Err(ConfigError::EmptyName);
            }
            if let Some(ch) = plant.channel {
                if seen.contains(&ch) {
                    return Err(ConfigError::DuplicateChannel(ch));
                }
                // Capacity equals MAX_PLANTS, which bounds the table.
                let _ = seen.push(ch);
            }
        }

        let Calibration { min, max } = self.calibration;
        if min >= max {
            return Err(ConfigError::InvalidCalibration { min, max });
        }

        let t = self.watering_threshold_pct;
        if !t.is_finite() || !(0.0..=100.0).contains(&t) {
            return Err(ConfigError::ThresholdOutOfRange);
        }

        if self.refresh_interval_ms == 0 {
            return Err(ConfigError::ZeroRefreshInterval);
        }

        crate::display::layout::Layout::compute(&self.geometry, self.plants.len())?;

        Ok(())
    }
}

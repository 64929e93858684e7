//! Per-cycle reading types.
//!
//! Everything here is rebuilt every cycle and dropped once the frame has
//! been rendered.  Nothing survives into the next cycle.

use crate::config::{MAX_PLANTS, PlantName};
use crate::error::SensorError;

/// Classified moisture for one plant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlantReading {
    /// Soil moisture in `[0, 100]`; higher is wetter.
    pub moisture_pct: f32,
    pub needs_water: bool,
}

/// Ambient conditions, sampled once per cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentReading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

/// Outcome of sampling one plant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlantStatus {
    /// Probe answered; `raw` is kept for the calibration console.
    Measured { raw: i32, reading: PlantReading },
    /// Probe missing or faulty this cycle.
    Unavailable(SensorError),
}

impl PlantStatus {
    pub fn reading(&self) -> Option<&PlantReading> {
        match self {
            Self::Measured { reading, .. } => Some(reading),
            Self::Unavailable(_) => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Measured { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlantRow {
    pub name: PlantName,
    pub status: PlantStatus,
}

/// Everything one render needs: the plant rows in table order plus the
/// environment reading.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub cycle: u32,
    pub rows: heapless::Vec<PlantRow, MAX_PLANTS>,
    pub environment: Result<EnvironmentReading, SensorError>,
}

impl Frame {
    pub fn new(cycle: u32, environment: Result<EnvironmentReading, SensorError>) -> Self {
        Self {
            cycle,
            rows: heapless::Vec::new(),
            environment,
        }
    }

    pub fn unavailable_count(&self) -> usize {
        self.rows.iter().filter(|r| !r.status.is_available()).count()
    }

    pub fn thirsty_count(&self) -> usize {
        self.rows
            .iter()
            .filter_map(|r| r.status.reading())
            .filter(|r| r.needs_water)
            .count()
    }
}

//! Raw probe reading → moisture percentage.
//!
//! Capacitive probes read *lower* the wetter the soil is, so the mapping
//! is inverted: the calibration `min` is 100 % and `max` is 0 %.  Values
//! outside the bounds are clamped, never rejected.

use crate::config::Calibration;
use crate::readings::PlantReading;

/// Classify one raw reading.  Pure; defined for every `raw`.
pub fn classify(raw: i32, calibration: Calibration, threshold_pct: f32) -> PlantReading {
    let moisture_pct = moisture_pct(raw, calibration);
    PlantReading {
        moisture_pct,
        needs_water: needs_water(moisture_pct, threshold_pct),
    }
}

/// Linear, inverted, clamped to `[0, 100]`.
pub fn moisture_pct(raw: i32, calibration: Calibration) -> f32 {
    let Calibration { min, max } = calibration;
    // Also covers min >= max without dividing by a zero or negative span.
    if raw <= min {
        return 100.0;
    }
    if raw >= max {
        return 0.0;
    }
    let span = (i64::from(max) - i64::from(min)) as f32;
    let dryness = (i64::from(max) - i64::from(raw)) as f32;
    (100.0 * dryness / span).clamp(0.0, 100.0)
}

/// Strictly below the threshold; equal is still fine.
pub fn needs_water(moisture_pct: f32, threshold_pct: f32) -> bool {
    moisture_pct < threshold_pct
}

//! Calibration console lines.
//!
//! ```text
//! --- cycle 3 ---
//! <SUBJECT X>: raw=900 moisture=16.4% OK
//! Atlas: unavailable (not connected)
//! environment: 21.5C 40.0%RH
//! ```

use core::fmt::Write;

use crate::error::SensorError;
use crate::readings::{EnvironmentReading, PlantRow, PlantStatus};

/// Longest console line; plant names are bounded so this always fits.
pub const LINE_CAPACITY: usize = 80;

pub type Line = heapless::String<LINE_CAPACITY>;

const ENVIRONMENT_NA: &str = "environment: n/a";

pub fn header_line(cycle: u32) -> Line {
    let mut line = Line::new();
    let _ = write!(line, "--- cycle {} ---", cycle);
    line
}

pub fn plant_line(row: &PlantRow) -> Line {
    let mut line = Line::new();
    let written = match row.status {
        PlantStatus::Measured { raw, reading } => write!(
            line,
            "{}: raw={} moisture={:.1}% {}",
            row.name,
            raw,
            reading.moisture_pct,
            if reading.needs_water { "NEEDS WATER" } else { "OK" }
        ),
        PlantStatus::Unavailable(e) => write!(line, "{}: unavailable ({})", row.name, e),
    };
    if written.is_err() {
        line.clear();
        // Name is bounded to 24 bytes, so this always fits.
        let _ = write!(line, "{}: n/a", row.name);
    }
    line
}

pub fn environment_line(environment: &Result<EnvironmentReading, SensorError>) -> Line {
    let mut line = Line::new();
    let written = match environment {
        Ok(env) => write!(
            line,
            "environment: {:.1}C {:.1}%RH",
            env.temperature_c, env.humidity_pct
        ),
        Err(e) => write!(line, "environment: unavailable ({})", e),
    };
    if written.is_err() {
        line.clear();
        let _ = line.push_str(ENVIRONMENT_NA);
    }
    line
}

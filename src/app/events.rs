//! Outbound application events.
//!
//! The [`CycleScheduler`](crate::scheduler::CycleScheduler) emits these
//! through the [`EventSink`](super::ports::EventSink) port.

use crate::config::{PlantName, RunMode, SleepStrategy};
use crate::error::{DisplayError, SensorError};

/// Structured events emitted by the cycle loop.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The loop is about to run its first cycle.
    Started {
        plants: usize,
        run_mode: RunMode,
        sleep_strategy: SleepStrategy,
    },

    /// A plant's probe produced no reading this cycle.
    PlantUnavailable {
        cycle: u32,
        name: PlantName,
        error: SensorError,
    },

    /// The environment sensor produced no reading this cycle.
    EnvironmentUnavailable { cycle: u32, error: SensorError },

    /// The display rejected this cycle's render.
    RenderFailed { cycle: u32, error: DisplayError },

    /// Steps 1–4 of a cycle are done.
    CycleCompleted(CycleReport),

    /// The loop is about to pause.
    Sleeping {
        strategy: SleepStrategy,
        interval_ms: u32,
    },
}

/// Summary of one cycle, suitable for logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleReport {
    pub cycle: u32,
    pub measured: usize,
    pub unavailable: usize,
    pub thirsty: usize,
    pub environment_ok: bool,
    pub render: Result<(), DisplayError>,
}

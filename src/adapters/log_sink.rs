//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC in production, stderr on the host).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started {
                plants,
                run_mode,
                sleep_strategy,
            } => {
                info!(
                    "START | plants={} | mode={:?} | sleep={:?}",
                    plants, run_mode, sleep_strategy
                );
            }
            AppEvent::PlantUnavailable { cycle, name, error } => {
                warn!("SENSOR | cycle={} | plant='{}' unavailable: {}", cycle, name, error);
            }
            AppEvent::EnvironmentUnavailable { cycle, error } => {
                warn!("SENSOR | cycle={} | environment unavailable: {}", cycle, error);
            }
            AppEvent::RenderFailed { cycle, error } => {
                warn!("RENDER | cycle={} | failed: {}", cycle, error);
            }
            AppEvent::CycleCompleted(r) => {
                info!(
                    "CYCLE | #{} | measured={} unavailable={} thirsty={} | env={} | render={}",
                    r.cycle,
                    r.measured,
                    r.unavailable,
                    r.thirsty,
                    if r.environment_ok { "OK" } else { "N/A" },
                    if r.render.is_ok() { "OK" } else { "FAILED" },
                );
            }
            AppEvent::Sleeping {
                strategy,
                interval_ms,
            } => {
                info!("SLEEP | {:?} for {} ms", strategy, interval_ms);
            }
        }
    }
}

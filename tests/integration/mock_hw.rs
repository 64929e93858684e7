//! Mock hardware adapters for integration tests.
//!
//! Every mock appends to one shared [`Journal`] so tests can assert on the
//! interleaving of sensor reads, panel calls, waits and sleeps across the
//! whole cycle without touching real peripherals.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use soilwatch::app::events::AppEvent;
use soilwatch::app::ports::{ConsolePort, EventSink, PanelPort, PowerPort, SensorPort};
use soilwatch::display::layout::Layout;
use soilwatch::error::{DisplayError, PowerError, SensorError};
use soilwatch::readings::{EnvironmentReading, Frame};

// ── Call record ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Sample(u8),
    SampleEnvironment,
    PowerUp,
    Paint { cycle: u32, rows: usize },
    PowerDown,
    Line(String),
    Wait(u32),
    Suspend,
    Sleep(u32),
    Resume,
}

#[derive(Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Call>>>);

#[allow(dead_code)]
impl Journal {
    pub fn push(&self, call: Call) {
        self.0.borrow_mut().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Only the panel-facing calls, in order.
    pub fn panel_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::PowerUp | Call::Paint { .. } | Call::PowerDown))
            .collect()
    }

    pub fn lines(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Line(l) => Some(l),
                _ => None,
            })
            .collect()
    }

    pub fn position(&self, wanted: &Call) -> Option<usize> {
        self.0.borrow().iter().position(|c| c == wanted)
    }
}

// ── MockSensors ───────────────────────────────────────────────

/// Scripted probe values per channel; missing channels are unavailable.
pub struct MockSensors {
    journal: Journal,
    pub raw: HashMap<u8, Result<u16, SensorError>>,
    pub environment: Result<EnvironmentReading, SensorError>,
}

#[allow(dead_code)]
impl MockSensors {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            raw: HashMap::new(),
            environment: Ok(EnvironmentReading {
                temperature_c: 21.5,
                humidity_pct: 40.0,
            }),
        }
    }

    pub fn with_raw(mut self, channel: u8, raw: u16) -> Self {
        self.raw.insert(channel, Ok(raw));
        self
    }

    pub fn with_fault(mut self, channel: u8, error: SensorError) -> Self {
        self.raw.insert(channel, Err(error));
        self
    }

    pub fn with_environment(mut self, env: Result<EnvironmentReading, SensorError>) -> Self {
        self.environment = env;
        self
    }
}

impl SensorPort for MockSensors {
    fn sample(&mut self, channel: u8) -> Result<u16, SensorError> {
        self.journal.push(Call::Sample(channel));
        self.raw
            .get(&channel)
            .copied()
            .unwrap_or(Err(SensorError::ReadFailed))
    }

    fn sample_environment(&mut self) -> Result<EnvironmentReading, SensorError> {
        self.journal.push(Call::SampleEnvironment);
        self.environment
    }
}

// ── MockPanel ─────────────────────────────────────────────────

pub struct MockPanel {
    journal: Journal,
    pub fail_power_up: bool,
    /// Cycles whose paint should be rejected.
    pub reject_paint_on: Vec<u32>,
    pub powered: bool,
}

impl MockPanel {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            fail_power_up: false,
            reject_paint_on: Vec::new(),
            powered: false,
        }
    }
}

impl PanelPort for MockPanel {
    fn power_up(&mut self) -> Result<(), DisplayError> {
        self.journal.push(Call::PowerUp);
        if self.fail_power_up {
            return Err(DisplayError::PowerUpFailed);
        }
        self.powered = true;
        Ok(())
    }

    fn power_down(&mut self) -> Result<(), DisplayError> {
        self.journal.push(Call::PowerDown);
        self.powered = false;
        Ok(())
    }

    fn paint(&mut self, _layout: &Layout, frame: &Frame) -> Result<(), DisplayError> {
        self.journal.push(Call::Paint {
            cycle: frame.cycle,
            rows: frame.rows.len(),
        });
        if !self.powered || self.reject_paint_on.contains(&frame.cycle) {
            return Err(DisplayError::PaintRejected);
        }
        Ok(())
    }
}

// ── MockConsole ───────────────────────────────────────────────

pub struct MockConsole {
    journal: Journal,
}

impl MockConsole {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
        }
    }
}

impl ConsolePort for MockConsole {
    fn write_line(&mut self, line: &str) -> Result<(), DisplayError> {
        self.journal.push(Call::Line(line.to_string()));
        Ok(())
    }
}

// ── MockDelay ─────────────────────────────────────────────────

/// Zero-cost delay; only millisecond waits are journalled.
pub struct MockDelay {
    journal: Journal,
}

impl MockDelay {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
        }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}

    fn delay_ms(&mut self, ms: u32) {
        self.journal.push(Call::Wait(ms));
    }
}

// ── MockPower ─────────────────────────────────────────────────

pub struct MockPower {
    journal: Journal,
    pub reject_sleep: bool,
}

impl MockPower {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            reject_sleep: false,
        }
    }
}

impl PowerPort for MockPower {
    fn suspend_peripherals(&mut self) {
        self.journal.push(Call::Suspend);
    }

    fn light_sleep(&mut self, duration_ms: u32) -> Result<(), PowerError> {
        self.journal.push(Call::Sleep(duration_ms));
        if self.reject_sleep {
            Err(PowerError::SleepRejected(-1))
        } else {
            Ok(())
        }
    }

    fn resume_peripherals(&mut self) {
        self.journal.push(Call::Resume);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

//! Cycle scheduler — the top-level loop.
//!
//! ```text
//!            ┌─────────────── one cycle ───────────────┐
//!  sample ──▶ classify ──▶ render ──▶ report ──▶ pace ──┘
//!  (all plants, then environment)
//! ```
//!
//! [`CycleScheduler`] owns the gateway, the orchestrator and the pacer,
//! all built by the caller and handed over at construction.  Sensor and
//! display failures are carried as data inside the cycle; none of them
//! stops the loop.

use embedded_hal::delay::DelayNs;
use log::{debug, info, warn};

use crate::app::events::{AppEvent, CycleReport};
use crate::app::ports::{ConsolePort, EventSink, PanelPort, SensorPort};
use crate::classifier::classify;
use crate::config::{CycleConfig, MAX_PLANTS};
use crate::display::DisplayOrchestrator;
use crate::display::layout::Layout;
use crate::error::{ConfigError, Result, SensorError};
use crate::power::Pacer;
use crate::readings::{Frame, PlantRow, PlantStatus};
use crate::sensors::SensorGateway;

// ───────────────────────────────────────────────────────────────
// CycleScheduler
// ───────────────────────────────────────────────────────────────

pub struct CycleScheduler<S, P, C, D, W> {
    config: CycleConfig,
    gateway: SensorGateway<S>,
    display: DisplayOrchestrator<P, C, D>,
    pacer: W,
    cycle_count: u32,
}

impl<S, P, C, D, W> CycleScheduler<S, P, C, D, W>
where
    S: SensorPort,
    P: PanelPort,
    C: ConsolePort,
    D: DelayNs,
    W: Pacer,
{
    /// Validates `config` once more and checks that `display` was built
    /// from it; the loop never starts on a bad table.
    pub fn new(
        config: CycleConfig,
        gateway: SensorGateway<S>,
        display: DisplayOrchestrator<P, C, D>,
        pacer: W,
    ) -> Result<Self> {
        config.validate()?;
        let layout = Layout::compute(&config.geometry, config.plants.len())?;
        if *display.layout() != layout || display.mode() != config.run_mode {
            warn!(
                "Scheduler: display has {} boxes in {:?} mode, config wants {} in {:?}",
                display.layout().plant_boxes().len(),
                display.mode(),
                config.plants.len(),
                config.run_mode
            );
            return Err(ConfigError::DisplayMismatch.into());
        }
        Ok(Self {
            config,
            gateway,
            display,
            pacer,
            cycle_count: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&self, sink: &mut impl EventSink) {
        info!(
            "Scheduler: {} plants, {:?} render, {:?} pacing every {} ms",
            self.config.plants.len(),
            self.display.mode(),
            self.pacer.strategy(),
            self.config.refresh_interval_ms
        );
        sink.emit(&AppEvent::Started {
            plants: self.config.plants.len(),
            run_mode: self.display.mode(),
            sleep_strategy: self.pacer.strategy(),
        });
    }

    /// Run forever.
    pub fn run(&mut self, sink: &mut impl EventSink) -> ! {
        loop {
            self.step(sink);
        }
    }

    /// One full iteration: a cycle followed by the pause.
    pub fn step(&mut self, sink: &mut impl EventSink) -> CycleReport {
        let report = self.run_cycle(sink);
        self.pace(sink);
        report
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Sample, classify and render one cycle.
    pub fn run_cycle(&mut self, sink: &mut impl EventSink) -> CycleReport {
        self.cycle_count = self.cycle_count.wrapping_add(1);
        let cycle = self.cycle_count;
        debug!("Scheduler: cycle {} begins", cycle);

        // 1. Every plant, in table order.
        let mut raws: heapless::Vec<core::result::Result<i32, SensorError>, MAX_PLANTS> =
            heapless::Vec::new();
        for plant in &self.config.plants {
            // Capacity equals the plant table bound.
            let _ = raws.push(self.gateway.read_plant(plant));
        }

        // 2. Environment, once.
        let environment = self.gateway.read_environment();

        // 3. Classify the whole set before anything is rendered.
        let mut frame = Frame::new(cycle, environment);
        for (plant, raw) in self.config.plants.iter().zip(raws) {
            let status = match raw {
                Ok(raw) => PlantStatus::Measured {
                    raw,
                    reading: classify(
                        raw,
                        self.config.calibration,
                        self.config.watering_threshold_pct,
                    ),
                },
                Err(error) => {
                    sink.emit(&AppEvent::PlantUnavailable {
                        cycle,
                        name: plant.name.clone(),
                        error,
                    });
                    PlantStatus::Unavailable(error)
                }
            };
            let _ = frame.rows.push(PlantRow {
                name: plant.name.clone(),
                status,
            });
        }
        if let Err(error) = environment {
            sink.emit(&AppEvent::EnvironmentUnavailable { cycle, error });
        }

        // 4. Render.
        let render = self.display.render(&frame);
        if let Err(error) = render {
            warn!("Scheduler: cycle {} render failed: {}", cycle, error);
            sink.emit(&AppEvent::RenderFailed { cycle, error });
        }

        let report = CycleReport {
            cycle,
            measured: frame.rows.len() - frame.unavailable_count(),
            unavailable: frame.unavailable_count(),
            thirsty: frame.thirsty_count(),
            environment_ok: environment.is_ok(),
            render,
        };
        sink.emit(&AppEvent::CycleCompleted(report));
        report
    }

    /// 5. Wait out the refresh interval.
    pub fn pace(&mut self, sink: &mut impl EventSink) {
        let interval_ms = self.config.refresh_interval_ms;
        sink.emit(&AppEvent::Sleeping {
            strategy: self.pacer.strategy(),
            interval_ms,
        });
        self.pacer.pause(interval_ms);
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn cycle_count(&self) -> u32 {
        self.cycle_count
    }

    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    pub fn gateway(&self) -> &SensorGateway<S> {
        &self.gateway
    }

    pub fn display(&self) -> &DisplayOrchestrator<P, C, D> {
        &self.display
    }

    pub fn pacer(&self) -> &W {
        &self.pacer
    }
}

//! Display orchestration.
//!
//! [`DisplayOrchestrator`] owns the panel, the console and the delay
//! provider, and sequences each render through the [`Fsm`] with the
//! table of the configured run mode.

pub mod canvas;
pub mod layout;
pub mod text;

use embedded_hal::delay::DelayNs;
use log::info;

use crate::app::ports::{ConsolePort, PanelPort};
use crate::config::{CycleConfig, RunMode};
use crate::error::{ConfigError, DisplayError};
use crate::fsm::context::{PhaseTiming, RenderContext};
use crate::fsm::states::strategy_for;
use crate::fsm::{DisplayState, Fsm};
use crate::readings::Frame;
use layout::Layout;

pub struct DisplayOrchestrator<P, C, D> {
    panel: P,
    console: C,
    delay: D,
    fsm: Fsm,
    mode: RunMode,
    layout: Layout,
    timing: PhaseTiming,
}

impl<P, C, D> DisplayOrchestrator<P, C, D>
where
    P: PanelPort,
    C: ConsolePort,
    D: DelayNs,
{
    pub fn new(config: &CycleConfig, panel: P, console: C, delay: D) -> Result<Self, ConfigError> {
        let layout = Layout::compute(&config.geometry, config.plants.len())?;
        let strategy = strategy_for(config.run_mode);
        info!(
            "Display: {:?} mode, {} boxes on {}x{} canvas",
            strategy.mode(),
            layout.plant_boxes().len(),
            layout.canvas().width,
            layout.canvas().height
        );

        Ok(Self {
            panel,
            console,
            delay,
            fsm: Fsm::new(strategy.state_table()),
            mode: config.run_mode,
            layout,
            timing: PhaseTiming {
                warmup_ms: config.warmup_ms,
                cooldown_ms: config.cooldown_ms,
            },
        })
    }

    /// Render one frame.  Failures are returned once; nothing is retried.
    pub fn render(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        let mut ctx = RenderContext::new(
            &mut self.panel,
            &mut self.console,
            &mut self.delay,
            &self.layout,
            frame,
            self.timing,
        );
        self.fsm.run(&mut ctx)
    }

    pub fn state(&self) -> DisplayState {
        self.fsm.current_state()
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn console(&self) -> &C {
        &self.console
    }
}

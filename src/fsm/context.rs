//! Shared mutable context threaded through every render-phase handler.
//!
//! `RenderContext` borrows the panel, console and delay handles from the
//! orchestrator for the duration of one render, together with the frame
//! being rendered.  Handlers record the first hardware failure in
//! [`fault`](RenderContext::fault); later phases consult it.

use embedded_hal::delay::DelayNs;

use crate::app::ports::{ConsolePort, PanelPort};
use crate::display::layout::Layout;
use crate::error::DisplayError;
use crate::readings::Frame;

// ---------------------------------------------------------------------------
// Phase timing
// ---------------------------------------------------------------------------

/// Settle times around a full panel render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTiming {
    pub warmup_ms: u32,
    pub cooldown_ms: u32,
}

// ---------------------------------------------------------------------------
// RenderContext
// ---------------------------------------------------------------------------

pub struct RenderContext<'a> {
    // -- Hardware --
    pub panel: &'a mut dyn PanelPort,
    pub console: &'a mut dyn ConsolePort,
    pub delay: &'a mut dyn DelayNs,

    // -- Content --
    pub layout: &'a Layout,
    pub frame: &'a Frame,

    // -- Configuration --
    pub timing: PhaseTiming,

    // -- Progress --
    /// First failure of this render, if any.
    pub fault: Option<DisplayError>,
    /// Set when the machine re-enters Idle, i.e. the render is over.
    pub completed: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        panel: &'a mut dyn PanelPort,
        console: &'a mut dyn ConsolePort,
        delay: &'a mut dyn DelayNs,
        layout: &'a Layout,
        frame: &'a Frame,
        timing: PhaseTiming,
    ) -> Self {
        Self {
            panel,
            console,
            delay,
            layout,
            frame,
            timing,
            fault: None,
            completed: false,
        }
    }

    /// Keep the first failure; later ones are consequences of it.
    pub fn record_fault(&mut self, error: DisplayError) {
        if self.fault.is_none() {
            self.fault = Some(error);
        }
    }

    pub fn has_fault(&self) -> bool {
        self.fault.is_some()
    }
}

//! Render phase handlers and the two state tables.
//!
//! ```text
//!  Full:       IDLE ──▶ WARMUP ──▶ RENDERING ──▶ COOLDOWN ──▶ IDLE
//!                      power up    paint         wait,
//!                      + wait                    power down
//!
//!  Calibrate:  IDLE ──▶ RENDERING ──▶ IDLE
//!                       text lines
//! ```
//!
//! A failed power-up skips the paint but still passes through Cooldown,
//! so the panel always ends powered down.

use log::{debug, info, warn};

use super::context::RenderContext;
use super::{DisplayState, StateDescriptor, StateTable};
use crate::config::RunMode;
use crate::display::text;

// ═══════════════════════════════════════════════════════════════════════════
//  Strategies
// ═══════════════════════════════════════════════════════════════════════════

/// One render path per [`RunMode`].
pub trait RenderStrategy {
    fn mode(&self) -> RunMode;

    /// Build the table the engine walks for this mode.
    fn state_table(&self) -> StateTable;
}

/// Slow, panel-friendly render with warmup and cooldown.
pub struct FullRender;

/// Text-only render on the console; never touches the panel.
pub struct CalibrateRender;

pub fn strategy_for(mode: RunMode) -> &'static dyn RenderStrategy {
    match mode {
        RunMode::Full => &FullRender,
        RunMode::Calibrate => &CalibrateRender,
    }
}

impl RenderStrategy for FullRender {
    fn mode(&self) -> RunMode {
        RunMode::Full
    }

    fn state_table(&self) -> StateTable {
        [
            // Index 0 — Idle
            StateDescriptor {
                id: DisplayState::Idle,
                name: "Idle",
                on_enter: Some(idle_enter),
                on_exit: None,
                on_update: full_idle_update,
            },
            // Index 1 — Warmup
            StateDescriptor {
                id: DisplayState::Warmup,
                name: "Warmup",
                on_enter: Some(warmup_enter),
                on_exit: None,
                on_update: warmup_update,
            },
            // Index 2 — Rendering
            StateDescriptor {
                id: DisplayState::Rendering,
                name: "Rendering",
                on_enter: Some(paint_enter),
                on_exit: None,
                on_update: full_rendering_update,
            },
            // Index 3 — Cooldown
            StateDescriptor {
                id: DisplayState::Cooldown,
                name: "Cooldown",
                on_enter: Some(cooldown_enter),
                on_exit: None,
                on_update: back_to_idle,
            },
        ]
    }
}

impl RenderStrategy for CalibrateRender {
    fn mode(&self) -> RunMode {
        RunMode::Calibrate
    }

    fn state_table(&self) -> StateTable {
        [
            StateDescriptor {
                id: DisplayState::Idle,
                name: "Idle",
                on_enter: Some(idle_enter),
                on_exit: None,
                on_update: calibrate_idle_update,
            },
            // Warmup and Cooldown are never entered in this table.
            StateDescriptor {
                id: DisplayState::Warmup,
                name: "Warmup",
                on_enter: None,
                on_exit: None,
                on_update: back_to_idle,
            },
            StateDescriptor {
                id: DisplayState::Rendering,
                name: "Rendering",
                on_enter: Some(console_enter),
                on_exit: None,
                on_update: back_to_idle,
            },
            StateDescriptor {
                id: DisplayState::Cooldown,
                name: "Cooldown",
                on_enter: None,
                on_exit: None,
                on_update: back_to_idle,
            },
        ]
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut RenderContext<'_>) {
    ctx.completed = true;
    debug!("IDLE: cycle {} render finished", ctx.frame.cycle);
}

fn full_idle_update(ctx: &mut RenderContext<'_>) -> Option<DisplayState> {
    if ctx.completed {
        return None;
    }
    Some(DisplayState::Warmup)
}

fn calibrate_idle_update(ctx: &mut RenderContext<'_>) -> Option<DisplayState> {
    if ctx.completed {
        return None;
    }
    Some(DisplayState::Rendering)
}

fn back_to_idle(_ctx: &mut RenderContext<'_>) -> Option<DisplayState> {
    Some(DisplayState::Idle)
}

// ═══════════════════════════════════════════════════════════════════════════
//  WARMUP — power the panel and let it settle
// ═══════════════════════════════════════════════════════════════════════════

fn warmup_enter(ctx: &mut RenderContext<'_>) {
    info!("WARMUP: powering panel, settling {} ms", ctx.timing.warmup_ms);
    if let Err(e) = ctx.panel.power_up() {
        warn!("WARMUP: {}", e);
        ctx.record_fault(e);
        return;
    }
    ctx.delay.delay_ms(ctx.timing.warmup_ms);
}

fn warmup_update(_ctx: &mut RenderContext<'_>) -> Option<DisplayState> {
    Some(DisplayState::Rendering)
}

// ═══════════════════════════════════════════════════════════════════════════
//  RENDERING
// ═══════════════════════════════════════════════════════════════════════════

fn paint_enter(ctx: &mut RenderContext<'_>) {
    if ctx.has_fault() {
        warn!("RENDERING: panel not ready, skipping paint");
        return;
    }
    let frame = ctx.frame;
    info!(
        "RENDERING: painting {} plant boxes + environment",
        frame.rows.len()
    );
    if let Err(e) = ctx.panel.paint(ctx.layout, frame) {
        warn!("RENDERING: {}", e);
        ctx.record_fault(e);
    }
}

fn full_rendering_update(_ctx: &mut RenderContext<'_>) -> Option<DisplayState> {
    Some(DisplayState::Cooldown)
}

fn console_enter(ctx: &mut RenderContext<'_>) {
    let frame = ctx.frame;
    let lines = core::iter::once(text::header_line(frame.cycle))
        .chain(frame.rows.iter().map(text::plant_line))
        .chain(core::iter::once(text::environment_line(&frame.environment)));

    for line in lines {
        if let Err(e) = ctx.console.write_line(&line) {
            warn!("RENDERING: {}", e);
            ctx.record_fault(e);
            return;
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  COOLDOWN — settle, then power the panel down
// ═══════════════════════════════════════════════════════════════════════════

fn cooldown_enter(ctx: &mut RenderContext<'_>) {
    info!("COOLDOWN: settling {} ms, then powering down", ctx.timing.cooldown_ms);
    ctx.delay.delay_ms(ctx.timing.cooldown_ms);
    if let Err(e) = ctx.panel.power_down() {
        warn!("COOLDOWN: {}", e);
        ctx.record_fault(e);
    }
}

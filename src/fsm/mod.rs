//! Function-pointer finite state machine for display rendering.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  StateTable                                              │
//! │  ┌───────────┬───────────┬──────────┬────────────────┐   │
//! │  │ State     │ on_enter  │ on_exit  │ on_update      │   │
//! │  ├───────────┼───────────┼──────────┼────────────────┤   │
//! │  │ Idle      │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Opt<> │   │
//! │  │ Warmup    │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Opt<> │   │
//! │  │ Rendering │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Opt<> │   │
//! │  │ Cooldown  │ fn(ctx)   │ fn(ctx)  │ fn(ctx)->Opt<> │   │
//! │  └───────────┴───────────┴──────────┴────────────────┘   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** state.  If
//! it returns `Some(next)`, the engine runs `on_exit` for the current
//! state, then `on_enter` for the next.  The hardware work of each phase
//! lives in `on_enter`, so a render is a walk from Idle around the table
//! and back to Idle.  Which walk is taken depends on the table, supplied
//! by a [`states::RenderStrategy`].

pub mod context;
pub mod states;

use context::RenderContext;
use log::{info, warn};

use crate::error::DisplayError;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DisplayState {
    Idle = 0,
    Warmup = 1,
    Rendering = 2,
    Cooldown = 3,
}

impl DisplayState {
    /// Total number of states — used to size the table array.
    pub const COUNT: usize = 4;

    /// Convert an index back to a state.  Out-of-range indices are a bug;
    /// release builds fall back to `Idle`.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Idle,
            1 => Self::Warmup,
            2 => Self::Rendering,
            3 => Self::Cooldown,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Idle
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
pub type PhaseActionFn = fn(&mut RenderContext<'_>);

/// Per-tick handler.  Returns `Some(next)` to trigger a transition.
pub type PhaseUpdateFn = fn(&mut RenderContext<'_>) -> Option<DisplayState>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

pub struct StateDescriptor {
    pub id: DisplayState,
    pub name: &'static str,
    pub on_enter: Option<PhaseActionFn>,
    pub on_exit: Option<PhaseActionFn>,
    pub on_update: PhaseUpdateFn,
}

pub type StateTable = [StateDescriptor; DisplayState::COUNT];

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// Upper bound on ticks for one render; every table returns to Idle well
/// within this.
const MAX_TICKS_PER_RUN: usize = 2 * DisplayState::COUNT;

pub struct Fsm {
    /// Fixed-size table indexed by `DisplayState as usize`.
    table: StateTable,
    current: usize,
    tick_count: u64,
}

impl Fsm {
    /// Construct a machine resting in Idle.
    pub fn new(table: StateTable) -> Self {
        Self {
            table,
            current: DisplayState::Idle as usize,
            tick_count: 0,
        }
    }

    /// Advance by one tick.
    pub fn tick(&mut self, ctx: &mut RenderContext<'_>) {
        self.tick_count = self.tick_count.wrapping_add(1);

        let next = (self.table[self.current].on_update)(ctx);

        if let Some(next_id) = next {
            self.transition(next_id, ctx);
        }
    }

    /// Jump straight to `next`, running exit/enter actions.
    pub fn force_transition(&mut self, next: DisplayState, ctx: &mut RenderContext<'_>) {
        if next as usize != self.current {
            self.transition(next, ctx);
        }
    }

    /// Walk one full render: tick from Idle until the table brings the
    /// machine back to Idle.  Returns the first fault recorded on the way.
    pub fn run(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), DisplayError> {
        ctx.completed = false;

        for _ in 0..MAX_TICKS_PER_RUN {
            self.tick(ctx);
            if ctx.completed {
                break;
            }
        }

        if !ctx.completed {
            warn!(
                "FSM: render did not return to Idle (stuck in {}), forcing",
                self.table[self.current].name
            );
            self.force_transition(DisplayState::Idle, ctx);
        }

        ctx.fault.take().map_or(Ok(()), Err)
    }

    pub fn current_state(&self) -> DisplayState {
        DisplayState::from_index(self.current)
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: DisplayState, ctx: &mut RenderContext<'_>) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx);
        }

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }
    }
}

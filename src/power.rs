//! Pacing between cycles.
//!
//! ```text
//!  BusyDelay:      ─── delay(interval) ───────────────────────────▶
//!
//!  LowPowerSleep:  suspend ─▶ light_sleep(interval) ─▶ resume ─▶ settle
//!                             │ rejected?
//!                             └─▶ delay(interval)
//! ```
//!
//! Both strategies implement [`Pacer`]; [`Pacing`] picks one from the
//! configured [`SleepStrategy`].

use embedded_hal::delay::DelayNs;
use log::{debug, warn};

use crate::app::ports::PowerPort;
use crate::config::{CycleConfig, SleepStrategy};

/// Spends the refresh interval between two cycles.
pub trait Pacer {
    fn strategy(&self) -> SleepStrategy;

    /// Block for `interval_ms`; returns once the next cycle may start.
    fn pause(&mut self, interval_ms: u32);
}

// ---------------------------------------------------------------------------
// BusyDelay
// ---------------------------------------------------------------------------

/// Keeps everything powered and blocks.
pub struct BusyDelay<D> {
    delay: D,
}

impl<D: DelayNs> BusyDelay<D> {
    pub fn new(delay: D) -> Self {
        Self { delay }
    }
}

impl<D: DelayNs> Pacer for BusyDelay<D> {
    fn strategy(&self) -> SleepStrategy {
        SleepStrategy::BusyDelay
    }

    fn pause(&mut self, interval_ms: u32) {
        self.delay.delay_ms(interval_ms);
    }
}

// ---------------------------------------------------------------------------
// LowPowerSleep
// ---------------------------------------------------------------------------

/// Cuts non-essential peripherals and light-sleeps the SoC.
pub struct LowPowerSleep<P, D> {
    power: P,
    delay: D,
    /// Wait after resuming so the first sensor read is valid.
    wake_settle_ms: u32,
}

impl<P: PowerPort, D: DelayNs> LowPowerSleep<P, D> {
    pub fn new(power: P, delay: D, wake_settle_ms: u32) -> Self {
        Self {
            power,
            delay,
            wake_settle_ms,
        }
    }

    pub fn power(&self) -> &P {
        &self.power
    }
}

impl<P: PowerPort, D: DelayNs> Pacer for LowPowerSleep<P, D> {
    fn strategy(&self) -> SleepStrategy {
        SleepStrategy::LowPowerSleep
    }

    fn pause(&mut self, interval_ms: u32) {
        self.power.suspend_peripherals();

        if let Err(e) = self.power.light_sleep(interval_ms) {
            warn!("Pacer: {}, busy-waiting {} ms instead", e, interval_ms);
            self.delay.delay_ms(interval_ms);
        }

        self.power.resume_peripherals();
        debug!("Pacer: awake, settling {} ms", self.wake_settle_ms);
        self.delay.delay_ms(self.wake_settle_ms);
    }
}

// ---------------------------------------------------------------------------
// Pacing — the configured variant
// ---------------------------------------------------------------------------

pub enum Pacing<P, D> {
    Busy(BusyDelay<D>),
    LowPower(LowPowerSleep<P, D>),
}

impl<P: PowerPort, D: DelayNs> Pacing<P, D> {
    pub fn new(strategy: SleepStrategy, power: P, delay: D, wake_settle_ms: u32) -> Self {
        match strategy {
            SleepStrategy::BusyDelay => Self::Busy(BusyDelay::new(delay)),
            SleepStrategy::LowPowerSleep => {
                Self::LowPower(LowPowerSleep::new(power, delay, wake_settle_ms))
            }
        }
    }

    pub fn from_config(config: &CycleConfig, power: P, delay: D) -> Self {
        Self::new(config.sleep_strategy, power, delay, config.wake_settle_ms)
    }
}

impl<P: PowerPort, D: DelayNs> Pacer for Pacing<P, D> {
    fn strategy(&self) -> SleepStrategy {
        match self {
            Self::Busy(p) => p.strategy(),
            Self::LowPower(p) => p.strategy(),
        }
    }

    fn pause(&mut self, interval_ms: u32) {
        match self {
            Self::Busy(p) => p.pause(interval_ms),
            Self::LowPower(p) => p.pause(interval_ms),
        }
    }
}

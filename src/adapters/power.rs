//! Board power adapter — implements [`PowerPort`].
//!
//! Suspending cuts the sensor supply rail (probes and DHT11); the SoC
//! then light-sleeps on the RTC timer.  GPIO levels are retained through
//! light sleep, so the rail stays off until resumed.

use log::debug;

use crate::app::ports::PowerPort;
use crate::drivers::hw_init;
use crate::error::PowerError;

pub struct BoardPower {
    rail_gpio: i32,
}

impl BoardPower {
    /// `rail_gpio` is the sensor supply switch, normally
    /// [`pins::SENSOR_POWER_GPIO`](crate::pins::SENSOR_POWER_GPIO).
    pub fn new(rail_gpio: i32) -> Self {
        Self { rail_gpio }
    }
}

impl PowerPort for BoardPower {
    fn suspend_peripherals(&mut self) {
        debug!("Power: sensor rail off");
        hw_init::gpio_write(self.rail_gpio, false);
    }

    #[cfg(target_os = "espidf")]
    fn light_sleep(&mut self, duration_ms: u32) -> Result<(), PowerError> {
        hw_init::light_sleep(duration_ms)
    }

    #[cfg(not(target_os = "espidf"))]
    fn light_sleep(&mut self, duration_ms: u32) -> Result<(), PowerError> {
        debug!("Power(sim): light sleep {} ms skipped", duration_ms);
        Ok(())
    }

    fn resume_peripherals(&mut self) {
        debug!("Power: sensor rail on");
        hw_init::gpio_write(self.rail_gpio, true);
    }
}

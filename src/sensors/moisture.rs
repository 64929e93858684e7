//! Capacitive soil-moisture probes on ADC1.
//!
//! Each probe is an analog channel; wetter soil reads lower.  The probes
//! are powered from a switched rail (see [`pins::SENSOR_POWER_GPIO`]) so
//! they can be cut during low-power sleep.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads from a static table of atomics for injection.
//!
//! [`pins::SENSOR_POWER_GPIO`]: crate::pins::SENSOR_POWER_GPIO

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicI32, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
use crate::config::MAX_PLANTS;
use crate::error::SensorError;

/// ADC1 exposes channels 0–9.
pub const ADC1_CHANNELS: u8 = 10;

/// Simulated raw value per channel; negative means "probe fault".
#[cfg(not(target_os = "espidf"))]
static SIM_RAW: [AtomicI32; ADC1_CHANNELS as usize] =
    [const { AtomicI32::new(-1) }; ADC1_CHANNELS as usize];

/// Inject a simulated reading (`None` simulates a faulty probe).
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_raw(channel: u8, raw: Option<u16>) {
    if let Some(slot) = SIM_RAW.get(channel as usize) {
        slot.store(raw.map_or(-1, i32::from), Ordering::Relaxed);
    }
}

/// Reader for every configured probe channel.
pub struct MoistureProbes {
    channels: heapless::Vec<u8, MAX_PLANTS>,
}

impl MoistureProbes {
    /// `channels` are the wired channels from the plant table.
    pub fn new(channels: &[u8]) -> Self {
        let mut wired = heapless::Vec::new();
        for &ch in channels.iter().take(MAX_PLANTS) {
            let _ = wired.push(ch);
        }
        Self { channels: wired }
    }

    pub fn read(&self, channel: u8) -> Result<u16, SensorError> {
        if channel >= ADC1_CHANNELS || !self.channels.contains(&channel) {
            return Err(SensorError::NotConnected);
        }
        self.read_adc(channel)
    }

    #[cfg(target_os = "espidf")]
    fn read_adc(&self, channel: u8) -> Result<u16, SensorError> {
        hw_init::adc1_read(u32::from(channel)).map_err(|_| SensorError::ReadFailed)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_adc(&self, channel: u8) -> Result<u16, SensorError> {
        let raw = SIM_RAW[channel as usize].load(Ordering::Relaxed);
        u16::try_from(raw).map_err(|_| SensorError::ReadFailed)
    }
}

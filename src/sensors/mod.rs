//! Sensor subsystem — probe drivers and the [`SensorGateway`].
//!
//! The gateway is the only thing the scheduler talks to.  It owns the
//! sensor port handle, asks it for one raw sample per plant and one
//! environment sample per cycle, and hands failures back as data.

pub mod dht11;
pub mod moisture;

use log::{debug, warn};

use crate::app::ports::SensorPort;
use crate::config::PlantConfig;
use crate::error::SensorError;
use crate::readings::EnvironmentReading;

/// Shapes sensor-port results into the cycle's reading types.
pub struct SensorGateway<S> {
    port: S,
}

impl<S: SensorPort> SensorGateway<S> {
    pub fn new(port: S) -> Self {
        Self { port }
    }

    /// One raw moisture sample for `plant`.
    ///
    /// A plant without a wired probe is reported as
    /// [`SensorError::NotConnected`] without touching the driver.
    pub fn read_plant(&mut self, plant: &PlantConfig) -> Result<i32, SensorError> {
        let Some(channel) = plant.channel else {
            debug!("Gateway: '{}' has no probe wired", plant.name);
            return Err(SensorError::NotConnected);
        };

        match self.port.sample(channel) {
            Ok(raw) => {
                debug!("Gateway: '{}' ch{} raw={}", plant.name, channel, raw);
                Ok(i32::from(raw))
            }
            Err(e) => {
                warn!("Gateway: '{}' ch{} unavailable: {}", plant.name, channel, e);
                Err(e)
            }
        }
    }

    /// One ambient temperature/humidity sample.
    pub fn read_environment(&mut self) -> Result<EnvironmentReading, SensorError> {
        self.port.sample_environment().inspect_err(|e| {
            warn!("Gateway: environment sensor unavailable: {}", e);
        })
    }

    pub fn port(&self) -> &S {
        &self.port
    }
}

//! Hardware adapter — bridges the probe and DHT11 drivers to [`SensorPort`].
//!
//! The only sensor-side module that touches hardware.  On non-espidf
//! targets the probe reader uses its simulation table.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::SensorPort;
use crate::error::SensorError;
use crate::readings::EnvironmentReading;
use crate::sensors::dht11::Dht11;
use crate::sensors::moisture::MoistureProbes;

pub struct HardwareSensors<P, D> {
    probes: MoistureProbes,
    dht: Dht11<P, D>,
}

impl<P, D> HardwareSensors<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    pub fn new(probes: MoistureProbes, dht: Dht11<P, D>) -> Self {
        Self { probes, dht }
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<P, D> SensorPort for HardwareSensors<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    fn sample(&mut self, channel: u8) -> Result<u16, SensorError> {
        self.probes.read(channel)
    }

    fn sample_environment(&mut self) -> Result<EnvironmentReading, SensorError> {
        self.dht.read()
    }
}

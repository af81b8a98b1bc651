//! Condition source — the periodic producer side of the control loop.
//!
//! [`ConditionSampler`] runs in the timer context (a thread on the host,
//! a timer ISR on a real board). Each period it reads one raw sample,
//! converts it to degrees Celsius, classifies the result against the
//! hysteresis thresholds, and publishes exactly one condition bit into
//! the shared [`ConditionFlags`] with a single atomic OR.

pub mod lm35;

use log::debug;

use crate::config::ThermostatConfig;
use crate::error::Error;
use crate::flags::{Condition, ConditionFlags};
use crate::ports::AdcPort;

/// One classified sample, returned for logging/telemetry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifiedSample {
    pub raw: u16,
    pub celsius: f32,
    pub condition: Condition,
}

/// The periodic temperature sampler.
///
/// Borrows the same [`ConditionFlags`] instance as the FSM context — the
/// producer/consumer relationship is spelled out at construction time.
pub struct ConditionSampler<'a, A: AdcPort> {
    adc: A,
    flags: &'a ConditionFlags,
    low_c: f32,
    high_c: f32,
    vref_mv: f32,
    full_scale: f32,
    mv_per_deg_c: f32,
}

impl<'a, A: AdcPort> ConditionSampler<'a, A> {
    /// Build a sampler over the given ADC adapter and shared flags.
    pub fn new(adc: A, flags: &'a ConditionFlags, config: &ThermostatConfig) -> Self {
        Self {
            adc,
            flags,
            low_c: config.low_threshold_c,
            high_c: config.high_threshold_c,
            vref_mv: config.vref_mv,
            full_scale: f32::from(config.adc_full_scale()),
            mv_per_deg_c: config.sensor_mv_per_deg_c,
        }
    }

    /// Take one sample: read, convert, classify, publish.
    ///
    /// The only flag mutation is one atomic OR of a single bit — this
    /// must never read-modify-write the flags in a way that could race
    /// with the consumer's read-then-clear pattern.
    pub fn sample(&mut self) -> Result<ClassifiedSample, Error> {
        let raw = self.adc.read()?;
        let celsius = self.to_celsius(raw);
        let condition = self.classify(celsius);

        self.flags.raise(condition);
        debug!("sample: raw={raw} temp={celsius:.1}C -> {condition}");

        Ok(ClassifiedSample {
            raw,
            celsius,
            condition,
        })
    }

    /// Convert a raw sample to degrees Celsius.
    /// `mV = vref * raw / full_scale`, then divide by the sensor slope.
    fn to_celsius(&self, raw: u16) -> f32 {
        let mvolts = (self.vref_mv * f32::from(raw)) / self.full_scale;
        mvolts / self.mv_per_deg_c
    }

    /// Classify a temperature into exactly one condition.
    fn classify(&self, celsius: f32) -> Condition {
        if celsius < self.low_c {
            Condition::TooCold
        } else if celsius > self.high_c {
            Condition::TooHot
        } else {
            Condition::ComfortReached
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SensorError;

    /// Fixed-value ADC stub, independent of the lm35 simulation static.
    struct FixedAdc(Result<u16, SensorError>);

    impl AdcPort for FixedAdc {
        fn read(&mut self) -> Result<u16, SensorError> {
            self.0
        }
    }

    fn sampler_with(raw: u16, flags: &ConditionFlags) -> ConditionSampler<'_, FixedAdc> {
        ConditionSampler::new(FixedAdc(Ok(raw)), flags, &ThermostatConfig::default())
    }

    // 3300 mV over 1023 counts at 10 mV/degC: 1 count ≈ 0.3226 degC.
    // 22 degC ≈ raw 68.2, 25 degC ≈ raw 77.5.

    #[test]
    fn cold_reading_raises_too_cold() {
        let flags = ConditionFlags::new();
        let sample = sampler_with(50, &flags).sample().unwrap();
        assert_eq!(sample.condition, Condition::TooCold);
        assert!(sample.celsius < 22.0);
        assert_eq!(flags.snapshot(), Condition::TooCold.mask());
    }

    #[test]
    fn hot_reading_raises_too_hot() {
        let flags = ConditionFlags::new();
        let sample = sampler_with(100, &flags).sample().unwrap();
        assert_eq!(sample.condition, Condition::TooHot);
        assert!(sample.celsius > 25.0);
        assert_eq!(flags.snapshot(), Condition::TooHot.mask());
    }

    #[test]
    fn in_band_reading_raises_comfort() {
        let flags = ConditionFlags::new();
        let sample = sampler_with(73, &flags).sample().unwrap();
        assert_eq!(sample.condition, Condition::ComfortReached);
        assert!(sample.celsius > 22.0 && sample.celsius < 25.0);
    }

    #[test]
    fn conversion_matches_transfer_function() {
        let flags = ConditionFlags::new();
        // Full scale = reference voltage = 330 degC on an LM35.
        let sample = sampler_with(1023, &flags).sample().unwrap();
        assert!((sample.celsius - 330.0).abs() < 0.01);

        let flags2 = ConditionFlags::new();
        let zero = sampler_with(0, &flags2).sample().unwrap();
        assert!(zero.celsius.abs() < 0.01);
    }

    #[test]
    fn adc_failure_propagates_and_raises_nothing() {
        let flags = ConditionFlags::new();
        let mut sampler = ConditionSampler::new(
            FixedAdc(Err(SensorError::AdcReadFailed)),
            &flags,
            &ThermostatConfig::default(),
        );
        assert_eq!(
            sampler.sample(),
            Err(Error::Sensor(SensorError::AdcReadFailed))
        );
        assert!(flags.is_clear());
    }

    #[test]
    fn repeated_samples_accumulate_distinct_bits() {
        // The consumer may be slow: successive differing classifications
        // must accumulate rather than overwrite.
        let flags = ConditionFlags::new();
        let _ = sampler_with(50, &flags).sample().unwrap();
        let _ = sampler_with(100, &flags).sample().unwrap();
        assert!(flags.is_set(Condition::TooCold));
        assert!(flags.is_set(Condition::TooHot));
    }
}

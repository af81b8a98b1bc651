//! Pin / channel assignments.
//!
//! Single source of truth for the board wiring. The values mirror the
//! reference board layout (heater and cooler on digital outputs, LM35 on
//! an analog input channel).

/// Heater relay digital output.
pub const HEATER_GPIO: i32 = 4;

/// Cooler relay digital output.
pub const COOLER_GPIO: i32 = 5;

/// LM35 analog input channel.
pub const LM35_ADC_CHANNEL: u8 = 2;

//! Thermostat firmware — main entry point.
//!
//! Two execution contexts share one atomic bitset:
//!
//! ```text
//! ┌──────────────────┐   raise (OR)   ┌─────────────────┐
//! │ Sampler thread   │───────────────▶│ ConditionFlags  │
//! │ (timer context)  │                │ (static)        │
//! └──────────────────┘                └───────┬─────────┘
//!                                             │ poll / acknowledge (AND)
//!                                             ▼
//!                      ┌──────────────────────────────────┐
//!                      │ Main loop: controller.poll()     │
//!                      │  FSM table scan → relay drivers  │
//!                      └──────────────────────────────────┘
//! ```
//!
//! On a real board the sampler body runs in the periodic timer ISR and
//! the main loop executes WFI between polls; on the host a thread and a
//! sleep stand in for both.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use log::{info, warn};

use thermostat::adapters::hardware::HardwareAdapter;
use thermostat::adapters::log_sink::LogEventSink;
use thermostat::config::ThermostatConfig;
use thermostat::controller::ThermostatController;
use thermostat::drivers::relay::RelayDriver;
use thermostat::events::ControlEvent;
use thermostat::flags::ConditionFlags;
use thermostat::pins;
use thermostat::ports::EventSink;
use thermostat::sensors::lm35::Lm35Sensor;
use thermostat::sensors::ConditionSampler;

/// Shared producer/consumer bitset. Static so both contexts can borrow
/// it for the life of the process; zero-initialised, never destroyed.
static FLAGS: ConditionFlags = ConditionFlags::new();

fn main() -> Result<()> {
    env_logger::init();

    info!("thermostat v{} starting", env!("CARGO_PKG_VERSION"));

    // ── 1. Configuration ──────────────────────────────────────
    let config = ThermostatConfig::default();
    config.validate()?;
    info!(
        "comfort band {:.1}-{:.1} degC, sampling every {} ms",
        config.low_threshold_c, config.high_threshold_c, config.sampling_period_ms
    );

    // ── 2. Periodic condition source (timer context) ──────────
    let sampler_config = config.clone();
    let _sampler = thread::Builder::new()
        .name("sampler".into())
        .spawn(move || {
            let sensor = Lm35Sensor::new(pins::LM35_ADC_CHANNEL, sampler_config.adc_full_scale());
            let mut sampler = ConditionSampler::new(sensor, &FLAGS, &sampler_config);
            let period = Duration::from_millis(u64::from(sampler_config.sampling_period_ms));
            loop {
                thread::sleep(period);
                if let Err(e) = sampler.sample() {
                    // Sensor faults stay the condition source's concern:
                    // nothing is published, the FSM idles until the next
                    // good sample.
                    warn!("sample failed: {e}");
                }
            }
        })?;

    // ── 3. Actuators + controller ─────────────────────────────
    let mut hw = HardwareAdapter::new(
        RelayDriver::new("heater", pins::HEATER_GPIO),
        RelayDriver::new("cooler", pins::COOLER_GPIO),
    );
    let mut sink = LogEventSink::new();

    let mut controller = ThermostatController::new(config.clone(), &FLAGS);
    controller.start(&mut hw, &mut sink);

    info!("system ready, entering poll loop");

    // ── 4. Poll loop ──────────────────────────────────────────
    let poll_interval = Duration::from_millis(u64::from(config.poll_interval_ms));
    let polls_per_telemetry =
        u64::from(config.telemetry_interval_secs) * 1000 / u64::from(config.poll_interval_ms);
    let mut polls_since_telemetry: u64 = 0;

    loop {
        controller.poll(&mut hw, &mut sink);

        polls_since_telemetry += 1;
        if polls_since_telemetry >= polls_per_telemetry.max(1) {
            sink.emit(&ControlEvent::Telemetry(controller.build_telemetry(&hw)));
            polls_since_telemetry = 0;
        }

        // Hardware would WFI here; the host sleeps instead.
        thread::sleep(poll_interval);
    }
}

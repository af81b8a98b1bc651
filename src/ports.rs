//! Port traits — the boundary between control logic and the hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ control core (FSM / sampler)
//! ```
//!
//! Driven adapters (the ADC front end, the relay pair, the event sink)
//! implement these traits. The core consumes them via generics, so the
//! engine and the sampler never touch a register directly and the whole
//! control loop runs against mocks in tests.

use crate::error::SensorError;
use crate::events::ControlEvent;

// ───────────────────────────────────────────────────────────────
// ADC port (driven adapter: hardware → sampler)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the condition sampler calls this to obtain one raw
/// conversion from the temperature channel.
pub trait AdcPort {
    /// Run one conversion and return the raw sample.
    fn read(&mut self) -> Result<u16, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: FSM actions → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: transition actions call this to command the two
/// actuators.
///
/// Every operation is idempotent from the caller's point of view —
/// commanding an already-on heater is a no-op. Implementations must not
/// pulse or toggle hardware on redundant commands.
pub trait ActuatorPort {
    /// Energise the heater relay.
    fn heater_on(&mut self);

    /// De-energise the heater relay.
    fn heater_off(&mut self);

    /// Energise the cooler relay.
    fn cooler_on(&mut self);

    /// De-energise the cooler relay.
    fn cooler_off(&mut self);

    /// Query whether the heater is currently energised.
    fn is_heater_on(&self) -> bool;

    /// Query whether the cooler is currently energised.
    fn is_cooler_on(&self) -> bool;

    /// Kill both actuators — safe shutdown.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: control core → logging)
// ───────────────────────────────────────────────────────────────

/// The control core emits structured [`ControlEvent`]s through this port.
/// Adapters decide where they go (serial log today; anything else would
/// implement the same trait).
pub trait EventSink {
    fn emit(&mut self, event: &ControlEvent);
}

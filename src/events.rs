//! Outbound control events.
//!
//! The [`ThermostatController`](crate::controller::ThermostatController)
//! emits these through the [`EventSink`](crate::ports::EventSink) port.
//! Adapters on the other side decide what to do with them — today they
//! go to the serial log.

use serde::Serialize;

use crate::fsm::StateId;

/// Structured events emitted by the control core.
#[derive(Debug, Clone)]
pub enum ControlEvent {
    /// The controller has started (carries the forced initial state).
    Started(StateId),

    /// The FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time telemetry snapshot suitable for logging or
/// transmission.
#[derive(Debug, Clone, Serialize)]
pub struct TelemetryData {
    pub state: StateId,
    /// Condition bits raised but not yet consumed.
    pub pending_flags: u8,
    pub heater_on: bool,
    pub cooler_on: bool,
    pub total_polls: u64,
    pub transitions: u64,
}

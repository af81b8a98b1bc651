//! Thermostat controller — the consumer side of the control loop.
//!
//! [`ThermostatController`] owns the FSM engine and its context and
//! exposes a hardware-agnostic API. All I/O flows through the port
//! traits injected at call sites, so the whole controller runs against
//! mock adapters in tests.
//!
//! ```text
//!  ConditionFlags ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!  (shared bitset)    │   ThermostatController   │
//!    ActuatorPort ◀── │   Fsm · transition table │
//!                     └──────────────────────────┘
//! ```

use log::info;

use crate::config::ThermostatConfig;
use crate::events::{ControlEvent, TelemetryData};
use crate::flags::{Condition, ConditionFlags};
use crate::fsm::context::FsmContext;
use crate::fsm::table::{thermostat_table, Action};
use crate::fsm::{Fsm, StateId};
use crate::ports::{ActuatorPort, EventSink};

/// Orchestrates the FSM over the shared condition flags.
pub struct ThermostatController<'a> {
    fsm: Fsm<'static>,
    ctx: FsmContext<'a>,
}

impl<'a> ThermostatController<'a> {
    /// Construct the controller, borrowing the shared flags.
    ///
    /// Does **not** touch the hardware — call [`start`] next.
    ///
    /// [`start`]: Self::start
    pub fn new(config: ThermostatConfig, flags: &'a ConditionFlags) -> Self {
        Self {
            fsm: Fsm::new(thermostat_table(), StateId::SavingMode),
            ctx: FsmContext::new(config, flags),
        }
    }

    /// Force a known-safe hardware state and announce the start.
    ///
    /// Runs the saving-mode action directly rather than through table
    /// traversal: both actuators are guaranteed off regardless of which
    /// state the engine was constructed in. Every condition bit raised
    /// before startup is then purged — pre-start classifications predate
    /// the known-safe state and must not drive the first polls.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        Action::EnterSaving.run(&mut self.ctx, hw);
        self.ctx.flags.acknowledge(Condition::ALL);
        sink.emit(&ControlEvent::Started(self.fsm.current_state()));
        info!("controller started in {:?}", self.fsm.current_state());
    }

    /// One control cycle: a single FSM poll, plus a state-change event
    /// when a transition fired. Never blocks; an idle poll is normal.
    pub fn poll(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        let prev = self.fsm.current_state();
        if let Some(next) = self.fsm.poll(&mut self.ctx, hw) {
            sink.emit(&ControlEvent::StateChanged { from: prev, to: next });
        }
    }

    /// Build a telemetry snapshot from the current context and hardware.
    pub fn build_telemetry(&self, hw: &impl ActuatorPort) -> TelemetryData {
        TelemetryData {
            state: self.fsm.current_state(),
            pending_flags: self.ctx.flags.snapshot(),
            heater_on: hw.is_heater_on(),
            cooler_on: hw.is_cooler_on(),
            total_polls: self.fsm.poll_count(),
            transitions: self.fsm.transition_count(),
        }
    }

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }
}

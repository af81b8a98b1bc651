//! Table-driven finite state machine engine.
//!
//! Classic embedded FSM pattern: the machine's whole program is a static,
//! ordered list of transitions, and the engine is nothing but a scan loop
//! over it.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ Transition table (scanned top to bottom, first match wins)   │
//! │ ┌────────────┬────────────────┬────────────┬──────────────┐  │
//! │ │ from       │ guard          │ to         │ action       │  │
//! │ ├────────────┼────────────────┼────────────┼──────────────┤  │
//! │ │ Cooling    │ ComfortReached │ SavingMode │ EnterSaving  │  │
//! │ │ SavingMode │ TooCold        │ Heating    │ EngageHeater │  │
//! │ │ Heating    │ ComfortReached │ SavingMode │ EnterSaving  │  │
//! │ │ SavingMode │ TooHot         │ Cooling    │ EngageCooler │  │
//! │ └────────────┴────────────────┴────────────┴──────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each `poll` scans the table from the top. The first entry whose `from`
//! matches the current state and whose guard holds fires: its action runs
//! (drives the actuators, clears the flag bits it consumed), the current
//! state moves to `to`, and the scan stops. At most one transition fires
//! per poll no matter how many entries would also match — scan order is
//! the tie-breaker, so table authors control precedence by row order.
//! No match is a normal idle poll, not an error, and `poll` never blocks.

pub mod context;
pub mod table;

use log::info;
use serde::Serialize;

use crate::ports::ActuatorPort;
use context::FsmContext;
use table::{Action, Guard};

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of all thermostat states.
///
/// Pure identity — no per-state payload; a state exists only to be matched
/// against the `from` column of the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum StateId {
    /// Heater energised, driving the temperature up.
    Heating = 0,
    /// Cooler energised, driving the temperature down.
    Cooling = 1,
    /// Comfort band reached — both actuators resting.
    SavingMode = 2,
}

// ---------------------------------------------------------------------------
// Transition table entry
// ---------------------------------------------------------------------------

/// One row of the transition table: "in `from`, when `guard` holds, run
/// `action` and move to `to`".
///
/// Guards and actions are tagged variants rather than raw function
/// pointers, so the table stays data that *describes* behaviour and the
/// engine stays free of per-state logic.
pub struct Transition {
    pub from: StateId,
    pub guard: Guard,
    pub to: StateId,
    pub action: Action,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Holds the current state and a borrowed, immutable transition table.
/// The table is fixed for the engine's lifetime — reconfiguring the
/// machine means building a different table, never touching the scan
/// logic.
pub struct Fsm<'t> {
    table: &'t [Transition],
    current: StateId,
    /// Monotonically increasing poll counter.
    polls: u64,
    /// Total transitions fired since construction.
    transitions: u64,
}

impl<'t> Fsm<'t> {
    /// Construct an engine over `table`, starting in `initial`.
    /// No action is invoked; callers that need a known-safe hardware
    /// state run the appropriate action explicitly before the first poll.
    pub fn new(table: &'t [Transition], initial: StateId) -> Self {
        Self {
            table,
            current: initial,
            polls: 0,
            transitions: 0,
        }
    }

    /// Construct an engine starting in the first entry's `from` state.
    /// Returns `None` for an empty table — the only failure mode of a
    /// statically allocated engine.
    pub fn from_table(table: &'t [Transition]) -> Option<Self> {
        let initial = table.first()?.from;
        Some(Self::new(table, initial))
    }

    /// Run one evaluation pass against the current flags.
    ///
    /// Scans the table in order; on the first entry matching the current
    /// state with a true guard, runs the action and commits the new
    /// state. Returns the destination state if a transition fired.
    pub fn poll(
        &mut self,
        ctx: &mut FsmContext<'_>,
        hw: &mut impl ActuatorPort,
    ) -> Option<StateId> {
        self.polls += 1;
        self.update_bookkeeping(ctx);

        for entry in self.table {
            if entry.from != self.current {
                continue;
            }
            if !entry.guard.is_met(ctx) {
                continue;
            }

            info!(
                "FSM transition: {:?} --[{:?}]--> {:?}",
                self.current, entry.guard, entry.to
            );
            entry.action.run(ctx, hw);
            self.current = entry.to;
            self.transitions += 1;
            ctx.polls_in_state = 0;
            return Some(entry.to);
        }

        None
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        self.current
    }

    /// Total polls executed.
    pub fn poll_count(&self) -> u64 {
        self.polls
    }

    /// Total transitions fired.
    pub fn transition_count(&self) -> u64 {
        self.transitions
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn update_bookkeeping(&self, ctx: &mut FsmContext<'_>) {
        ctx.total_polls = self.polls;
        ctx.polls_in_state += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::context::FsmContext;
    use super::table::{thermostat_table, Action, Guard};
    use super::*;
    use crate::config::ThermostatConfig;
    use crate::flags::{Condition, ConditionFlags};

    #[derive(Default)]
    struct MockHw {
        heater: bool,
        cooler: bool,
        calls: Vec<&'static str>,
    }

    impl ActuatorPort for MockHw {
        fn heater_on(&mut self) {
            self.heater = true;
            self.calls.push("heater_on");
        }
        fn heater_off(&mut self) {
            self.heater = false;
            self.calls.push("heater_off");
        }
        fn cooler_on(&mut self) {
            self.cooler = true;
            self.calls.push("cooler_on");
        }
        fn cooler_off(&mut self) {
            self.cooler = false;
            self.calls.push("cooler_off");
        }
        fn is_heater_on(&self) -> bool {
            self.heater
        }
        fn is_cooler_on(&self) -> bool {
            self.cooler
        }
        fn all_off(&mut self) {
            self.heater = false;
            self.cooler = false;
            self.calls.push("all_off");
        }
    }

    fn make_fsm(flags: &ConditionFlags) -> (Fsm<'static>, FsmContext<'_>) {
        let fsm = Fsm::new(thermostat_table(), StateId::SavingMode);
        let ctx = FsmContext::new(ThermostatConfig::default(), flags);
        (fsm, ctx)
    }

    #[test]
    fn starts_in_given_state() {
        let flags = ConditionFlags::new();
        let (fsm, _ctx) = make_fsm(&flags);
        assert_eq!(fsm.current_state(), StateId::SavingMode);
    }

    #[test]
    fn from_table_uses_first_entry() {
        let fsm = Fsm::from_table(thermostat_table()).unwrap();
        assert_eq!(fsm.current_state(), StateId::Cooling);
    }

    #[test]
    fn from_empty_table_is_none() {
        assert!(Fsm::from_table(&[]).is_none());
    }

    #[test]
    fn idle_poll_changes_nothing() {
        let flags = ConditionFlags::new();
        let (mut fsm, mut ctx) = make_fsm(&flags);
        let mut hw = MockHw::default();

        assert_eq!(fsm.poll(&mut ctx, &mut hw), None);
        assert_eq!(fsm.current_state(), StateId::SavingMode);
        assert!(hw.calls.is_empty());
        assert_eq!(fsm.poll_count(), 1);
        assert_eq!(fsm.transition_count(), 0);
    }

    #[test]
    fn too_cold_fires_heating() {
        let flags = ConditionFlags::new();
        let (mut fsm, mut ctx) = make_fsm(&flags);
        let mut hw = MockHw::default();

        flags.raise(Condition::TooCold);
        assert_eq!(fsm.poll(&mut ctx, &mut hw), Some(StateId::Heating));
        assert_eq!(fsm.current_state(), StateId::Heating);
        assert_eq!(hw.calls, vec!["heater_on"]);
        assert!(flags.is_clear());
    }

    #[test]
    fn first_match_wins_for_shared_from_state() {
        // SavingMode has two rows: TooCold (row 2) before TooHot (row 4).
        // With both bits set, the earlier row must win.
        let flags = ConditionFlags::new();
        let (mut fsm, mut ctx) = make_fsm(&flags);
        let mut hw = MockHw::default();

        flags.raise(Condition::TooCold);
        flags.raise(Condition::TooHot);
        assert_eq!(fsm.poll(&mut ctx, &mut hw), Some(StateId::Heating));
        // TooHot was not consumed by the heater action.
        assert!(flags.is_set(Condition::TooHot));
    }

    #[test]
    fn at_most_one_transition_per_poll() {
        // Heating with comfort AND too-hot pending: only the
        // Heating -> SavingMode row matches the current state; the
        // SavingMode -> Cooling row must wait for the next poll.
        let flags = ConditionFlags::new();
        let mut fsm = Fsm::new(thermostat_table(), StateId::Heating);
        let mut ctx = FsmContext::new(ThermostatConfig::default(), &flags);
        let mut hw = MockHw::default();

        flags.raise(Condition::ComfortReached);
        flags.raise(Condition::TooHot);

        assert_eq!(fsm.poll(&mut ctx, &mut hw), Some(StateId::SavingMode));
        assert_eq!(fsm.current_state(), StateId::SavingMode);
        assert!(flags.is_set(Condition::TooHot));
        assert_eq!(fsm.transition_count(), 1);

        assert_eq!(fsm.poll(&mut ctx, &mut hw), Some(StateId::Cooling));
        assert_eq!(fsm.current_state(), StateId::Cooling);
        assert!(flags.is_clear());
        assert_eq!(fsm.transition_count(), 2);
    }

    #[test]
    fn state_without_rows_stays_put() {
        // A one-row table whose only entry is for Cooling: polling from
        // Heating must be a no-op even with every flag raised.
        static MINI: [Transition; 1] = [Transition {
            from: StateId::Cooling,
            guard: Guard::ComfortReached,
            to: StateId::SavingMode,
            action: Action::EnterSaving,
        }];

        let flags = ConditionFlags::new();
        flags.raise(Condition::TooCold);
        flags.raise(Condition::TooHot);
        flags.raise(Condition::ComfortReached);

        let mut fsm = Fsm::new(&MINI, StateId::Heating);
        let mut ctx = FsmContext::new(ThermostatConfig::default(), &flags);
        let mut hw = MockHw::default();

        assert_eq!(fsm.poll(&mut ctx, &mut hw), None);
        assert_eq!(fsm.current_state(), StateId::Heating);
        assert!(hw.calls.is_empty());
        // Nothing consumed the flags either.
        assert_eq!(flags.snapshot(), Condition::ALL);
    }

    #[test]
    fn poll_bookkeeping_resets_on_transition() {
        let flags = ConditionFlags::new();
        let (mut fsm, mut ctx) = make_fsm(&flags);
        let mut hw = MockHw::default();

        let _ = fsm.poll(&mut ctx, &mut hw);
        let _ = fsm.poll(&mut ctx, &mut hw);
        assert_eq!(ctx.polls_in_state, 2);

        flags.raise(Condition::TooCold);
        let _ = fsm.poll(&mut ctx, &mut hw);
        assert_eq!(ctx.polls_in_state, 0);
        assert_eq!(ctx.total_polls, 3);
    }
}

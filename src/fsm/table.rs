//! Guards, actions, and the thermostat transition table.
//!
//! ```text
//!                ┌──────[TooCold / heater on]──────┐
//!                ▼                                 │
//!            HEATING ──[Comfort / all off]──▶ SAVING_MODE
//!                                              │     ▲
//!                       [TooHot / cooler on]   │     │
//!                                              ▼     │
//!                                           COOLING ─┘
//!                                    [Comfort / all off]
//! ```
//!
//! No terminal state; the machine runs for the life of the process.
//! SavingMode is the rest state: both actuators off, waiting for the
//! sampler to push the next condition.

use log::info;

use super::context::FsmContext;
use super::{StateId, Transition};
use crate::flags::Condition;
use crate::ports::ActuatorPort;

// ═══════════════════════════════════════════════════════════════════════════
//  Guards
// ═══════════════════════════════════════════════════════════════════════════

/// Trigger predicates, evaluated against the shared condition flags.
///
/// A guard answers "is this transition's trigger condition currently
/// pending?" — it reads the flags and nothing else, and never clears
/// them (clearing is the firing action's job).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// The sampler classified the last reading below the low threshold.
    TooCold,
    /// The sampler classified the last reading above the high threshold.
    TooHot,
    /// The sampler classified the last reading inside the comfort band.
    ComfortReached,
}

impl Guard {
    /// Evaluate the guard against the context's shared flags.
    pub fn is_met(&self, ctx: &FsmContext<'_>) -> bool {
        match self {
            Self::TooCold => ctx.flags.is_set(Condition::TooCold),
            Self::TooHot => ctx.flags.is_set(Condition::TooHot),
            Self::ComfortReached => ctx.flags.is_set(Condition::ComfortReached),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Actions
// ═══════════════════════════════════════════════════════════════════════════

/// Actuation effects, run exactly when their owning transition fires.
///
/// Each action drives the actuators through the port and, as its last
/// step, acknowledges exactly the flag bits its transition consumed —
/// never bits owned by unrelated transitions. The flags are
/// edge-triggered, so leaving a consumed bit set would re-fire the
/// transition on the next poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Energise the heater; consumes the cold and comfort bits.
    EngageHeater,
    /// Energise the cooler; consumes the hot and comfort bits.
    EngageCooler,
    /// Rest both actuators; consumes the comfort bit.
    EnterSaving,
}

impl Action {
    /// Execute the effect: command the actuators, then clear the
    /// consumed flag bits.
    pub fn run(&self, ctx: &mut FsmContext<'_>, hw: &mut impl ActuatorPort) {
        match self {
            Self::EngageHeater => {
                hw.heater_on();
                ctx.flags
                    .acknowledge(Condition::TooCold.mask() | Condition::ComfortReached.mask());
                info!("ACTION: heater engaged");
            }
            Self::EngageCooler => {
                hw.cooler_on();
                ctx.flags
                    .acknowledge(Condition::TooHot.mask() | Condition::ComfortReached.mask());
                info!("ACTION: cooler engaged");
            }
            Self::EnterSaving => {
                hw.heater_off();
                hw.cooler_off();
                // Cold/hot bits belong to the SavingMode exit rows and
                // must survive; a pending hot bit fires cooling on the
                // very next poll instead of waiting out a sample period.
                ctx.flags.acknowledge(Condition::ComfortReached.mask());
                info!("ACTION: saving mode, both actuators off");
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  The thermostat table
// ═══════════════════════════════════════════════════════════════════════════

/// The thermostat's declarative program.
///
/// Scan order is significant: SavingMode deliberately lists TooCold
/// before TooHot, so if both conditions are somehow pending, heating
/// wins the poll and the untouched hot bit waits for the next
/// SavingMode visit.
/// The two ComfortReached rows are intentionally distinct entries —
/// two source states sharing a trigger, not a duplicate to merge.
static THERMOSTAT_TABLE: [Transition; 4] = [
    Transition {
        from: StateId::Cooling,
        guard: Guard::ComfortReached,
        to: StateId::SavingMode,
        action: Action::EnterSaving,
    },
    Transition {
        from: StateId::SavingMode,
        guard: Guard::TooCold,
        to: StateId::Heating,
        action: Action::EngageHeater,
    },
    Transition {
        from: StateId::Heating,
        guard: Guard::ComfortReached,
        to: StateId::SavingMode,
        action: Action::EnterSaving,
    },
    Transition {
        from: StateId::SavingMode,
        guard: Guard::TooHot,
        to: StateId::Cooling,
        action: Action::EngageCooler,
    },
];

/// The static thermostat transition table.
pub fn thermostat_table() -> &'static [Transition] {
    &THERMOSTAT_TABLE
}

//! Shared context threaded through every guard and action.
//!
//! `FsmContext` is the blackboard the table entries work against: the
//! borrowed condition flags (the only state today's guards consult),
//! the live configuration, and poll bookkeeping maintained by the engine.

use crate::config::ThermostatConfig;
use crate::flags::ConditionFlags;

/// The context passed to every guard and action.
///
/// Borrows the shared [`ConditionFlags`] for the engine's lifetime; the
/// same instance is borrowed by the condition sampler on the producer
/// side, which makes the sharing relationship explicit in both
/// constructor signatures.
pub struct FsmContext<'a> {
    /// Shared condition bitset (producer: sampler, consumer: actions).
    pub flags: &'a ConditionFlags,
    /// System configuration (tunable parameters).
    pub config: ThermostatConfig,
    /// Monotonic total poll count, maintained by the engine.
    pub total_polls: u64,
    /// Polls since the current state was entered, maintained by the engine.
    pub polls_in_state: u64,
}

impl<'a> FsmContext<'a> {
    /// Create a new context borrowing the shared flags.
    pub fn new(config: ThermostatConfig, flags: &'a ConditionFlags) -> Self {
        Self {
            flags,
            config,
            total_polls: 0,
            polls_in_state: 0,
        }
    }
}

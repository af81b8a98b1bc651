//! Interrupt-to-poll-loop condition handoff.
//!
//! The periodic sampler classifies each temperature reading and publishes
//! the result as one bit in a shared bitset. The FSM guards read those
//! bits; the transition actions clear them once consumed.
//!
//! ```text
//! ┌──────────────┐  fetch_or   ┌─────────────────┐  load    ┌───────────┐
//! │ Sampler      │────────────▶│ ConditionFlags  │─────────▶│ FSM poll  │
//! │ (timer ctx)  │             │ (AtomicU8)      │◀─────────│ (main     │
//! └──────────────┘             └─────────────────┘ fetch_and│  loop)    │
//!                                                           └───────────┘
//! ```
//!
//! Flags are edge-triggered: a bit means "this condition was observed
//! since it was last acknowledged", not a continuous level. The producer
//! only ever ORs bits in; consumers only ever AND bits out. Because both
//! sides are single atomic read-modify-write operations, a set and a
//! clear can never interleave into a lost update.

use core::sync::atomic::{AtomicU8, Ordering};

/// One classified temperature condition. Each variant owns one bit of the
/// shared mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Condition {
    /// Reading below the low threshold — heating is wanted.
    TooCold = 0b0000_0001,
    /// Reading above the high threshold — cooling is wanted.
    TooHot = 0b0000_0010,
    /// Reading inside the comfort band — actuators may rest.
    ComfortReached = 0b0000_0100,
}

impl Condition {
    /// Return the bitmask for this condition.
    pub const fn mask(self) -> u8 {
        self as u8
    }

    /// Mask covering every condition bit.
    pub const ALL: u8 = Condition::TooCold.mask()
        | Condition::TooHot.mask()
        | Condition::ComfortReached.mask();
}

impl core::fmt::Display for Condition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TooCold => write!(f, "too cold"),
            Self::TooHot => write!(f, "too hot"),
            Self::ComfortReached => write!(f, "comfort band"),
        }
    }
}

/// The shared condition bitset.
///
/// `const fn new()` so the instance can live in a `static` and be borrowed
/// by both execution contexts; the sharing relationship is visible in the
/// sampler's and the engine's constructor signatures rather than hidden
/// behind a process-wide mutable global.
///
/// Roles: exactly one writer (the sampler, preemptive timer context) and
/// one reader/clearer (the FSM actions, main-loop context).
#[derive(Debug)]
pub struct ConditionFlags {
    bits: AtomicU8,
}

impl ConditionFlags {
    /// Create an empty flag set. Zero-initialised, lives for the process.
    pub const fn new() -> Self {
        Self {
            bits: AtomicU8::new(0),
        }
    }

    /// Publish a condition. Single atomic OR — safe from interrupt/timer
    /// context, cannot race with a concurrent [`acknowledge`].
    ///
    /// [`acknowledge`]: Self::acknowledge
    pub fn raise(&self, condition: Condition) {
        let _ = self.bits.fetch_or(condition.mask(), Ordering::Release);
    }

    /// Check whether a condition bit is currently set.
    pub fn is_set(&self, condition: Condition) -> bool {
        self.bits.load(Ordering::Acquire) & condition.mask() != 0
    }

    /// Clear the given bits after the owning action has consumed them.
    /// Single atomic AND with the complement; bits raised concurrently by
    /// the producer and not covered by `mask` survive untouched.
    pub fn acknowledge(&self, mask: u8) {
        let _ = self.bits.fetch_and(!mask, Ordering::AcqRel);
    }

    /// Raw snapshot of the pending bits (telemetry / tests).
    pub fn snapshot(&self) -> u8 {
        self.bits.load(Ordering::Acquire)
    }

    /// True if no condition is pending.
    pub fn is_clear(&self) -> bool {
        self.snapshot() == 0
    }
}

impl Default for ConditionFlags {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_clear() {
        let flags = ConditionFlags::new();
        assert!(flags.is_clear());
        assert_eq!(flags.snapshot(), 0);
    }

    #[test]
    fn raise_sets_only_one_bit() {
        let flags = ConditionFlags::new();
        flags.raise(Condition::TooCold);
        assert!(flags.is_set(Condition::TooCold));
        assert!(!flags.is_set(Condition::TooHot));
        assert!(!flags.is_set(Condition::ComfortReached));
    }

    #[test]
    fn raise_is_idempotent() {
        let flags = ConditionFlags::new();
        flags.raise(Condition::TooHot);
        flags.raise(Condition::TooHot);
        assert_eq!(flags.snapshot(), Condition::TooHot.mask());
    }

    #[test]
    fn acknowledge_clears_only_requested_bits() {
        let flags = ConditionFlags::new();
        flags.raise(Condition::TooCold);
        flags.raise(Condition::TooHot);
        flags.acknowledge(Condition::TooCold.mask() | Condition::ComfortReached.mask());
        assert!(!flags.is_set(Condition::TooCold));
        assert!(flags.is_set(Condition::TooHot));
    }

    #[test]
    fn condition_masks_are_disjoint() {
        let all = [
            Condition::TooCold,
            Condition::TooHot,
            Condition::ComfortReached,
        ];
        for a in all {
            for b in all {
                if a != b {
                    assert_eq!(a.mask() & b.mask(), 0);
                }
            }
        }
        assert_eq!(
            Condition::ALL,
            all.iter().fold(0, |acc, c| acc | c.mask())
        );
    }

    #[test]
    fn writer_and_reader_interleave_without_lost_updates() {
        // The producer raises while the consumer acknowledges a different
        // bit: the raised bit must survive the acknowledge.
        let flags = ConditionFlags::new();
        flags.raise(Condition::ComfortReached);
        flags.raise(Condition::TooHot);
        flags.acknowledge(Condition::ComfortReached.mask());
        assert!(flags.is_set(Condition::TooHot));
        assert!(!flags.is_set(Condition::ComfortReached));
    }
}

//! Relay driver for the heater and cooler outputs.
//!
//! A dumb single-pin actuator: the safety story (never heat and cool at
//! once) lives in the transition table, not here.
//!
//! ## Idempotence contract
//!
//! Commanding the relay into the state it already holds performs no
//! hardware write. Relays are electromechanical — redundant writes cost
//! nothing electrically but the skip keeps the contract observable:
//! `write_count` advances only on real edges.
//!
//! ## Host-simulation design
//!
//! On a real board `write_gpio` would drive the output latch; on the
//! host the pin level lives in the struct.

use log::info;

/// One latching relay output.
pub struct RelayDriver {
    label: &'static str,
    _gpio: i32,
    energised: bool,
    writes: u32,
}

impl RelayDriver {
    /// Bind a relay to a GPIO. Starts de-energised without writing the
    /// pin; callers force a known state at startup.
    pub fn new(label: &'static str, gpio: i32) -> Self {
        Self {
            label,
            _gpio: gpio,
            energised: false,
            writes: 0,
        }
    }

    /// Command the relay. No-op if already in the requested state.
    pub fn set(&mut self, on: bool) {
        if on == self.energised {
            return;
        }
        self.write_gpio(on);
        self.energised = on;
        info!(
            "{}: {}",
            self.label,
            if on { "energised" } else { "released" }
        );
    }

    /// Energise the relay.
    pub fn on(&mut self) {
        self.set(true);
    }

    /// De-energise the relay.
    pub fn off(&mut self) {
        self.set(false);
    }

    /// Current commanded state.
    pub fn is_on(&self) -> bool {
        self.energised
    }

    /// Number of actual pin writes performed (edges, not commands).
    pub fn write_count(&self) -> u32 {
        self.writes
    }

    fn write_gpio(&mut self, _high: bool) {
        // Host simulation: the level is tracked in `energised`.
        // On hardware this is the single output-latch write.
        self.writes += 1;
    }
}

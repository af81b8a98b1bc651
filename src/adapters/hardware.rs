//! Hardware adapter implementing [`ActuatorPort`] over the relay pair.

use crate::drivers::relay::RelayDriver;
use crate::ports::ActuatorPort;

/// Owns both actuator drivers and presents them as one port.
pub struct HardwareAdapter {
    heater: RelayDriver,
    cooler: RelayDriver,
}

impl HardwareAdapter {
    pub fn new(heater: RelayDriver, cooler: RelayDriver) -> Self {
        Self { heater, cooler }
    }
}

impl ActuatorPort for HardwareAdapter {
    fn heater_on(&mut self) {
        self.heater.on();
    }

    fn heater_off(&mut self) {
        self.heater.off();
    }

    fn cooler_on(&mut self) {
        self.cooler.on();
    }

    fn cooler_off(&mut self) {
        self.cooler.off();
    }

    fn is_heater_on(&self) -> bool {
        self.heater.is_on()
    }

    fn is_cooler_on(&self) -> bool {
        self.cooler.is_on()
    }

    fn all_off(&mut self) {
        self.heater.off();
        self.cooler.off();
    }
}

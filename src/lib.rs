//! Thermostat firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. Hardware access is confined to the adapter/driver layer
//! behind port traits, so the whole control core runs on the host.

#![deny(unused_must_use)]

pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod flags;
pub mod fsm;
pub mod ports;

pub mod adapters;
pub mod drivers;
pub mod pins;
pub mod sensors;

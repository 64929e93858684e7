//! SoilWatch firmware library.
//!
//! Exposes the cycle logic and its adapters for integration testing.
//! All ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module; on the host the drivers fall back to simulation.

#![deny(unused_must_use)]

pub mod app;
pub mod classifier;
pub mod config;
pub mod display;
pub mod error;
pub mod fsm;
pub mod pins;
pub mod power;
pub mod readings;
pub mod scheduler;
pub mod sensors;

pub mod adapters;
pub mod drivers;

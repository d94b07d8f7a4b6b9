//! AquaSentry firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod alarm;
pub mod app;
pub mod config;
pub mod dashboard;
pub mod hazard;
pub mod timing;
pub mod uplink;

pub mod error;
pub mod pins;

// Re-export the ESP-IDF-backed modules so the crate compiles on every
// target; the hardware implementations are cfg-gated inside.
pub mod adapters;
pub mod drivers;
pub mod sensors;

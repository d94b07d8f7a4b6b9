//! Resistive rain plate on ADC1.
//!
//! Raw 12-bit reading, inverted scale: water bridging the traces lowers
//! the resistance, so lower values mean heavier rain. The raw code goes
//! straight into classification and telemetry; tiering happens in the
//! hazard module against the configured thresholds.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

#[cfg(not(target_os = "espidf"))]
static SIM_RAIN_RAW: AtomicU16 = AtomicU16::new(4095);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_raw(raw: u16) {
    SIM_RAIN_RAW.store(raw, Ordering::Relaxed);
}

pub struct RainPlate;

impl RainPlate {
    pub const fn new() -> Self {
        Self
    }

    #[cfg(target_os = "espidf")]
    pub fn read_raw(&mut self) -> u16 {
        hw_init::adc1_read(hw_init::ADC1_CH_RAIN)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read_raw(&mut self) -> u16 {
        SIM_RAIN_RAW.load(Ordering::Relaxed)
    }
}

impl Default for RainPlate {
    fn default() -> Self {
        Self::new()
    }
}

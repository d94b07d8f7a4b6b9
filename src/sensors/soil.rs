//! Capacitive soil moisture probe on ADC1.
//!
//! The probe reads high when dry and low when wet. [`soil_percent`] maps
//! the raw code onto a calibrated 0..=100% scale using the configured
//! dry/wet endpoints, clamping readings outside the calibration window
//! (probe in open air, or submerged).

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

use crate::config::SystemConfig;
#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

#[cfg(not(target_os = "espidf"))]
static SIM_SOIL_RAW: AtomicU16 = AtomicU16::new(3175);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_raw(raw: u16) {
    SIM_SOIL_RAW.store(raw, Ordering::Relaxed);
}

/// Map a raw probe code onto the calibrated moisture scale.
///
/// Integer arithmetic on purpose: the percent feeds threshold comparisons
/// and a 16-character display, nothing needs sub-percent resolution.
pub fn soil_percent(raw: u16, config: &SystemConfig) -> u8 {
    let dry = config.soil_dry_raw as i32;
    let wet = config.soil_wet_raw as i32;
    let span = dry - wet;
    if span <= 0 {
        return 0;
    }
    let pct = (dry - raw as i32) * 100 / span;
    pct.clamp(0, 100) as u8
}

pub struct SoilProbe;

impl SoilProbe {
    pub const fn new() -> Self {
        Self
    }

    #[cfg(target_os = "espidf")]
    pub fn read_raw(&mut self) -> u16 {
        hw_init::adc1_read(hw_init::ADC1_CH_SOIL)
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn read_raw(&mut self) -> u16 {
        SIM_SOIL_RAW.load(Ordering::Relaxed)
    }
}

impl Default for SoilProbe {
    fn default() -> Self {
        Self::new()
    }
}

//! System configuration parameters.
//!
//! All tunable thresholds and periods for the AquaSentry monitor.  The
//! defaults reproduce the field-calibrated values of the deployed unit;
//! there is no runtime calibration beyond this fixed linear mapping.

use serde::{Deserialize, Serialize};

/// Core system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Water level (ultrasonic, distance to surface) ---
    /// Distance below which the water level alone means DANGER (cm).
    pub water_danger_cm: f32,
    /// Distance below which the level is marginal — rain/soil may
    /// escalate to DANGER, or the level alone means WARNING (cm).
    pub water_warn_cm: f32,

    // --- Rain sensor (raw ADC, lower = wetter) ---
    /// Raw ADC value below which rain counts as heavy.
    pub rain_heavy_raw: u16,
    /// Raw ADC value below which rain counts as moderate.
    pub rain_light_raw: u16,

    // --- Soil moisture calibration (raw ADC) ---
    /// ADC reading of bone-dry soil (maps to 0 %).
    pub soil_dry_raw: u16,
    /// ADC reading of saturated soil (maps to 100 %).
    pub soil_wet_raw: u16,
    /// Soil percentage above which soil corroborates DANGER.
    pub soil_danger_pct: u8,
    /// Soil percentage above which soil alone means WARNING.
    pub soil_warn_pct: u8,

    // --- Timing ---
    /// Sensor sampling period (milliseconds).
    pub sample_interval_ms: u32,
    /// Live-state upload period when no state change forces one (ms).
    pub upload_interval_ms: u32,
    /// History logging period outside of DANGER (ms).
    pub history_interval_ms: u32,
    /// Dashboard page-flip period (ms).
    pub screen_interval_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Water level
            water_danger_cm: 45.0,
            water_warn_cm: 55.0,

            // Rain
            rain_heavy_raw: 1500,
            rain_light_raw: 2500,

            // Soil
            soil_dry_raw: 3175,
            soil_wet_raw: 2000,
            soil_danger_pct: 80,
            soil_warn_pct: 50,

            // Timing
            sample_interval_ms: 100,
            upload_interval_ms: 5_000,
            history_interval_ms: 300_000,
            screen_interval_ms: 3_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_sane() {
        let c = SystemConfig::default();
        assert!(c.water_danger_cm < c.water_warn_cm);
        assert!(c.rain_heavy_raw < c.rain_light_raw);
        assert!(c.soil_wet_raw < c.soil_dry_raw);
        assert!(c.soil_warn_pct < c.soil_danger_pct);
        assert!(c.soil_danger_pct <= 100);
    }

    #[test]
    fn timing_ratios_make_sense() {
        let c = SystemConfig::default();
        assert!(
            c.sample_interval_ms < c.screen_interval_ms,
            "sampling must outpace the display flip"
        );
        assert!(
            c.upload_interval_ms < c.history_interval_ms,
            "live uploads must be denser than history logs"
        );
    }

    #[test]
    fn serde_roundtrip() {
        let c = SystemConfig::default();
        let json = serde_json::to_string(&c).unwrap();
        let c2: SystemConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(c.rain_heavy_raw, c2.rain_heavy_raw);
        assert_eq!(c.history_interval_ms, c2.history_interval_ms);
        assert!((c.water_danger_cm - c2.water_danger_cm).abs() < 0.001);
    }
}

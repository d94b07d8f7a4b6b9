//! Sensor drivers and the sampling hub.
//!
//! Three inputs feed one [`Reading`](crate::hazard::Reading):
//!
//! | Module       | Sensor                         | Output              |
//! |--------------|--------------------------------|---------------------|
//! | `ultrasonic` | HC-SR04 ranger                 | distance (cm)       |
//! | `rain`       | resistive rain plate (ADC)     | raw 0..=4095        |
//! | `soil`       | capacitive moisture probe (ADC)| calibrated percent  |
//!
//! Each module is dual-target: real peripheral access on ESP-IDF, an
//! atomics-backed simulation off-target so the hub is host-testable.

pub mod rain;
pub mod soil;
pub mod ultrasonic;

use crate::config::SystemConfig;
use crate::hazard::Reading;

/// Reported when the ultrasonic echo never arrives.  Far beyond any real
/// water level, so a lost echo always classifies as SAFE on the water rule.
pub const DISTANCE_SENTINEL_CM: f32 = 999.0;

/// Owns the three sensor drivers and produces normalized readings.
pub struct SensorHub {
    ultrasonic: ultrasonic::UltrasonicRanger,
    rain: rain::RainPlate,
    soil: soil::SoilProbe,
}

impl SensorHub {
    pub fn new() -> Self {
        Self {
            ultrasonic: ultrasonic::UltrasonicRanger::new(),
            rain: rain::RainPlate::new(),
            soil: soil::SoilProbe::new(),
        }
    }

    /// Take one full sample.  Blocks for the echo wait, bounded at 30 ms.
    pub fn read_all(&mut self, config: &SystemConfig) -> Reading {
        let distance_cm = self
            .ultrasonic
            .measure_cm()
            .unwrap_or(DISTANCE_SENTINEL_CM);
        Reading {
            distance_cm,
            rain_raw: self.rain.read_raw(),
            soil_pct: soil::soil_percent(self.soil.read_raw(), config),
        }
    }
}

impl Default for SensorHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;
    use crate::error::SensorError;

    // Single test: the sim values are process-global statics, so the
    // scenarios run sequentially to avoid cross-talk.
    #[test]
    fn hub_normalizes_and_degrades() {
        let mut hub = SensorHub::new();
        let config = SystemConfig::default();

        ultrasonic::sim_set_echo_us(2_915); // ~50 cm round trip
        rain::sim_set_raw(3000);
        soil::sim_set_raw(2000); // calibrated fully wet
        let reading = hub.read_all(&config);
        assert!((reading.distance_cm - 50.0).abs() < 0.1);
        assert_eq!(reading.rain_raw, 3000);
        assert_eq!(reading.soil_pct, 100);

        // A lost echo surfaces as a typed timeout from the driver and
        // degrades to the sentinel at the hub.
        ultrasonic::sim_set_echo_us(0);
        let mut ranger = ultrasonic::UltrasonicRanger::new();
        assert_eq!(ranger.measure_cm(), Err(SensorError::EchoTimeout));
        let reading = hub.read_all(&config);
        assert_eq!(reading.distance_cm, DISTANCE_SENTINEL_CM);
    }
}

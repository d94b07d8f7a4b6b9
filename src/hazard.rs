//! Hazard model: the normalized reading, the three-level state, and the
//! pure classification rule that fuses the sensors.
//!
//! Water level is the dominant signal — the ultrasonic ranger measures
//! distance *down* to the surface, so smaller numbers mean less headroom.
//! Rain and soil corroborate: once the level is marginal they can escalate
//! to DANGER, and independently they can raise WARNING.
//!
//! There is deliberately no hysteresis around any threshold: the state may
//! flap tick-to-tick when a reading oscillates on a boundary.  That matches
//! the deployed unit; smoothing would change observable behaviour.

use crate::config::SystemConfig;

// ---------------------------------------------------------------------------
// Reading
// ---------------------------------------------------------------------------

/// One normalized sensor sample.  Recomputed on the sampling cadence and
/// held as the process-wide "latest" until the next sample overwrites it.
#[derive(Debug, Clone, Copy)]
pub struct Reading {
    /// Distance to the water surface (cm).  999.0 is the timeout sentinel:
    /// no echo within the ranging window, read as "no water nearby".
    pub distance_cm: f32,
    /// Raw rain-plate ADC value (0–4095, lower = wetter).
    pub rain_raw: u16,
    /// Soil moisture, 0–100 %, clamped linear map of the probe ADC.
    pub soil_pct: u8,
}

impl Default for Reading {
    fn default() -> Self {
        // Boot values: dry plate, dry soil, nothing in ranging distance.
        Self {
            distance_cm: 0.0,
            rain_raw: 4095,
            soil_pct: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Hazard state
// ---------------------------------------------------------------------------

/// The system's primary derived output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HazardState {
    Safe = 0,
    Warning = 1,
    Danger = 2,
}

impl HazardState {
    /// Status label used on the dashboard and in every uploaded record.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Safe => "SAFE",
            Self::Warning => "WARNING",
            Self::Danger => "DANGER",
        }
    }
}

// ---------------------------------------------------------------------------
// Rain intensity tiers
// ---------------------------------------------------------------------------

/// Rain intensity buckets.  These share the classifier's thresholds by
/// construction — both read the same config fields — so the dashboard's
/// tiers can never drift from the escalation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RainTier {
    Heavy,
    Moderate,
    NoneOrLight,
}

impl RainTier {
    pub fn from_raw(rain_raw: u16, config: &SystemConfig) -> Self {
        if rain_raw < config.rain_heavy_raw {
            Self::Heavy
        } else if rain_raw < config.rain_light_raw {
            Self::Moderate
        } else {
            Self::NoneOrLight
        }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Fuse one reading into a hazard state.
///
/// Rules in strict priority order, first match wins:
///
/// 1. level below the danger line → DANGER;
/// 2. level below the warning line AND (heavy rain OR saturated soil)
///    → DANGER;
/// 3. level below the warning line OR moderate rain OR damp soil
///    → WARNING;
/// 4. otherwise SAFE.
///
/// Total over all inputs; the 999 cm sentinel can therefore never reach
/// DANGER on the strength of rain or soil alone.
pub fn classify(reading: &Reading, config: &SystemConfig) -> HazardState {
    let Reading {
        distance_cm,
        rain_raw,
        soil_pct,
    } = *reading;

    if distance_cm < config.water_danger_cm {
        HazardState::Danger
    } else if distance_cm < config.water_warn_cm
        && (rain_raw < config.rain_heavy_raw || soil_pct > config.soil_danger_pct)
    {
        HazardState::Danger
    } else if distance_cm < config.water_warn_cm
        || rain_raw < config.rain_light_raw
        || soil_pct > config.soil_warn_pct
    {
        HazardState::Warning
    } else {
        HazardState::Safe
    }
}

//! Dashboard presenter — alternates two pages on the 16×2 LCD.
//!
//! Page A shows the hazard status and the water/soil figures; page B shows
//! the rain intensity tier.  The page flips every 3 s (configurable) and
//! both lines are re-rendered on each flip.  The rain tiers reuse the
//! classifier's thresholds via [`RainTier`] — they are the same config
//! fields, so the two decisions cannot drift apart.

use core::fmt::Write as _;

use heapless::String;

use crate::app::ports::DisplayPort;
use crate::config::SystemConfig;
use crate::hazard::{HazardState, RainTier, Reading};
use crate::timing::PeriodicGate;

/// One 16-character display line.
pub type Line = String<16>;

/// The dashboard page-flip state machine.  Owns the page toggle and its
/// timer exclusively.
#[derive(Debug)]
pub struct DashboardPresenter {
    gate: PeriodicGate,
    status_page: bool,
}

impl DashboardPresenter {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            gate: PeriodicGate::new(config.screen_interval_ms),
            // Starts true so the first flip lands on the rain page,
            // matching the deployed unit's boot behaviour.
            status_page: true,
        }
    }

    /// Flip and re-render if the period elapsed; otherwise do nothing.
    pub fn tick(
        &mut self,
        now_ms: u32,
        reading: &Reading,
        state: HazardState,
        config: &SystemConfig,
        display: &mut impl DisplayPort,
    ) {
        if !self.gate.poll(now_ms) {
            return;
        }
        self.status_page = !self.status_page;

        let (line1, line2) = if self.status_page {
            Self::status_page(reading, state)
        } else {
            Self::rain_page(reading, config)
        };
        display.render(&line1, &line2);
    }

    /// Page A: hazard status and water/soil figures.
    pub fn status_page(reading: &Reading, state: HazardState) -> (Line, Line) {
        let mut line1 = Line::new();
        let _ = line1.push_str(match state {
            HazardState::Danger => "STATUS: DANGER!",
            HazardState::Warning => "STATUS: WARNING",
            HazardState::Safe => "STATUS: SAFE",
        });

        let mut line2 = Line::new();
        // Distance is integer-truncated for the 16-character line.
        let _ = write!(
            line2,
            "W:{}cm S:{}%",
            reading.distance_cm as i32, reading.soil_pct
        );
        (line1, line2)
    }

    /// Page B: rain intensity tier.
    pub fn rain_page(reading: &Reading, config: &SystemConfig) -> (Line, Line) {
        let mut line1 = Line::new();
        let _ = line1.push_str("Rain Intensity:");

        let mut line2 = Line::new();
        let _ = line2.push_str(match RainTier::from_raw(reading.rain_raw, config) {
            RainTier::Heavy => ">> HEAVY <<",
            RainTier::Moderate => ">> Moderate <<",
            RainTier::NoneOrLight => ">> None/Light <<",
        });
        (line1, line2)
    }
}

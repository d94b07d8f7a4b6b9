//! Upload coordinator — decides *when* to talk to the remote datastore.
//!
//! Two independent schedules, both owned exclusively by this module:
//!
//! - **Live state**: four scalar writes (water, soil, rain, status) fired
//!   when the upload period elapses *or* immediately on a hazard-state
//!   change, whichever comes first.
//! - **History**: one appended record fired when the history period
//!   elapses *or* on every evaluation while the state is DANGER.  The
//!   DANGER path is deliberately level-triggered: sustained danger logs a
//!   dense trace, one record per evaluation, not just the entry edge.
//!
//! Everything is best effort.  A failed write is logged and dropped; a
//! partial live upload does not roll back; nothing retries.  While the
//! link reports not-ready the coordinator does nothing at all — timers
//! and the previous-state latch stay frozen, so the first evaluation on a
//! usable link counts as a state change and uploads immediately.

use log::{info, warn};

use crate::app::events::{AppEvent, HistoryRecord};
use crate::app::ports::{EventSink, LiveField, TelemetryPort, WallClock};
use crate::config::SystemConfig;
use crate::hazard::{HazardState, Reading};
use crate::timing::PeriodicGate;

/// The upload decision logic.  Owns the two upload timestamps and the
/// previous-state slot; nothing else reads or writes them.
#[derive(Debug)]
pub struct UploadCoordinator {
    live_gate: PeriodicGate,
    history_gate: PeriodicGate,
    /// State at the previous fired live upload.  `None` until the first
    /// upload, so the first evaluation always fires.
    last_state: Option<HazardState>,
}

impl UploadCoordinator {
    pub fn new(config: &SystemConfig) -> Self {
        Self {
            live_gate: PeriodicGate::new(config.upload_interval_ms),
            history_gate: PeriodicGate::new(config.history_interval_ms),
            last_state: None,
        }
    }

    /// Evaluate both schedules once.  Call every loop iteration.
    pub fn tick(
        &mut self,
        now_ms: u32,
        reading: &Reading,
        state: HazardState,
        link: &mut impl TelemetryPort,
        clock: &impl WallClock,
        sink: &mut impl EventSink,
    ) {
        if !link.ready() {
            return;
        }

        // ── Live state ────────────────────────────────────────
        let state_changed = self.last_state != Some(state);
        if state_changed || self.live_gate.is_due(now_ms) {
            self.live_gate.mark_fired(now_ms);
            self.last_state = Some(state);

            if state_changed {
                info!("state change -> live upload ({})", state.label());
            }
            self.push_live(reading, state, link);
        }

        // ── History ───────────────────────────────────────────
        if state == HazardState::Danger || self.history_gate.is_due(now_ms) {
            self.history_gate.mark_fired(now_ms);
            self.push_history(reading, state, link, clock, sink);
        }
    }

    // ── Internal ──────────────────────────────────────────────

    /// Four independent scalar writes; one failure never blocks the rest.
    fn push_live(&self, reading: &Reading, state: HazardState, link: &mut impl TelemetryPort) {
        let fields = [
            LiveField::Water(reading.distance_cm),
            LiveField::Soil(reading.soil_pct),
            LiveField::Rain(reading.rain_raw),
            LiveField::Status(state.label()),
        ];
        for field in fields {
            if let Err(e) = link.upload_field(field) {
                warn!("live upload failed ({e}): {field:?}");
            }
        }
    }

    fn push_history(
        &self,
        reading: &Reading,
        state: HazardState,
        link: &mut impl TelemetryPort,
        clock: &impl WallClock,
        sink: &mut impl EventSink,
    ) {
        let timestamp = clock.now_formatted().unwrap_or_else(|| {
            let mut s = heapless::String::new();
            let _ = s.push_str("N/A");
            s
        });

        let record = HistoryRecord {
            water: reading.distance_cm,
            soil: reading.soil_pct,
            rain: reading.rain_raw,
            status: state.label(),
            timestamp: timestamp.clone(),
        };

        match link.append_record(&record) {
            Ok(()) => {
                info!("history log saved: {timestamp}");
                sink.emit(&AppEvent::HistoryLogged { timestamp });
            }
            Err(e) => {
                warn!("history append failed: {e}");
                sink.emit(&AppEvent::UploadFailed(e));
            }
        }
    }
}

//! Outbound application events and the persisted history record.
//!
//! The [`MonitorService`](super::service::MonitorService) emits
//! [`AppEvent`]s through the [`EventSink`](super::ports::EventSink) port.
//! Adapters on the other side decide what to do with them — log to
//! serial, mirror to a network channel, etc.

use serde::Serialize;

use crate::error::TelemetryError;
use crate::hazard::HazardState;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The monitor started (carries the initial state).
    Started(HazardState),

    /// The hazard state changed between two sample ticks.
    StateChanged { from: HazardState, to: HazardState },

    /// A history record was appended to the remote store.
    HistoryLogged { timestamp: heapless::String<20> },

    /// A best-effort network write failed (and was not retried).
    UploadFailed(TelemetryError),
}

/// The persisted/transmitted history record.  Field set is stable — this
/// is the wire shape consumed by the dashboard backend.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryRecord {
    /// Distance to the water surface (cm).
    pub water: f32,
    /// Soil moisture percentage.
    pub soil: u8,
    /// Raw rain intensity code.
    pub rain: u16,
    /// "SAFE" / "WARNING" / "DANGER".
    pub status: &'static str,
    /// "YYYY-MM-DD HH:MM:SS", or "N/A" if the clock had not synced.
    pub timestamp: heapless::String<20>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_record_wire_shape() {
        let mut timestamp = heapless::String::new();
        timestamp.push_str("2025-01-15 06:12:45").unwrap();
        let record = HistoryRecord {
            water: 42.5,
            soil: 73,
            rain: 1321,
            status: "DANGER",
            timestamp,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"water":42.5,"soil":73,"rain":1321,"status":"DANGER","timestamp":"2025-01-15 06:12:45"}"#
        );
    }
}

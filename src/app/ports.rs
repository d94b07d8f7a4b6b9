//! Port traits — the hexagonal boundary between domain logic and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (sensors, indicators, LCD, RTDB link, wall clock, event
//! sinks) implement these traits.  The monitor service consumes them via
//! generics, so the domain core never touches hardware directly.
//!
//! Every side-effecting call that can fail returns an explicit `Result`,
//! even where the core currently only logs the failure — a retry policy
//! can be layered on later without touching the core's control flow.

use crate::error::TelemetryError;
use crate::hazard::Reading;

use super::events::HistoryRecord;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this once per sampling period.
pub trait SensorPort {
    /// Take one full sample: fires the ultrasonic trigger pulse, waits for
    /// the echo (bounded ≤ 30 ms), reads both ADC channels and returns the
    /// normalized reading.  Never fails — an echo timeout comes back as
    /// the 999 cm sentinel.
    fn sample(&mut self) -> Reading;
}

// ───────────────────────────────────────────────────────────────
// Indicator port (driven adapter: domain → LEDs and buzzers)
// ───────────────────────────────────────────────────────────────

/// The two alarm tone channels.  Each channel has a fixed frequency
/// (high = 2 kHz, low = 1.5 kHz) owned by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneChannel {
    High,
    Low,
}

/// Write-side port for the local safety indicators.  Local signalling must
/// never be gated on network state, so this port is infallible.
pub trait IndicatorPort {
    /// Light exactly the LED matching `state` (green/yellow/red).
    fn set_status_leds(&mut self, state: crate::hazard::HazardState);

    /// Start a tone channel at its fixed frequency.  Idempotent.
    fn start_tone(&mut self, channel: ToneChannel);

    /// Stop a tone channel.  Idempotent.
    fn stop_tone(&mut self, channel: ToneChannel);
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → 16×2 LCD)
// ───────────────────────────────────────────────────────────────

/// Overwrite both lines of the 2×16 character display.  Lines longer than
/// 16 characters are truncated by the adapter.
pub trait DisplayPort {
    fn render(&mut self, line1: &str, line2: &str);
}

// ───────────────────────────────────────────────────────────────
// Telemetry port (driven adapter: domain → remote datastore)
// ───────────────────────────────────────────────────────────────

/// One scalar write into the live-state document.  The four fields are
/// uploaded independently; a failed write never blocks its siblings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiveField {
    /// Distance to the water surface (cm).
    Water(f32),
    /// Soil moisture percentage.
    Soil(u8),
    /// Raw rain intensity code.
    Rain(u16),
    /// Status label ("SAFE" / "WARNING" / "DANGER").
    Status(&'static str),
}

/// The remote-datastore link.  Best effort: the coordinator checks
/// [`ready`](TelemetryPort::ready) once per evaluation and otherwise
/// fires and forgets.  No retry, no backoff, no reconnection.
pub trait TelemetryPort {
    /// Whether the link was established at startup and is usable.
    fn ready(&self) -> bool;

    /// Overwrite one field of the live-state document.
    fn upload_field(&mut self, field: LiveField) -> Result<(), TelemetryError>;

    /// Append a record to the history collection (push, not overwrite).
    fn append_record(&mut self, record: &HistoryRecord) -> Result<(), TelemetryError>;
}

// ───────────────────────────────────────────────────────────────
// Wall clock port
// ───────────────────────────────────────────────────────────────

/// Formatted local time, requested only at the moment a history record is
/// assembled.  `None` until the clock has synced; the coordinator degrades
/// the timestamp to `"N/A"` and writes the record anyway.
pub trait WallClock {
    /// "YYYY-MM-DD HH:MM:SS", or `None` if not yet synced.
    fn now_formatted(&self) -> Option<heapless::String<20>>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log, a
/// future MQTT topic, etc.).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

//! Monitor service — the hexagonal core.
//!
//! [`MonitorService`] owns the sampling gate, the latest reading, the
//! hazard state and the three output components (alarm, dashboard,
//! uplink).  One call to [`tick`](MonitorService::tick) is one pass of
//! the cooperative loop, dispatching in a fixed order:
//!
//! ```text
//!  1. sample + classify      (100 ms cadence; reuses last values between)
//!  2. upload coordinator     (every pass; own 5 s / 5 min / DANGER rules)
//!  3. LEDs + alarm sequencer (every pass; alarm self-gates at 100 ms)
//!  4. dashboard presenter    (3 s page flip)
//! ```
//!
//! Components share only the immutable-per-tick reading and state; each
//! owns its timers exclusively.  Single-threaded by construction — no
//! locks, no queues, nothing blocks beyond the bounded echo wait inside
//! [`SensorPort::sample`].

use log::info;

use crate::alarm::AlarmSequencer;
use crate::config::SystemConfig;
use crate::dashboard::DashboardPresenter;
use crate::hazard::{classify, HazardState, Reading};
use crate::timing::PeriodicGate;
use crate::uplink::UploadCoordinator;

use super::events::AppEvent;
use super::ports::{DisplayPort, EventSink, IndicatorPort, SensorPort, TelemetryPort, WallClock};

/// The application service orchestrates all domain logic.
pub struct MonitorService {
    config: SystemConfig,
    sample_gate: PeriodicGate,
    /// Latest sample, reused by every consumer until the next sample tick.
    reading: Reading,
    state: HazardState,
    alarm: AlarmSequencer,
    dashboard: DashboardPresenter,
    uplink: UploadCoordinator,
    tick_count: u64,
}

impl MonitorService {
    pub fn new(config: SystemConfig) -> Self {
        let sample_gate = PeriodicGate::new(config.sample_interval_ms);
        let dashboard = DashboardPresenter::new(&config);
        let uplink = UploadCoordinator::new(&config);
        Self {
            config,
            sample_gate,
            reading: Reading::default(),
            state: HazardState::Safe,
            alarm: AlarmSequencer::new(),
            dashboard,
            uplink,
            tick_count: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce startup.  The first real sample arrives on the first
    /// gated tick.
    pub fn start(&self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started(self.state));
        info!("monitor started ({})", self.state.label());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full pass of the cooperative loop.
    ///
    /// The `hw` parameter satisfies **both** [`SensorPort`] and
    /// [`IndicatorPort`] — this avoids a double mutable borrow while
    /// keeping the port boundary explicit.
    pub fn tick(
        &mut self,
        now_ms: u32,
        hw: &mut (impl SensorPort + IndicatorPort),
        display: &mut impl DisplayPort,
        link: &mut impl TelemetryPort,
        clock: &impl WallClock,
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        // 1. Sample + classify on the sampling cadence.
        if self.sample_gate.poll(now_ms) {
            self.reading = hw.sample();
            let next = classify(&self.reading, &self.config);
            if next != self.state {
                sink.emit(&AppEvent::StateChanged {
                    from: self.state,
                    to: next,
                });
                self.state = next;
            }
        }

        // 2. Network effects — never gate the local outputs below.
        self.uplink
            .tick(now_ms, &self.reading, self.state, link, clock, sink);

        // 3. Local indicators.
        hw.set_status_leds(self.state);
        self.alarm.tick(now_ms, self.state, hw);

        // 4. Dashboard.
        self.dashboard
            .tick(now_ms, &self.reading, self.state, &self.config, display);
    }

    // ── Queries ───────────────────────────────────────────────

    /// Current hazard state.
    pub fn state(&self) -> HazardState {
        self.state
    }

    /// Latest sensor reading.
    pub fn reading(&self) -> Reading {
        self.reading
    }

    /// Total loop passes executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::{LiveField, ToneChannel};
    use crate::error::TelemetryError;

    struct MockHw {
        reading: Reading,
        samples: u32,
        leds: Option<HazardState>,
        tone_calls: Vec<(ToneChannel, bool)>,
    }

    impl MockHw {
        fn new(reading: Reading) -> Self {
            Self {
                reading,
                samples: 0,
                leds: None,
                tone_calls: Vec::new(),
            }
        }
    }

    impl SensorPort for MockHw {
        fn sample(&mut self) -> Reading {
            self.samples += 1;
            self.reading
        }
    }

    impl IndicatorPort for MockHw {
        fn set_status_leds(&mut self, state: HazardState) {
            self.leds = Some(state);
        }
        fn start_tone(&mut self, channel: ToneChannel) {
            self.tone_calls.push((channel, true));
        }
        fn stop_tone(&mut self, channel: ToneChannel) {
            self.tone_calls.push((channel, false));
        }
    }

    struct NullDisplay;
    impl DisplayPort for NullDisplay {
        fn render(&mut self, _line1: &str, _line2: &str) {}
    }

    struct OfflineLink;
    impl TelemetryPort for OfflineLink {
        fn ready(&self) -> bool {
            false
        }
        fn upload_field(&mut self, _field: LiveField) -> Result<(), TelemetryError> {
            Err(TelemetryError::NotReady)
        }
        fn append_record(
            &mut self,
            _record: &crate::app::events::HistoryRecord,
        ) -> Result<(), TelemetryError> {
            Err(TelemetryError::NotReady)
        }
    }

    struct NoClock;
    impl WallClock for NoClock {
        fn now_formatted(&self) -> Option<heapless::String<20>> {
            None
        }
    }

    #[derive(Default)]
    struct EventRecorder(Vec<AppEvent>);
    impl EventSink for EventRecorder {
        fn emit(&mut self, event: &AppEvent) {
            self.0.push(event.clone());
        }
    }

    fn safe_reading() -> Reading {
        Reading {
            distance_cm: 60.0,
            rain_raw: 3000,
            soil_pct: 10,
        }
    }

    #[test]
    fn sampling_respects_the_cadence() {
        let mut service = MonitorService::new(SystemConfig::default());
        let mut hw = MockHw::new(safe_reading());
        let mut sink = EventRecorder::default();

        // 10 ms polling over one second: ~9 samples through the 100 ms gate.
        for now in (0..1000).step_by(10) {
            service.tick(now, &mut hw, &mut NullDisplay, &mut OfflineLink, &NoClock, &mut sink);
        }
        assert_eq!(hw.samples, 9);
        assert_eq!(service.tick_count(), 100);
    }

    #[test]
    fn state_change_is_emitted_once() {
        let mut service = MonitorService::new(SystemConfig::default());
        let mut hw = MockHw::new(safe_reading());
        let mut sink = EventRecorder::default();

        for now in (0..500).step_by(10) {
            service.tick(now, &mut hw, &mut NullDisplay, &mut OfflineLink, &NoClock, &mut sink);
        }
        assert_eq!(service.state(), HazardState::Safe);

        hw.reading.distance_cm = 40.0;
        for now in (500..1000).step_by(10) {
            service.tick(now, &mut hw, &mut NullDisplay, &mut OfflineLink, &NoClock, &mut sink);
        }
        assert_eq!(service.state(), HazardState::Danger);

        let changes: Vec<_> = sink
            .0
            .iter()
            .filter(|e| matches!(e, AppEvent::StateChanged { .. }))
            .collect();
        assert_eq!(changes.len(), 1);
    }

    #[test]
    fn leds_track_state_and_alarm_fires_offline() {
        let mut service = MonitorService::new(SystemConfig::default());
        let mut hw = MockHw::new(Reading {
            distance_cm: 40.0,
            rain_raw: 3000,
            soil_pct: 10,
        });
        let mut sink = EventRecorder::default();

        // Local signalling must work with the link down.
        for now in (0..2000).step_by(10) {
            service.tick(now, &mut hw, &mut NullDisplay, &mut OfflineLink, &NoClock, &mut sink);
        }
        assert_eq!(hw.leds, Some(HazardState::Danger));
        assert!(hw
            .tone_calls
            .contains(&(ToneChannel::High, true)));
    }
}

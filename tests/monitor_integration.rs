//! Integration tests: MonitorService → ports, end to end on simulated time.
//!
//! Drives the full tick loop (10 ms steps, like the firmware loop) against
//! mock hardware and asserts the externally visible behaviour: LEDs, alarm
//! tones, LCD frames and datastore writes.

use aquasentry::app::events::{AppEvent, HistoryRecord};
use aquasentry::app::ports::{
    DisplayPort, EventSink, IndicatorPort, LiveField, SensorPort, TelemetryPort, ToneChannel,
    WallClock,
};
use aquasentry::app::service::MonitorService;
use aquasentry::config::SystemConfig;
use aquasentry::error::TelemetryError;
use aquasentry::hazard::{HazardState, Reading};

// ── Mock implementations ──────────────────────────────────────

struct MockBoard {
    reading: Reading,
    leds: Option<HazardState>,
    high_on: bool,
    low_on: bool,
    tone_calls: Vec<(ToneChannel, bool)>,
}

impl MockBoard {
    fn new(distance_cm: f32, rain_raw: u16, soil_pct: u8) -> Self {
        Self {
            reading: Reading {
                distance_cm,
                rain_raw,
                soil_pct,
            },
            leds: None,
            high_on: false,
            low_on: false,
            tone_calls: Vec::new(),
        }
    }

    fn set(&mut self, distance_cm: f32, rain_raw: u16, soil_pct: u8) {
        self.reading = Reading {
            distance_cm,
            rain_raw,
            soil_pct,
        };
    }
}

impl SensorPort for MockBoard {
    fn sample(&mut self) -> Reading {
        self.reading
    }
}

impl IndicatorPort for MockBoard {
    fn set_status_leds(&mut self, state: HazardState) {
        self.leds = Some(state);
    }

    fn start_tone(&mut self, channel: ToneChannel) {
        match channel {
            ToneChannel::High => self.high_on = true,
            ToneChannel::Low => self.low_on = true,
        }
        self.tone_calls.push((channel, true));
    }

    fn stop_tone(&mut self, channel: ToneChannel) {
        match channel {
            ToneChannel::High => self.high_on = false,
            ToneChannel::Low => self.low_on = false,
        }
        self.tone_calls.push((channel, false));
    }
}

#[derive(Default)]
struct MockScreen {
    frames: Vec<(String, String)>,
}

impl DisplayPort for MockScreen {
    fn render(&mut self, line1: &str, line2: &str) {
        self.frames.push((line1.into(), line2.into()));
    }
}

struct MockLink {
    ready: bool,
    fields: Vec<LiveField>,
    records: Vec<HistoryRecord>,
}

impl MockLink {
    fn new(ready: bool) -> Self {
        Self {
            ready,
            fields: Vec::new(),
            records: Vec::new(),
        }
    }

    fn statuses(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter_map(|f| match f {
                LiveField::Status(s) => Some(*s),
                _ => None,
            })
            .collect()
    }
}

impl TelemetryPort for MockLink {
    fn ready(&self) -> bool {
        self.ready
    }

    fn upload_field(&mut self, field: LiveField) -> Result<(), TelemetryError> {
        self.fields.push(field);
        Ok(())
    }

    fn append_record(&mut self, record: &HistoryRecord) -> Result<(), TelemetryError> {
        self.records.push(record.clone());
        Ok(())
    }
}

struct MockClock(Option<&'static str>);

impl WallClock for MockClock {
    fn now_formatted(&self) -> Option<heapless::String<20>> {
        let stamp = self.0?;
        let mut s = heapless::String::new();
        s.push_str(stamp).ok()?;
        Some(s)
    }
}

#[derive(Default)]
struct MockSink(Vec<AppEvent>);

impl EventSink for MockSink {
    fn emit(&mut self, event: &AppEvent) {
        self.0.push(event.clone());
    }
}

// ── Harness ───────────────────────────────────────────────────

struct Rig {
    service: MonitorService,
    board: MockBoard,
    screen: MockScreen,
    link: MockLink,
    clock: MockClock,
    sink: MockSink,
    now_ms: u32,
}

impl Rig {
    fn new(board: MockBoard, link_ready: bool) -> Self {
        Self {
            service: MonitorService::new(SystemConfig::default()),
            board,
            screen: MockScreen::default(),
            link: MockLink::new(link_ready),
            clock: MockClock(None),
            sink: MockSink::default(),
            now_ms: 0,
        }
    }

    /// Advance simulated time by `ms`, ticking every 10 ms like the loop.
    fn run_for(&mut self, ms: u32) {
        let end = self.now_ms + ms;
        while self.now_ms < end {
            self.now_ms += 10;
            self.service.tick(
                self.now_ms,
                &mut self.board,
                &mut self.screen,
                &mut self.link,
                &self.clock,
                &mut self.sink,
            );
        }
    }
}

// ── Scenario walk through every classification rule ───────────

#[test]
fn classification_scenarios_end_to_end() {
    let mut rig = Rig::new(MockBoard::new(60.0, 3000, 10), false);

    // Dry day, high bank clearance.
    rig.run_for(300);
    assert_eq!(rig.service.state(), HazardState::Safe);
    assert_eq!(rig.board.leds, Some(HazardState::Safe));

    // Water critically close on its own.
    rig.board.set(40.0, 3000, 10);
    rig.run_for(300);
    assert_eq!(rig.service.state(), HazardState::Danger);
    assert_eq!(rig.board.leds, Some(HazardState::Danger));

    // Marginal water + heavy rain.
    rig.board.set(50.0, 1000, 10);
    rig.run_for(300);
    assert_eq!(rig.service.state(), HazardState::Danger);

    // Marginal water + saturated soil.
    rig.board.set(50.0, 3000, 85);
    rig.run_for(300);
    assert_eq!(rig.service.state(), HazardState::Danger);

    // Marginal water alone is only a warning.
    rig.board.set(50.0, 3000, 10);
    rig.run_for(300);
    assert_eq!(rig.service.state(), HazardState::Warning);
    assert_eq!(rig.board.leds, Some(HazardState::Warning));

    // Heavy rain with good clearance: warning, not danger.
    rig.board.set(60.0, 1000, 10);
    rig.run_for(300);
    assert_eq!(rig.service.state(), HazardState::Warning);

    // Wet soil alone: warning.
    rig.board.set(60.0, 3000, 60);
    rig.run_for(300);
    assert_eq!(rig.service.state(), HazardState::Warning);

    // Everything clear again.
    rig.board.set(60.0, 3000, 10);
    rig.run_for(300);
    assert_eq!(rig.service.state(), HazardState::Safe);
    assert_eq!(rig.board.leds, Some(HazardState::Safe));
}

// ── Alarm behaviour ───────────────────────────────────────────

#[test]
fn danger_sounds_the_two_tone_alarm() {
    let mut rig = Rig::new(MockBoard::new(40.0, 3000, 10), false);

    rig.run_for(2_000);
    assert_eq!(rig.service.state(), HazardState::Danger);

    // Tone command stream starts high-on and alternates, never overlapping.
    assert_eq!(
        rig.board.tone_calls.first(),
        Some(&(ToneChannel::High, true))
    );
    assert!(rig
        .board
        .tone_calls
        .contains(&(ToneChannel::Low, true)));

    // Clearing the hazard silences everything.
    rig.board.set(60.0, 3000, 10);
    rig.run_for(300);
    assert!(!rig.board.high_on && !rig.board.low_on);

    // And no further tone traffic while it stays clear.
    let quiet_mark = rig.board.tone_calls.len();
    rig.run_for(2_000);
    assert_eq!(rig.board.tone_calls.len(), quiet_mark);
}

// ── Dashboard behaviour ───────────────────────────────────────

#[test]
fn dashboard_alternates_rain_and_status_pages() {
    let mut rig = Rig::new(MockBoard::new(60.0, 1000, 10), false);

    rig.run_for(6_500);

    // First flip (~3.1 s) lands on the rain page, second on status.
    assert!(rig.screen.frames.len() >= 2, "frames: {:?}", rig.screen.frames);
    assert_eq!(rig.screen.frames[0].0, "Rain Intensity:");
    assert_eq!(rig.screen.frames[0].1, ">> HEAVY <<");
    assert_eq!(rig.screen.frames[1].0, "STATUS: WARNING");
    assert_eq!(rig.screen.frames[1].1, "W:60cm S:10%");
}

// ── Telemetry behaviour ───────────────────────────────────────

#[test]
fn state_change_uploads_immediately() {
    let mut rig = Rig::new(MockBoard::new(60.0, 3000, 10), true);

    rig.run_for(300);
    assert_eq!(rig.link.statuses().last(), Some(&"SAFE"));

    rig.link.fields.clear();
    rig.board.set(40.0, 3000, 10);
    // Well under the 5 s upload period; the state change forces it.
    rig.run_for(200);
    assert_eq!(rig.link.statuses().first(), Some(&"DANGER"));
}

#[test]
fn sustained_danger_logs_a_dense_history_trace() {
    let mut rig = Rig::new(MockBoard::new(40.0, 3000, 10), true);
    rig.clock = MockClock(Some("2025-01-15 06:12:45"));

    rig.run_for(1_000);
    // One record per loop evaluation while DANGER holds. The state
    // flips on the first sample tick (~110 ms), so most of the 100
    // evaluations logged.
    assert!(rig.link.records.len() >= 80, "records: {}", rig.link.records.len());
    assert!(rig.link.records.iter().all(|r| r.status == "DANGER"));
    assert!(rig
        .link
        .records
        .iter()
        .all(|r| r.timestamp.as_str() == "2025-01-15 06:12:45"));
    assert!(rig
        .sink
        .0
        .iter()
        .any(|e| matches!(e, AppEvent::HistoryLogged { .. })));
}

#[test]
fn unsynced_clock_stamps_history_as_na() {
    let mut rig = Rig::new(MockBoard::new(40.0, 3000, 10), true);

    rig.run_for(500);
    assert!(!rig.link.records.is_empty());
    assert!(rig.link.records.iter().all(|r| r.timestamp.as_str() == "N/A"));
}

#[test]
fn offline_link_loses_only_telemetry() {
    let mut rig = Rig::new(MockBoard::new(40.0, 3000, 10), false);

    rig.run_for(2_000);

    // Nothing went to the network.
    assert!(rig.link.fields.is_empty());
    assert!(rig.link.records.is_empty());

    // Local signalling is fully alive.
    assert_eq!(rig.board.leds, Some(HazardState::Danger));
    assert!(rig
        .board
        .tone_calls
        .contains(&(ToneChannel::High, true)));
    assert!(!rig.screen.frames.is_empty());
}

#[test]
fn link_coming_up_triggers_an_upload_on_first_evaluation() {
    let mut rig = Rig::new(MockBoard::new(60.0, 3000, 10), false);

    rig.run_for(10_000);
    assert!(rig.link.fields.is_empty());

    rig.link.ready = true;
    rig.run_for(50);
    assert_eq!(rig.link.statuses().first(), Some(&"SAFE"));
}

//! Two-tone alarm sequencer.
//!
//! A five-step timer state machine that plays the siren pattern while the
//! hazard state is DANGER and is silent otherwise:
//!
//! ```text
//! step  0            1            2            3            4
//!       high on ──▶ (sustain) ──▶ low on ──▶ (sustain) ──▶ gap ──▶ 0 …
//!                    ≥600 ms       ≥100 ms     ≥600 ms      ≥100 ms
//! ```
//!
//! The sequencer re-evaluates at most once per 100 ms of monotonic time
//! (the outer gate), so the step durations above are re-checked on a
//! 100 ms poll granularity.  Leaving DANGER silences both tone channels
//! and resets to step 0 — exactly once per transition, not every tick.

use crate::app::ports::{IndicatorPort, ToneChannel};
use crate::hazard::HazardState;

/// Minimum time between sequencer evaluations, and the silent-gap hold.
const STEP_GATE_MS: u32 = 100;
/// How long each tone sustains before the step advances.
const TONE_HOLD_MS: u32 = 600;

/// The alarm waveform state machine.  Owns its step index and phase
/// timer exclusively; nothing else mutates them.
#[derive(Debug)]
pub struct AlarmSequencer {
    /// Current step, 0..=4.
    step: u8,
    /// Monotonic time at which the current step was entered.
    phase_started_ms: u32,
    /// Whether the sequencer has output to cancel on leaving DANGER.
    sounding: bool,
}

impl AlarmSequencer {
    pub const fn new() -> Self {
        Self {
            step: 0,
            phase_started_ms: 0,
            sounding: false,
        }
    }

    /// Advance the waveform.  Call every loop iteration; the outer gate
    /// makes extra calls free.
    pub fn tick(&mut self, now_ms: u32, state: HazardState, out: &mut impl IndicatorPort) {
        if state != HazardState::Danger {
            if self.sounding {
                out.stop_tone(ToneChannel::High);
                out.stop_tone(ToneChannel::Low);
                self.step = 0;
                self.sounding = false;
            }
            return;
        }

        let elapsed = now_ms.wrapping_sub(self.phase_started_ms);
        if elapsed <= STEP_GATE_MS {
            return;
        }

        match self.step {
            0 => {
                out.start_tone(ToneChannel::High);
                self.sounding = true;
                self.phase_started_ms = now_ms;
                self.step = 1;
            }
            1 if elapsed > TONE_HOLD_MS => {
                out.stop_tone(ToneChannel::High);
                self.phase_started_ms = now_ms;
                self.step = 2;
            }
            2 => {
                out.start_tone(ToneChannel::Low);
                self.phase_started_ms = now_ms;
                self.step = 3;
            }
            3 if elapsed > TONE_HOLD_MS => {
                out.stop_tone(ToneChannel::Low);
                self.phase_started_ms = now_ms;
                self.step = 4;
            }
            4 => {
                // Silent gap served by the outer gate; the timer is left
                // alone so step 0 fires on the very next evaluation.
                self.step = 0;
            }
            _ => {}
        }
    }

    /// Current step index (0..=4).
    pub fn step(&self) -> u8 {
        self.step
    }

    /// Whether the sequencer believes it has tones to cancel.
    pub fn is_sounding(&self) -> bool {
        self.sounding
    }
}

impl Default for AlarmSequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::IndicatorPort;

    /// Records tone commands and tracks live channel state.
    #[derive(Default)]
    struct ToneRecorder {
        high_on: bool,
        low_on: bool,
        calls: Vec<(ToneChannel, bool)>,
    }

    impl IndicatorPort for ToneRecorder {
        fn set_status_leds(&mut self, _state: HazardState) {}

        fn start_tone(&mut self, channel: ToneChannel) {
            match channel {
                ToneChannel::High => self.high_on = true,
                ToneChannel::Low => self.low_on = true,
            }
            self.calls.push((channel, true));
        }

        fn stop_tone(&mut self, channel: ToneChannel) {
            match channel {
                ToneChannel::High => self.high_on = false,
                ToneChannel::Low => self.low_on = false,
            }
            self.calls.push((channel, false));
        }
    }

    /// Drive the sequencer in DANGER with a 10 ms poll, recording channel
    /// state after every tick.
    fn run_danger(seq: &mut AlarmSequencer, out: &mut ToneRecorder, from_ms: u32, to_ms: u32) {
        for now in (from_ms..to_ms).step_by(10) {
            seq.tick(now, HazardState::Danger, out);
        }
    }

    #[test]
    fn full_cycle_alternates_high_then_low() {
        let mut seq = AlarmSequencer::new();
        let mut out = ToneRecorder::default();

        // Start at a time past the outer gate so step 0 fires promptly.
        run_danger(&mut seq, &mut out, 200, 2200);

        // Expected command order over at least one full cycle.
        let expected_prefix = [
            (ToneChannel::High, true),
            (ToneChannel::High, false),
            (ToneChannel::Low, true),
            (ToneChannel::Low, false),
            (ToneChannel::High, true),
        ];
        assert!(out.calls.len() >= expected_prefix.len(), "calls: {:?}", out.calls);
        assert_eq!(&out.calls[..expected_prefix.len()], &expected_prefix);
    }

    #[test]
    fn tones_never_overlap() {
        let mut seq = AlarmSequencer::new();
        let mut out = ToneRecorder::default();

        for now in (200..5000).step_by(10) {
            seq.tick(now, HazardState::Danger, &mut out);
            assert!(
                !(out.high_on && out.low_on),
                "both tones active at t={now}"
            );
        }
    }

    #[test]
    fn tone_holds_are_respected() {
        let mut seq = AlarmSequencer::new();
        let mut out = ToneRecorder::default();

        // First evaluation past the gate starts the high tone.
        seq.tick(200, HazardState::Danger, &mut out);
        assert!(out.high_on);

        // The high tone must survive the full 600 ms hold.
        run_danger(&mut seq, &mut out, 210, 800);
        assert!(out.high_on, "high tone dropped before its hold elapsed");

        // And must be gone shortly after.
        run_danger(&mut seq, &mut out, 800, 820);
        assert!(!out.high_on);
    }

    #[test]
    fn leaving_danger_silences_both_exactly_once() {
        let mut seq = AlarmSequencer::new();
        let mut out = ToneRecorder::default();

        run_danger(&mut seq, &mut out, 200, 600);
        assert!(seq.is_sounding());

        out.calls.clear();
        seq.tick(610, HazardState::Safe, &mut out);
        assert_eq!(
            out.calls,
            vec![(ToneChannel::High, false), (ToneChannel::Low, false)]
        );
        assert_eq!(seq.step(), 0);
        assert!(!seq.is_sounding());

        // Subsequent non-DANGER ticks issue no further commands.
        out.calls.clear();
        for now in (620..1000).step_by(10) {
            seq.tick(now, HazardState::Warning, &mut out);
        }
        assert!(out.calls.is_empty());
    }

    #[test]
    fn silent_until_danger() {
        let mut seq = AlarmSequencer::new();
        let mut out = ToneRecorder::default();

        for now in (0..1000).step_by(10) {
            seq.tick(now, HazardState::Warning, &mut out);
        }
        assert!(out.calls.is_empty());
        assert_eq!(seq.step(), 0);
    }

    #[test]
    fn reentering_danger_restarts_from_high_tone() {
        let mut seq = AlarmSequencer::new();
        let mut out = ToneRecorder::default();

        run_danger(&mut seq, &mut out, 200, 1100);
        seq.tick(1110, HazardState::Safe, &mut out);

        out.calls.clear();
        run_danger(&mut seq, &mut out, 1300, 1500);
        assert_eq!(out.calls.first(), Some(&(ToneChannel::High, true)));
    }
}

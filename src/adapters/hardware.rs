//! The board adapter: sensors in, indicators out.
//!
//! One struct implements both [`SensorPort`] and [`IndicatorPort`] so the
//! monitor service borrows the whole board once per tick.

use crate::app::ports::{IndicatorPort, SensorPort, ToneChannel};
use crate::config::SystemConfig;
use crate::drivers::buzzer::BuzzerDriver;
use crate::drivers::leds::StatusLeds;
use crate::hazard::{HazardState, Reading};
use crate::sensors::SensorHub;

pub struct HardwareAdapter {
    config: SystemConfig,
    hub: SensorHub,
    buzzer: BuzzerDriver,
    leds: StatusLeds,
}

impl HardwareAdapter {
    pub fn new(config: SystemConfig) -> Self {
        Self {
            config,
            hub: SensorHub::new(),
            buzzer: BuzzerDriver::new(),
            leds: StatusLeds::new(),
        }
    }

    pub fn leds(&self) -> &StatusLeds {
        &self.leds
    }

    pub fn buzzer(&self) -> &BuzzerDriver {
        &self.buzzer
    }
}

impl SensorPort for HardwareAdapter {
    fn sample(&mut self) -> Reading {
        self.hub.read_all(&self.config)
    }
}

impl IndicatorPort for HardwareAdapter {
    fn set_status_leds(&mut self, state: HazardState) {
        self.leds.show(state);
    }

    fn start_tone(&mut self, channel: ToneChannel) {
        self.buzzer.start(channel);
    }

    fn stop_tone(&mut self, channel: ToneChannel) {
        self.buzzer.stop(channel);
    }
}

//! Two-tone alarm buzzer driver.
//!
//! Two piezo elements on separate LEDC channels, each locked to one
//! frequency (high = 2 kHz, low = 1.5 kHz). "On" is a 50% duty square
//! wave; "off" is duty zero. The driver tracks channel state so the
//! start/stop calls are idempotent and testable off-target.

use crate::app::ports::ToneChannel;
use crate::drivers::hw_init;

/// 50% of the 8-bit duty range.
const DUTY_ON: u8 = 128;

pub struct BuzzerDriver {
    high_on: bool,
    low_on: bool,
}

impl BuzzerDriver {
    pub const fn new() -> Self {
        Self {
            high_on: false,
            low_on: false,
        }
    }

    pub fn start(&mut self, channel: ToneChannel) {
        match channel {
            ToneChannel::High => {
                if !self.high_on {
                    hw_init::ledc_set(hw_init::LEDC_CH_BUZZER_HIGH, DUTY_ON);
                    self.high_on = true;
                }
            }
            ToneChannel::Low => {
                if !self.low_on {
                    hw_init::ledc_set(hw_init::LEDC_CH_BUZZER_LOW, DUTY_ON);
                    self.low_on = true;
                }
            }
        }
    }

    pub fn stop(&mut self, channel: ToneChannel) {
        match channel {
            ToneChannel::High => {
                if self.high_on {
                    hw_init::ledc_set(hw_init::LEDC_CH_BUZZER_HIGH, 0);
                    self.high_on = false;
                }
            }
            ToneChannel::Low => {
                if self.low_on {
                    hw_init::ledc_set(hw_init::LEDC_CH_BUZZER_LOW, 0);
                    self.low_on = false;
                }
            }
        }
    }

    /// Whether a channel is currently driven.
    pub fn is_on(&self, channel: ToneChannel) -> bool {
        match channel {
            ToneChannel::High => self.high_on,
            ToneChannel::Low => self.low_on,
        }
    }
}

impl Default for BuzzerDriver {
    fn default() -> Self {
        Self::new()
    }
}

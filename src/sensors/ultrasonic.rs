//! HC-SR04 ultrasonic ranger.
//!
//! A 10 µs trigger pulse starts a measurement; the sensor answers with an
//! echo pulse whose width encodes the acoustic round trip. Distance is
//! `width_us * 0.0343 / 2` cm (speed of sound, there and back).
//!
//! The echo wait is a bounded busy-wait: 30 ms covers ~5 m of range, and
//! past that the measurement is abandoned and reported as a miss. One
//! deadline covers the whole wait, edge wait and pulse measurement
//! together, so a sensor holding ECHO high cannot stall the sampler past
//! the window. The caller maps a miss to the out-of-range sentinel.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives TRIG and polls ECHO via hw_init helpers.
//! On host/test: echo width comes from a settable atomic (0 = no echo).

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU32, Ordering};

use crate::error::SensorError;

/// Speed of sound in cm/µs at room temperature.
pub const SOUND_SPEED_CM_PER_US: f32 = 0.0343;

/// Give up on the echo after this long (~5 m of range).
pub const ECHO_TIMEOUT_US: u32 = 30_000;

#[cfg(not(target_os = "espidf"))]
static SIM_ECHO_US: AtomicU32 = AtomicU32::new(0);

/// Set the simulated echo pulse width; 0 means the echo never arrives.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_echo_us(width_us: u32) {
    SIM_ECHO_US.store(width_us, Ordering::Relaxed);
}

/// Convert an echo pulse width to a one-way distance in cm.
pub fn distance_from_echo_us(width_us: u32) -> f32 {
    width_us as f32 * SOUND_SPEED_CM_PER_US / 2.0
}

/// Wait for the echo's rising edge, then measure how long the line stays
/// high.  Both phases share a single deadline of [`ECHO_TIMEOUT_US`] from
/// entry, so the call returns within the window no matter what the echo
/// line does.
pub fn bounded_pulse_us(
    mut now_us: impl FnMut() -> u64,
    mut echo_high: impl FnMut() -> bool,
) -> Option<u32> {
    let deadline = now_us() + ECHO_TIMEOUT_US as u64;

    while !echo_high() {
        if now_us() > deadline {
            return None;
        }
    }

    let start = now_us();
    while echo_high() {
        if now_us() > deadline {
            return None;
        }
    }
    Some((now_us() - start) as u32)
}

pub struct UltrasonicRanger;

impl UltrasonicRanger {
    pub const fn new() -> Self {
        Self
    }

    /// Fire one measurement.
    pub fn measure_cm(&mut self) -> Result<f32, SensorError> {
        self.echo_width_us()
            .map(distance_from_echo_us)
            .ok_or(SensorError::EchoTimeout)
    }

    #[cfg(target_os = "espidf")]
    fn echo_width_us(&mut self) -> Option<u32> {
        use esp_idf_svc::sys::{esp_rom_delay_us, esp_timer_get_time};

        use crate::drivers::hw_init;
        use crate::pins;

        // SAFETY: esp_rom_delay_us is a plain cycle-burning delay.
        unsafe {
            hw_init::gpio_write(pins::TRIG_GPIO, false);
            esp_rom_delay_us(2);
            hw_init::gpio_write(pins::TRIG_GPIO, true);
            esp_rom_delay_us(10);
            hw_init::gpio_write(pins::TRIG_GPIO, false);
        }

        // SAFETY: esp_timer_get_time is a monotonic counter read.
        let now_us = || (unsafe { esp_timer_get_time() }) as u64;
        bounded_pulse_us(now_us, || hw_init::gpio_read(pins::ECHO_GPIO))
    }

    #[cfg(not(target_os = "espidf"))]
    fn echo_width_us(&mut self) -> Option<u32> {
        match SIM_ECHO_US.load(Ordering::Relaxed) {
            0 => None,
            width => Some(width),
        }
    }
}

impl Default for UltrasonicRanger {
    fn default() -> Self {
        Self::new()
    }
}

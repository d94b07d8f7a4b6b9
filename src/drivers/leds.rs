//! Status LED driver: green / yellow / red, exactly one lit.

use crate::drivers::hw_init;
use crate::hazard::HazardState;
use crate::pins;

pub struct StatusLeds {
    current: Option<HazardState>,
}

impl StatusLeds {
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Light the LED for `state` and switch the other two off.  Skips the
    /// GPIO writes when the state has not changed.
    pub fn show(&mut self, state: HazardState) {
        if self.current == Some(state) {
            return;
        }
        hw_init::gpio_write(pins::LED_GREEN_GPIO, state == HazardState::Safe);
        hw_init::gpio_write(pins::LED_YELLOW_GPIO, state == HazardState::Warning);
        hw_init::gpio_write(pins::LED_RED_GPIO, state == HazardState::Danger);
        self.current = Some(state);
    }

    /// Last state shown, if any.
    pub fn current(&self) -> Option<HazardState> {
        self.current
    }
}

impl Default for StatusLeds {
    fn default() -> Self {
        Self::new()
    }
}

//! Low-level peripheral drivers.
//!
//! | Module    | Hardware                                   |
//! |-----------|--------------------------------------------|
//! | `hw_init` | one-shot ADC / GPIO / LEDC configuration   |
//! | `buzzer`  | two fixed-frequency piezo tone channels    |
//! | `leds`    | green / yellow / red status LEDs           |

pub mod buzzer;
pub mod hw_init;
pub mod leds;

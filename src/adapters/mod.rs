//! Adapters — implementations of the port traits against real hardware
//! and services, with host-side simulation fallbacks.
//!
//! | Adapter    | Port(s)                      | Backing                      |
//! |------------|------------------------------|------------------------------|
//! | `hardware` | `SensorPort`, `IndicatorPort`| sensor hub + LED/buzzer GPIO |
//! | `lcd`      | `DisplayPort`                | HD44780 behind PCF8574 (I²C) |
//! | `rtdb`     | `TelemetryPort`              | Firebase RTDB REST           |
//! | `clock`    | `WallClock`                  | SNTP-synced system clock     |
//! | `wifi`     | boot-time connect            | ESP-IDF STA driver           |
//! | `log_sink` | `EventSink`                  | serial log                   |

pub mod clock;
pub mod hardware;
pub mod lcd;
pub mod log_sink;
pub mod rtdb;
pub mod wifi;

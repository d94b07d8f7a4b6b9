//! GPIO / peripheral pin assignments for the AquaSentry main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Ultrasonic ranger (HC-SR04)
// ---------------------------------------------------------------------------

/// Digital output: 10 µs trigger pulse starts a measurement.
pub const TRIG_GPIO: i32 = 5;
/// Digital input: echo pulse width encodes round-trip time.
pub const ECHO_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// Sensors — Analog (ADC1)
// ---------------------------------------------------------------------------

/// Resistive rain plate — raw ADC, lower value = wetter.
/// ADC1 channel 7 (GPIO 35 on ESP32).
pub const RAIN_ADC_GPIO: i32 = 35;
/// Capacitive soil moisture probe — raw ADC, lower value = wetter.
/// ADC1 channel 6 (GPIO 34 on ESP32).
pub const SOIL_ADC_GPIO: i32 = 34;

// ---------------------------------------------------------------------------
// Alarm buzzers (two piezo elements, one per tone)
// ---------------------------------------------------------------------------

/// LEDC channel output for the high (2 kHz) tone.
pub const BUZZER_HIGH_GPIO: i32 = 12;
/// LEDC channel output for the low (1.5 kHz) tone.
pub const BUZZER_LOW_GPIO: i32 = 13;

// ---------------------------------------------------------------------------
// Status LEDs (one per hazard state, exactly one lit)
// ---------------------------------------------------------------------------

pub const LED_GREEN_GPIO: i32 = 26;
pub const LED_YELLOW_GPIO: i32 = 27;
pub const LED_RED_GPIO: i32 = 25;

// ---------------------------------------------------------------------------
// I²C bus (16×2 character LCD behind a PCF8574 backpack)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 21;
pub const I2C_SCL_GPIO: i32 = 22;
/// 7-bit address of the PCF8574 I/O expander on the LCD backpack.
pub const LCD_I2C_ADDR: u8 = 0x27;
/// I²C bus speed.
pub const I2C_FREQ_HZ: u32 = 100_000;

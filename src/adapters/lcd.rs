//! 16×2 character LCD behind a PCF8574 I²C backpack.
//!
//! Classic HD44780 4-bit protocol: each byte goes out as two nibbles on
//! the expander's upper four bits, with the lower bits driving register
//! select, enable and the backlight. The display is write-only here; we
//! never read the busy flag and instead pace commands with fixed delays.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: a real `I2cDriver` write per nibble.
//! On host/test: renders into two stored strings for assertions.

use log::warn;

use crate::app::ports::DisplayPort;
use crate::error::DisplayError;

/// Character cells per line.
pub const COLS: usize = 16;

#[cfg(target_os = "espidf")]
mod bits {
    pub const RS_DATA: u8 = 0x01;
    pub const ENABLE: u8 = 0x04;
    pub const BACKLIGHT: u8 = 0x08;

    pub const CMD_CLEAR: u8 = 0x01;
    pub const CMD_ENTRY_MODE: u8 = 0x06;
    pub const CMD_DISPLAY_ON: u8 = 0x0C;
    pub const CMD_FUNCTION_SET_4BIT_2LINE: u8 = 0x28;
    pub const CMD_LINE1: u8 = 0x80;
    pub const CMD_LINE2: u8 = 0xC0;
}

pub struct LcdDisplay {
    #[cfg(target_os = "espidf")]
    i2c: esp_idf_hal::i2c::I2cDriver<'static>,
    #[cfg(not(target_os = "espidf"))]
    lines: [std::string::String; 2],
}

#[cfg(target_os = "espidf")]
impl LcdDisplay {
    /// Take ownership of the bus driver and run the 4-bit init sequence.
    pub fn new(i2c: esp_idf_hal::i2c::I2cDriver<'static>) -> Result<Self, DisplayError> {
        let mut lcd = Self { i2c };
        lcd.init()?;
        Ok(lcd)
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        use esp_idf_hal::delay::{Ets, FreeRtos};

        // Power-on settle, then the three-times-0x3 wake dance that
        // forces the controller into a known 8-bit state before the
        // switch to 4-bit mode.
        FreeRtos::delay_ms(50);
        self.write_nibble(0x30, false)?;
        Ets::delay_us(4_500);
        self.write_nibble(0x30, false)?;
        Ets::delay_us(4_500);
        self.write_nibble(0x30, false)?;
        Ets::delay_us(150);
        self.write_nibble(0x20, false)?;

        self.command(bits::CMD_FUNCTION_SET_4BIT_2LINE)?;
        self.command(bits::CMD_DISPLAY_ON)?;
        self.clear()?;
        self.command(bits::CMD_ENTRY_MODE)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(bits::CMD_CLEAR)?;
        // Clear is the one slow instruction on this controller.
        esp_idf_hal::delay::Ets::delay_us(2_000);
        Ok(())
    }

    fn command(&mut self, value: u8) -> Result<(), DisplayError> {
        self.send(value, false)
    }

    fn data(&mut self, value: u8) -> Result<(), DisplayError> {
        self.send(value, true)
    }

    fn send(&mut self, value: u8, is_data: bool) -> Result<(), DisplayError> {
        self.write_nibble(value & 0xF0, is_data)?;
        self.write_nibble(value << 4, is_data)
    }

    /// Put one nibble on the expander and strobe ENABLE.
    fn write_nibble(&mut self, nibble: u8, is_data: bool) -> Result<(), DisplayError> {
        use esp_idf_hal::delay::Ets;

        let mut byte = nibble | bits::BACKLIGHT;
        if is_data {
            byte |= bits::RS_DATA;
        }

        self.bus_write(byte | bits::ENABLE)?;
        Ets::delay_us(1);
        self.bus_write(byte)?;
        Ets::delay_us(50);
        Ok(())
    }

    fn bus_write(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(crate::pins::LCD_I2C_ADDR, &[byte], esp_idf_hal::delay::BLOCK)
            .map_err(|_| DisplayError::I2cWriteFailed)
    }

    fn render_line(&mut self, addr: u8, text: &str) -> Result<(), DisplayError> {
        self.command(addr)?;
        // Truncate long lines, pad short ones: stale characters never
        // survive a re-render.
        for byte in text.bytes().chain(core::iter::repeat(b' ')).take(COLS) {
            self.data(byte)?;
        }
        Ok(())
    }

    fn try_render(&mut self, line1: &str, line2: &str) -> Result<(), DisplayError> {
        self.render_line(bits::CMD_LINE1, line1)?;
        self.render_line(bits::CMD_LINE2, line2)
    }
}

#[cfg(not(target_os = "espidf"))]
impl LcdDisplay {
    pub fn new() -> Result<Self, DisplayError> {
        Ok(Self {
            lines: [std::string::String::new(), std::string::String::new()],
        })
    }

    /// What the panel would be showing.
    pub fn lines(&self) -> (&str, &str) {
        (&self.lines[0], &self.lines[1])
    }

    fn pad(text: &str) -> std::string::String {
        text.bytes()
            .chain(core::iter::repeat(b' '))
            .take(COLS)
            .map(char::from)
            .collect()
    }

    fn try_render(&mut self, line1: &str, line2: &str) -> Result<(), DisplayError> {
        self.lines[0] = Self::pad(line1);
        self.lines[1] = Self::pad(line2);
        Ok(())
    }
}

impl DisplayPort for LcdDisplay {
    fn render(&mut self, line1: &str, line2: &str) {
        // The panel is a convenience, not a safety output; a failed I²C
        // write is logged and the loop moves on.
        if let Err(e) = self.try_render(line1, line2) {
            warn!("lcd: render failed ({})", e);
        }
    }
}

//! Hardware sampler.
//!
//! Produces a [`HardwareSnapshot`] from the board inputs. A snapshot is taken
//! fresh for every request and never cached.

use crate::board::hardware::{Hardware, Level};

/// ADC reference voltage.
pub const ADC_VREF: f32 = 3.3;

/// Number of ADC codes (12-bit converter).
pub const ADC_RESOLUTION: u32 = 1 << 12;

/// Sensor voltage at 27 °C.
const SENSOR_V27: f32 = 0.706;

/// Sensor slope in volts per °C.
const SENSOR_SLOPE: f32 = 0.001721;

/// Debounced view of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Pressed,
    Released,
}

impl ButtonState {
    /// Buttons are active-low.
    pub fn from_level(level: Level) -> Self {
        match level {
            Level::Low => ButtonState::Pressed,
            Level::High => ButtonState::Released,
        }
    }

    /// Label shown on the status page.
    pub fn label(&self) -> &'static str {
        match self {
            ButtonState::Pressed => "Pressionado",
            ButtonState::Released => "Solto",
        }
    }
}

impl From<bool> for ButtonState {
    fn from(pressed: bool) -> Self {
        if pressed {
            ButtonState::Pressed
        } else {
            ButtonState::Released
        }
    }
}

/// Board inputs captured at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HardwareSnapshot {
    pub button_a: ButtonState,
    pub button_b: ButtonState,
    /// Die temperature in °C.
    pub temperature_c: f32,
}

/// Converts a raw ADC code from the temperature channel to °C.
///
/// Codes wider than 12 bits are masked, so every input yields a finite value
/// between roughly -1480 °C (code 4095) and 437 °C (code 0).
pub fn raw_to_celsius(raw: u16) -> f32 {
    let code = u32::from(raw & 0x0FFF);
    let volts = code as f32 * (ADC_VREF / ADC_RESOLUTION as f32);
    27.0 - (volts - SENSOR_V27) / SENSOR_SLOPE
}

/// Reads both buttons and the temperature channel.
pub fn sample(hw: &dyn Hardware) -> HardwareSnapshot {
    let button_a = ButtonState::from_level(hw.button_a_level());
    let button_b = ButtonState::from_level(hw.button_b_level());
    let raw = hw.read_temperature_adc();

    HardwareSnapshot {
        button_a,
        button_b,
        temperature_c: raw_to_celsius(raw),
    }
}

use crate::consts::PORT_PIN_COUNT;
use crate::error::{self, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioDirection {
    Input,
    Output,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioLevel {
    Low,
    High,
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioPull {
    None,
    Up,
    Down,
}

/// Represents a valid GPIO pin number within a port (0-31).
/// Use `GpioPin::new(num)` to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GpioPin(pub(crate) u8); // Field private to enforce constructor use

impl GpioPin {
    /// Creates a new GpioPin, returning an error if the number is out of range (0-31).
    pub fn new(pin_num: u8) -> Result<Self> {
        if pin_num < PORT_PIN_COUNT {
            Ok(GpioPin(pin_num))
        } else {
            Err(error::pin_out_of_range(pin_num))
        }
    }

    /// Returns the underlying pin number (0-31).
    #[inline]
    pub fn number(&self) -> u8 {
        self.0
    }

    /// Returns the single-bit mask (`1 << number`) selecting this pin in a
    /// port-wide pin mask.
    #[inline]
    pub fn mask(&self) -> u32 {
        1u32 << self.0
    }
}

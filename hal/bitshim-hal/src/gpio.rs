//! GPIO pin abstractions
//!
//! Provides the digital I/O driver trait opened by a [`PinLine`](crate::PinLine).

/// Input pull resistor configuration
///
/// The discriminants match the constants the micro:bit API exposes
/// (`NO_PULL = 0`, `PULL_DOWN = 1`, `PULL_UP = 3`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Pull {
    /// Floating input
    NoPull = 0,
    /// Weak pull to ground
    #[default]
    PullDown = 1,
    /// Weak pull to supply
    PullUp = 3,
}

impl Pull {
    /// Convert a micro:bit pull constant
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Pull::NoPull),
            1 => Some(Pull::PullDown),
            3 => Some(Pull::PullUp),
            _ => None,
        }
    }

    /// Get the micro:bit pull constant
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Digital I/O driver for a single line
///
/// The driver can switch between input and output without being
/// released. Dropping the driver releases the line.
pub trait DigitalIo {
    /// Configure as input with the given pull
    fn switch_to_input(&mut self, pull: Pull);

    /// Configure as push-pull output
    fn switch_to_output(&mut self);

    /// Drive the output high or low
    fn set_state(&mut self, high: bool);

    /// Check if the line reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the line reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }
}

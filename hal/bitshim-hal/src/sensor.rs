//! Optional on-board sensors

use crate::HalError;

/// Ambient light sensor
pub trait LightSensor {
    /// Read the unfiltered (clear) channel on a 16-bit scale
    fn read_clear(&mut self) -> Result<u16, HalError>;
}

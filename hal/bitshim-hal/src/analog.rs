//! Analog input and PWM output abstractions

/// Full-scale 16-bit duty cycle
pub const DUTY_MAX: u16 = u16::MAX;

/// ADC channel for a single line
pub trait AnalogInput {
    /// Read the input scaled to the full 16-bit range
    ///
    /// Boards with narrower converters left-align their result.
    fn read_u16(&mut self) -> u16;
}

/// PWM channel for a single line
///
/// Channels used for tone generation must be opened with variable
/// frequency so that [`PwmOutput::set_frequency`] works while running.
pub trait PwmOutput {
    /// Set the duty cycle on a 16-bit scale (0 = off, [`DUTY_MAX`] = always on)
    fn set_duty_u16(&mut self, duty: u16);

    /// Get the current duty cycle
    fn duty_u16(&self) -> u16;

    /// Change the output frequency in Hz
    fn set_frequency(&mut self, hz: u32);

    /// Get the current output frequency in Hz
    fn frequency(&self) -> u32;
}

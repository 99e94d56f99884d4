//! Tone output for on-board speakers

use crate::HalError;

/// Looping tone generator (e.g. a PWM audio output playing a sine sample)
pub trait ToneOutput {
    /// Start playing a continuous tone at the given frequency
    fn play(&mut self, hz: u32) -> Result<(), HalError>;

    /// Stop the current tone
    fn stop(&mut self);

    /// Check if a tone is playing
    fn is_playing(&self) -> bool;
}

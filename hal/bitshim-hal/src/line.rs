//! Per-line peripheral factory
//!
//! A [`PinLine`] owns one physical line of the host board and can open
//! exactly one peripheral driver on it at a time. The caller is expected to
//! drop the current driver before opening another one; boards may report
//! [`HalError::PinInUse`] otherwise.

use crate::analog::{AnalogInput, PwmOutput};
use crate::gpio::{DigitalIo, Pull};
use crate::touch::TouchInput;
use crate::HalError;

/// What a physical line is wired to support
///
/// Classes are cumulative: `Touch` lines also support analog and digital
/// roles, `Analog` lines also support digital roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Capability {
    /// Digital in/out only
    #[default]
    Digital,
    /// Digital plus ADC and PWM
    Analog,
    /// Analog plus capacitive touch
    Touch,
}

impl Capability {
    /// Check if analog and tone roles are available
    pub fn has_analog(self) -> bool {
        self >= Capability::Analog
    }

    /// Check if touch sensing is available
    pub fn has_touch(self) -> bool {
        self >= Capability::Touch
    }
}

/// Peripheral factory for one physical line
pub trait PinLine {
    /// Digital I/O driver type
    type Digital: DigitalIo;
    /// ADC driver type
    type Adc: AnalogInput;
    /// PWM driver type
    type Pwm: PwmOutput;
    /// Touch driver type
    type Touch: TouchInput;

    /// Board name of the line (e.g. "P0")
    fn name(&self) -> &str;

    /// What the line is wired for
    fn capability(&self) -> Capability;

    /// Open the line as a digital input with the given pull
    fn open_digital(&mut self, pull: Pull) -> Result<Self::Digital, HalError>;

    /// Open the line as an ADC channel
    fn open_adc(&mut self) -> Result<Self::Adc, HalError>;

    /// Open the line as a variable-frequency PWM channel
    fn open_pwm(&mut self, frequency_hz: u32, duty: u16) -> Result<Self::Pwm, HalError>;

    /// Open the line as a capacitive touch channel
    fn open_touch(&mut self) -> Result<Self::Touch, HalError>;
}

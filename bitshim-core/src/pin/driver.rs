//! Self-configuring pin
//!
//! Every accessor first moves the pin into the role it needs (dropping the
//! previous peripheral driver before opening the next), then performs the
//! operation, then fires the post-operation hooks. An accessor whose
//! driver fails to open returns the HAL error with the pin left Unused.

use alloc::vec::Vec;

use bitshim_hal::{AnalogInput, DigitalIo, PinLine, Pull, PwmOutput, TouchInput};

use super::hooks::{Hook, HookTable, PinEvent, PinOp, PinValue};
use super::role::{Role, Transition};
use crate::error::{Error, HookError, Result};

/// PWM frequency used for analog output until a period is set
pub const DEFAULT_FREQUENCY_HZ: u32 = 50;

/// Duty cycle established by the first non-zero music frequency
///
/// A short duty similar to the micro:bit's, whose harmonics are more
/// audible on piezo buzzers.
pub const MUSIC_DUTY: u16 = 9000;

/// Raw touch reading at or below which the line counts as grounded
pub const GROUND_TOUCH_RAW: u16 = 5;

/// Largest value accepted by [`Pin::write_analog`]
pub const ANALOG_MAX: u16 = 1023;

/// Scale between the 10-bit API range and the 16-bit hardware range
const ANALOG_SHIFT: u32 = 6;

/// Driver currently held by a pin
enum Active<L: PinLine> {
    Unused,
    DigitalIn { io: L::Digital, pull: Pull },
    DigitalOut(L::Digital),
    AnalogIn(L::Adc),
    AnalogOut(L::Pwm),
    Music(L::Pwm),
    Touch(L::Touch),
}

impl<L: PinLine> Active<L> {
    fn role(&self) -> Role {
        match self {
            Active::Unused => Role::Unused,
            Active::DigitalIn { .. } => Role::DigitalIn,
            Active::DigitalOut(_) => Role::DigitalOut,
            Active::AnalogIn(_) => Role::AnalogIn,
            Active::AnalogOut(_) => Role::AnalogOut,
            Active::Music(_) => Role::Music,
            Active::Touch(_) => Role::Touch,
        }
    }
}

/// One physical line with micro:bit pin semantics
pub struct Pin<L: PinLine> {
    line: L,
    active: Active<L>,
    default_pull: Pull,
    analog_frequency: u32,
    hooks: HookTable,
    hook_results: Vec<core::result::Result<(), HookError>>,
}

impl<L: PinLine> Pin<L> {
    /// Wrap a line; no peripheral is opened until first use
    ///
    /// `default_pull` is applied the first time the pin becomes a digital
    /// input without an explicit pull.
    pub fn new(line: L, default_pull: Pull) -> Self {
        Self {
            line,
            active: Active::Unused,
            default_pull,
            analog_frequency: DEFAULT_FREQUENCY_HZ,
            hooks: HookTable::new(),
            hook_results: Vec::new(),
        }
    }

    /// Board name of the pin
    pub fn name(&self) -> &str {
        self.line.name()
    }

    /// Current role
    pub fn get_mode(&self) -> Role {
        self.active.role()
    }

    /// Pull mode while a digital input, `None` in every other role
    pub fn get_pull(&self) -> Option<Pull> {
        match &self.active {
            Active::DigitalIn { pull, .. } => Some(*pull),
            _ => None,
        }
    }

    /// Hook table of this pin
    pub fn hooks(&self) -> &HookTable {
        &self.hooks
    }

    /// Register a hook run after every successful `op`
    pub fn add_hook(&self, op: PinOp, hook: Hook) {
        self.hooks.add(op, hook);
    }

    /// Remove a hook; returns how many registrations were removed
    pub fn remove_hook(&self, op: PinOp, hook: &Hook) -> usize {
        self.hooks.remove(op, hook)
    }

    /// Results of the hooks run by the last hooked operation
    pub fn last_hook_results(&self) -> &[core::result::Result<(), HookError>] {
        &self.hook_results
    }

    /// Release the peripheral; the pin becomes Unused
    pub fn deinit(&mut self) {
        if let Transition::Release(from) = self.active.role().transition(Role::Unused) {
            debug!("{}: release {}", self.line.name(), from);
            self.active = Active::Unused;
        }
    }

    /// Move to `role`, releasing the current driver first
    ///
    /// `pull` only matters when entering DigitalIn. A missing capability
    /// is reported before anything changes. If the HAL then fails to open
    /// the new driver, the old one is already gone and the pin is left
    /// Unused; the next accessor opens its driver afresh.
    fn enter(&mut self, role: Role, pull: Pull) -> Result<()> {
        if self.line.capability() < role.required_capability() {
            return Err(Error::MissingCapability("pin not wired for this role"));
        }

        let transition = self.active.role().transition(role);
        if let Some(from) = transition.released() {
            debug!("{}: release {}", self.line.name(), from);
            // Drop the old driver before the new one is opened
            self.active = Active::Unused;
        }
        if let Some(to) = transition.acquired() {
            debug!("{}: acquire {}", self.line.name(), to);
            self.active = self.open(to, pull)?;
        }
        Ok(())
    }

    fn open(&mut self, role: Role, pull: Pull) -> Result<Active<L>> {
        Ok(match role {
            Role::Unused => Active::Unused,
            Role::DigitalIn => Active::DigitalIn {
                io: self.line.open_digital(pull)?,
                pull,
            },
            Role::DigitalOut => {
                let mut io = self.line.open_digital(Pull::NoPull)?;
                io.switch_to_output();
                Active::DigitalOut(io)
            }
            Role::AnalogIn => Active::AnalogIn(self.line.open_adc()?),
            Role::AnalogOut => Active::AnalogOut(self.line.open_pwm(self.analog_frequency, 0)?),
            Role::Music => Active::Music(self.line.open_pwm(DEFAULT_FREQUENCY_HZ, 0)?),
            Role::Touch => Active::Touch(self.line.open_touch()?),
        })
    }

    fn run_hooks(&mut self, op: PinOp, value: PinValue<'_>) {
        let event = PinEvent {
            pin: self.line.name(),
            op,
            value,
        };
        self.hook_results = self.hooks.run(&event);
    }

    /// Set the pull mode, becoming a digital input if needed
    pub fn set_pull(&mut self, pull: Pull) -> Result<()> {
        match &mut self.active {
            Active::DigitalIn { io, pull: current } => {
                io.switch_to_input(pull);
                *current = pull;
                Ok(())
            }
            _ => self.enter(Role::DigitalIn, pull),
        }
    }

    /// Set the pull mode from a micro:bit pull constant (0, 1 or 3)
    pub fn set_pull_raw(&mut self, pull: u8) -> Result<()> {
        let pull = Pull::from_u8(pull).ok_or(Error::InvalidArgument("invalid pull"))?;
        self.set_pull(pull)
    }

    /// Read the digital level (0 or 1)
    pub fn read_digital(&mut self) -> Result<u8> {
        self.enter(Role::DigitalIn, self.default_pull)?;
        let value = match &self.active {
            Active::DigitalIn { io, .. } => u8::from(io.is_high()),
            _ => return Err(Error::InvalidState("digital input not open")),
        };
        self.run_hooks(PinOp::ReadDigital, PinValue::Digital(value));
        Ok(value)
    }

    /// Drive the line low (0) or high (1)
    pub fn write_digital(&mut self, value: u8) -> Result<()> {
        if value > 1 {
            return Err(Error::InvalidArgument("value must be 0 or 1"));
        }
        self.enter(Role::DigitalOut, Pull::NoPull)?;
        match &mut self.active {
            Active::DigitalOut(io) => io.set_state(value == 1),
            _ => return Err(Error::InvalidState("digital output not open")),
        }
        self.run_hooks(PinOp::WriteDigital, PinValue::Digital(value));
        Ok(())
    }

    /// Read the analog input on a 0 to 1023 scale
    pub fn read_analog(&mut self) -> Result<u16> {
        self.enter(Role::AnalogIn, Pull::NoPull)?;
        let value = match &mut self.active {
            Active::AnalogIn(adc) => adc.read_u16() >> ANALOG_SHIFT,
            _ => return Err(Error::InvalidState("analog input not open")),
        };
        self.run_hooks(PinOp::ReadAnalog, PinValue::Analog(value));
        Ok(value)
    }

    /// Output a PWM duty cycle on a 0 to 1023 scale
    pub fn write_analog(&mut self, value: u16) -> Result<()> {
        if value > ANALOG_MAX {
            return Err(Error::InvalidArgument("value must be between 0 and 1023"));
        }
        self.enter(Role::AnalogOut, Pull::NoPull)?;
        match &mut self.active {
            Active::AnalogOut(pwm) => pwm.set_duty_u16(value << ANALOG_SHIFT),
            _ => return Err(Error::InvalidState("analog output not open")),
        }
        self.run_hooks(PinOp::WriteAnalog, PinValue::Analog(value));
        Ok(())
    }

    /// Set the analog output period in milliseconds
    pub fn set_analog_period(&mut self, period_ms: u32) -> Result<()> {
        let period_us = period_ms
            .checked_mul(1000)
            .ok_or(Error::InvalidArgument("period too long"))?;
        self.set_analog_period_microseconds(period_us)
    }

    /// Set the analog output period in microseconds
    ///
    /// Applied at once if the pin is an analog output, otherwise kept for
    /// the next time it becomes one.
    pub fn set_analog_period_microseconds(&mut self, period_us: u32) -> Result<()> {
        if period_us == 0 {
            return Err(Error::InvalidArgument("period must be positive"));
        }
        self.analog_frequency = (1_000_000 + period_us / 2) / period_us;
        if let Active::AnalogOut(pwm) = &mut self.active {
            pwm.set_frequency(self.analog_frequency);
        }
        Ok(())
    }

    /// Frequency analog output runs at
    pub fn analog_frequency(&self) -> u32 {
        self.analog_frequency
    }

    /// Check for a touch
    ///
    /// A capacitive touch or a line pulled close to ground both count.
    pub fn is_touched(&mut self) -> Result<bool> {
        self.enter(Role::Touch, Pull::NoPull)?;
        let touched = match &mut self.active {
            Active::Touch(pad) => pad.is_touched() || pad.raw_value() <= GROUND_TOUCH_RAW,
            _ => return Err(Error::InvalidState("touch input not open")),
        };
        self.run_hooks(PinOp::Touch, PinValue::Touched(touched));
        Ok(touched)
    }

    /// Enter the music role with a silent tone source
    pub fn music_on(&mut self) -> Result<()> {
        self.enter(Role::Music, Pull::NoPull)
    }

    /// Leave the music role; no-op in any other role
    pub fn music_off(&mut self) {
        if matches!(self.active, Active::Music(_)) {
            self.deinit();
        }
    }

    /// Change the tone frequency; 0 mutes without leaving the music role
    pub fn music_frequency(&mut self, hz: u32, desc: Option<&str>) -> Result<()> {
        let Active::Music(pwm) = &mut self.active else {
            return Err(Error::InvalidState("music_on() must be called first"));
        };
        if hz == 0 {
            pwm.set_duty_u16(0);
        } else {
            pwm.set_frequency(hz);
            if pwm.duty_u16() == 0 {
                pwm.set_duty_u16(MUSIC_DUTY);
            }
        }
        self.run_hooks(PinOp::MusicFrequency, PinValue::Frequency { hz, desc });
        Ok(())
    }
}

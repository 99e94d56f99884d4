//! Simulated lines and peripheral drivers

use bitshim_hal::{
    AnalogInput, Capability, DigitalIo, HalError, PinLine, Pull, PwmOutput, TouchInput,
};

use crate::board::{HwWrite, LineState, Peripheral, SharedState};

/// Peripheral factory for one simulated line
pub struct SimLine {
    state: SharedState,
    index: usize,
    name: String,
    capability: Capability,
}

impl SimLine {
    pub(crate) fn new(state: SharedState, index: usize) -> Self {
        let (name, capability) = {
            let board = state.borrow();
            let line = &board.lines[index];
            (line.name.clone(), line.capability)
        };
        Self {
            state,
            index,
            name,
            capability,
        }
    }

    fn claim(&mut self, peripheral: Peripheral) -> Result<Claim, HalError> {
        let mut board = self.state.borrow_mut();
        let line = board.line_mut(self.index);
        if line.open > 0 {
            return Err(HalError::PinInUse);
        }
        line.open += 1;
        line.max_open = line.max_open.max(line.open);
        line.opened_total += 1;
        line.peripheral = Some(peripheral);
        Ok(Claim {
            state: self.state.clone(),
            index: self.index,
        })
    }
}

impl PinLine for SimLine {
    type Digital = SimDigital;
    type Adc = SimAdc;
    type Pwm = SimPwm;
    type Touch = SimTouch;

    fn name(&self) -> &str {
        &self.name
    }

    fn capability(&self) -> Capability {
        self.capability
    }

    fn open_digital(&mut self, pull: Pull) -> Result<SimDigital, HalError> {
        let claim = self.claim(Peripheral::Digital)?;
        claim.with(|l| {
            l.pull = Some(pull);
            l.output = None;
        });
        Ok(SimDigital { claim })
    }

    fn open_adc(&mut self) -> Result<SimAdc, HalError> {
        if !self.capability.has_analog() {
            return Err(HalError::NotSupported);
        }
        Ok(SimAdc {
            claim: self.claim(Peripheral::Adc)?,
        })
    }

    fn open_pwm(&mut self, frequency_hz: u32, duty: u16) -> Result<SimPwm, HalError> {
        if !self.capability.has_analog() {
            return Err(HalError::NotSupported);
        }
        let claim = self.claim(Peripheral::Pwm)?;
        claim.with(|l| {
            l.pwm_frequency = frequency_hz;
            l.pwm_duty = duty;
        });
        Ok(SimPwm { claim })
    }

    fn open_touch(&mut self) -> Result<SimTouch, HalError> {
        if !self.capability.has_touch() {
            return Err(HalError::NotSupported);
        }
        Ok(SimTouch {
            claim: self.claim(Peripheral::Touch)?,
        })
    }
}

/// Ownership of a line by one driver; released on drop
struct Claim {
    state: SharedState,
    index: usize,
}

impl Claim {
    fn with<R>(&self, f: impl FnOnce(&mut LineState) -> R) -> R {
        let mut board = self.state.borrow_mut();
        f(board.line_mut(self.index))
    }

    fn record(&self, write: impl FnOnce(String) -> HwWrite) {
        let mut board = self.state.borrow_mut();
        let name = board.line_mut(self.index).name.clone();
        board.record(write(name));
    }
}

impl Drop for Claim {
    fn drop(&mut self) {
        self.with(|l| {
            l.open = l.open.saturating_sub(1);
            if l.open == 0 {
                l.peripheral = None;
                l.pull = None;
            }
        });
    }
}

/// Simulated digital I/O driver
pub struct SimDigital {
    claim: Claim,
}

impl DigitalIo for SimDigital {
    fn switch_to_input(&mut self, pull: Pull) {
        self.claim.with(|l| {
            l.pull = Some(pull);
            l.output = None;
        });
    }

    fn switch_to_output(&mut self) {
        self.claim.with(|l| {
            l.pull = None;
            l.output = Some(false);
        });
    }

    fn set_state(&mut self, high: bool) {
        self.claim.with(|l| l.output = Some(high));
        self.claim.record(|line| HwWrite::Level { line, high });
    }

    fn is_high(&self) -> bool {
        self.claim.with(|l| match (l.output, l.input) {
            (Some(level), _) => level,
            (None, Some(level)) => level,
            (None, None) => l.pull == Some(Pull::PullUp),
        })
    }
}

/// Simulated ADC driver
pub struct SimAdc {
    claim: Claim,
}

impl AnalogInput for SimAdc {
    fn read_u16(&mut self) -> u16 {
        self.claim.with(|l| l.analog)
    }
}

/// Simulated PWM driver
pub struct SimPwm {
    claim: Claim,
}

impl PwmOutput for SimPwm {
    fn set_duty_u16(&mut self, duty: u16) {
        self.claim.with(|l| l.pwm_duty = duty);
        self.claim.record(|line| HwWrite::Duty { line, duty });
    }

    fn duty_u16(&self) -> u16 {
        self.claim.with(|l| l.pwm_duty)
    }

    fn set_frequency(&mut self, hz: u32) {
        self.claim.with(|l| l.pwm_frequency = hz);
        self.claim.record(|line| HwWrite::Frequency { line, hz });
    }

    fn frequency(&self) -> u32 {
        self.claim.with(|l| l.pwm_frequency)
    }
}

impl Drop for SimPwm {
    fn drop(&mut self) {
        self.claim.with(|l| {
            l.pwm_duty = 0;
            l.pwm_frequency = 0;
        });
    }
}

/// Simulated touch driver
pub struct SimTouch {
    claim: Claim,
}

impl TouchInput for SimTouch {
    fn is_touched(&mut self) -> bool {
        self.claim.with(|l| l.touched)
    }

    fn raw_value(&mut self) -> u16 {
        self.claim.with(|l| l.touch_raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SimBoard;

    #[test]
    fn test_second_open_is_rejected() {
        let board = SimBoard::new();
        let mut line = board.line("P0", Capability::Touch);

        let digital = line.open_digital(Pull::PullDown).unwrap();
        assert_eq!(board.open_handles("P0"), 1);
        assert!(matches!(line.open_adc(), Err(HalError::PinInUse)));

        drop(digital);
        assert_eq!(board.open_handles("P0"), 0);
        assert_eq!(board.peripheral("P0"), None);

        let _adc = line.open_adc().unwrap();
        assert_eq!(board.peripheral("P0"), Some(Peripheral::Adc));
        assert_eq!(board.max_open_handles("P0"), 1);
        assert_eq!(board.opened_total("P0"), 2);
    }

    #[test]
    fn test_capability_enforced() {
        let board = SimBoard::new();
        let mut line = board.line("P5", Capability::Digital);
        assert!(matches!(line.open_adc(), Err(HalError::NotSupported)));
        assert!(matches!(line.open_pwm(50, 0), Err(HalError::NotSupported)));
        assert!(matches!(line.open_touch(), Err(HalError::NotSupported)));
        assert_eq!(board.open_handles("P5"), 0);
    }

    #[test]
    fn test_input_follows_pull_when_undriven() {
        let board = SimBoard::new();
        let mut line = board.line("P5", Capability::Digital);
        let mut io = line.open_digital(Pull::PullUp).unwrap();
        assert!(io.is_high());

        board.set_input("P5", Some(false));
        assert!(io.is_low());

        io.switch_to_output();
        io.set_state(true);
        assert!(io.is_high());
        assert_eq!(
            board.writes(),
            vec![HwWrite::Level {
                line: "P5".into(),
                high: true
            }]
        );
    }
}

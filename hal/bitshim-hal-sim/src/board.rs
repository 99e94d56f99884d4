//! Shared board state

use std::cell::RefCell;
use std::rc::Rc;

use bitshim_hal::{Capability, Pull};

use crate::line::SimLine;

/// Peripheral currently holding a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Peripheral {
    Digital,
    Adc,
    Pwm,
    Touch,
}

/// A hardware write observed on the simulated board
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HwWrite {
    /// Digital output level
    Level { line: String, high: bool },
    /// PWM duty cycle
    Duty { line: String, duty: u16 },
    /// PWM frequency
    Frequency { line: String, hz: u32 },
}

#[derive(Debug)]
pub(crate) struct LineState {
    pub name: String,
    pub capability: Capability,
    pub open: u32,
    pub max_open: u32,
    pub opened_total: u32,
    pub peripheral: Option<Peripheral>,
    pub pull: Option<Pull>,
    pub output: Option<bool>,
    pub input: Option<bool>,
    pub analog: u16,
    pub touched: bool,
    pub touch_raw: u16,
    pub pwm_frequency: u32,
    pub pwm_duty: u16,
}

#[derive(Debug, Default)]
pub(crate) struct BoardState {
    pub lines: Vec<LineState>,
    pub writes: Vec<HwWrite>,
}

impl BoardState {
    pub fn line_mut(&mut self, index: usize) -> &mut LineState {
        &mut self.lines[index]
    }

    pub fn record(&mut self, write: HwWrite) {
        self.writes.push(write);
    }
}

pub(crate) type SharedState = Rc<RefCell<BoardState>>;

/// Simulated board
///
/// Cloning the board gives another handle onto the same state.
#[derive(Clone, Default)]
pub struct SimBoard {
    state: SharedState,
}

impl SimBoard {
    /// Create an empty board
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line and return its peripheral factory
    pub fn line(&self, name: &str, capability: Capability) -> SimLine {
        let mut state = self.state.borrow_mut();
        state.lines.push(LineState {
            name: String::from(name),
            capability,
            open: 0,
            max_open: 0,
            opened_total: 0,
            peripheral: None,
            pull: None,
            output: None,
            input: None,
            analog: 0,
            touched: false,
            touch_raw: u16::MAX,
            pwm_frequency: 0,
            pwm_duty: 0,
        });
        let index = state.lines.len() - 1;
        drop(state);
        SimLine::new(self.state.clone(), index)
    }

    fn with_line<R>(&self, name: &str, f: impl FnOnce(&mut LineState) -> R) -> R {
        let mut state = self.state.borrow_mut();
        let line = state
            .lines
            .iter_mut()
            .find(|l| l.name == name)
            .unwrap_or_else(|| panic!("no simulated line named {name}"));
        f(line)
    }

    /// Number of drivers currently open on a line
    pub fn open_handles(&self, name: &str) -> u32 {
        self.with_line(name, |l| l.open)
    }

    /// Most drivers ever open at the same time on a line
    pub fn max_open_handles(&self, name: &str) -> u32 {
        self.with_line(name, |l| l.max_open)
    }

    /// Total number of drivers ever opened on a line
    pub fn opened_total(&self, name: &str) -> u32 {
        self.with_line(name, |l| l.opened_total)
    }

    /// Peripheral currently holding a line
    pub fn peripheral(&self, name: &str) -> Option<Peripheral> {
        self.with_line(name, |l| l.peripheral)
    }

    /// Pull applied to a digital input
    pub fn pull(&self, name: &str) -> Option<Pull> {
        self.with_line(name, |l| l.pull)
    }

    /// Last level driven on a digital output
    pub fn output(&self, name: &str) -> Option<bool> {
        self.with_line(name, |l| l.output)
    }

    /// Current PWM frequency and duty
    pub fn pwm(&self, name: &str) -> (u32, u16) {
        self.with_line(name, |l| (l.pwm_frequency, l.pwm_duty))
    }

    /// Drive a digital input externally (`None` leaves it to the pull)
    pub fn set_input(&self, name: &str, high: Option<bool>) {
        self.with_line(name, |l| l.input = high);
    }

    /// Set the 16-bit ADC reading of a line
    pub fn set_analog(&self, name: &str, value: u16) {
        self.with_line(name, |l| l.analog = value);
    }

    /// Set the touch state and raw coupling value of a line
    pub fn set_touch(&self, name: &str, touched: bool, raw: u16) {
        self.with_line(name, |l| {
            l.touched = touched;
            l.touch_raw = raw;
        });
    }

    /// All hardware writes so far
    pub fn writes(&self) -> Vec<HwWrite> {
        self.state.borrow().writes.clone()
    }

    /// Forget the recorded writes
    pub fn clear_writes(&self) {
        self.state.borrow_mut().writes.clear();
    }
}

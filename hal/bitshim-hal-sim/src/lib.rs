//! Simulated bitshim board
//!
//! Implements every `bitshim-hal` trait on the host. The board keeps one
//! shared state table, so tests can hand lines and extras to the code under
//! test and still inspect what happened on the "hardware":
//!
//! - how many drivers are open on each line (and the most ever open at once)
//! - which peripheral currently owns a line
//! - every digital level, duty cycle and frequency written
//!
//! Inputs (digital levels, ADC readings, touch values) are scripted through
//! [`SimBoard`].

pub mod board;
pub mod extras;
pub mod line;

pub use board::{HwWrite, Peripheral, SimBoard};
pub use extras::{SimDelay, SimLightSensor, SimPressLatch, SimTone};
pub use line::{SimAdc, SimDigital, SimLine, SimPwm, SimTouch};

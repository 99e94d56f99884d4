//! bitshim Hardware Abstraction Layer
//!
//! This crate defines the peripheral traits a host board implements so the
//! micro:bit pin and display API can run on it. Each physical line is handed
//! to the core as a [`PinLine`], a factory that opens one peripheral driver
//! at a time for that line.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (micro:bit style code)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  bitshim-core / bitshim-display         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  bitshim-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ board HAL     │       │ bitshim-hal-  │
//! │ (CLUE, ...)   │       │     sim       │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`PinLine`] - Per-line peripheral factory
//! - [`gpio::DigitalIo`] - Digital I/O with pull configuration
//! - [`analog::AnalogInput`], [`analog::PwmOutput`] - ADC and PWM
//! - [`touch::TouchInput`] - Capacitive touch sensing
//! - [`sensor::LightSensor`], [`input::PressLatch`], [`tone::ToneOutput`] -
//!   Optional on-board extras

#![no_std]
#![deny(unsafe_code)]

pub mod analog;
pub mod gpio;
pub mod input;
pub mod line;
pub mod sensor;
pub mod tone;
pub mod touch;

// Re-export key traits at crate root for convenience
pub use analog::{AnalogInput, PwmOutput, DUTY_MAX};
pub use gpio::{DigitalIo, Pull};
pub use input::PressLatch;
pub use line::{Capability, PinLine};
pub use sensor::LightSensor;
pub use tone::ToneOutput;
pub use touch::TouchInput;

/// Errors reported by a board when opening or driving a peripheral
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// The line is still claimed by another driver
    PinInUse,
    /// The line cannot provide the requested peripheral
    NotSupported,
    /// The peripheral reported a fault
    Hardware,
}

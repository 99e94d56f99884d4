//! Board-agnostic core of the micro:bit API emulation
//!
//! This crate contains everything that does not depend on a concrete board
//! or screen:
//!
//! - Pin role state machine and self-configuring pins
//! - Post-operation hooks and the pin registry that broadcasts them
//! - Images, the built-in symbol set, the 5x5 font and the framebuffer
//! - Buttons with a shared press accumulator
//! - Music targets (tone pins and on-board speakers)
//! - Board configuration types
//!
//! Everything runs on a single cooperative thread of control; shared
//! state uses `Rc<RefCell<..>>` and is never touched from interrupts.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

pub mod button;
pub mod config;
pub mod error;
pub mod led;
pub mod music;
pub mod pin;

pub use error::{Error, HookError, Result};
pub use led::{Font, Framebuffer, Image, Symbol, MAX_BRIGHTNESS};
pub use pin::{Hook, Pin, PinEvent, PinOp, PinRegistry, PinValue, Role};

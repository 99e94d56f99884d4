//! Board configuration
//!
//! Describes the emulated board: which lines exist and what they are wired
//! for, which lines carry buttons, and how the LED matrix is shown.

pub mod board;
pub mod types;

pub use board::*;
pub use types::*;

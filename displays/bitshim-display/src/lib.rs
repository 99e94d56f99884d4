//! LED matrix display for bitshim
//!
//! This crate provides:
//! - [`Surface`] trait for the pixel screen the matrix is drawn on
//! - [`Display`], the micro:bit `display` object: pixels, `show`, `scroll`
//!   and view switching
//! - The views that render the LED framebuffer (and, in the enhanced view,
//!   the scrolled text and live pin activity)
//!
//! # Architecture
//!
//! The display owns the logical LED [`Framebuffer`](bitshim_core::Framebuffer)
//! and exactly one view at a time. Every change to the framebuffer is pushed
//! to the view, which redraws only what changed on the surface. The enhanced
//! view also subscribes to the pin registry so pin operations show up as
//! widgets below the matrix.
//!
//! ```text
//!   show / scroll / set_pixel          pin operations
//!             │                               │ hooks
//!             ▼                               ▼
//!   ┌──────────────────┐   update   ┌──────────────────┐
//!   │ Display          │ ─────────▶ │ DisplayView      │
//!   │  (framebuffer)   │            │  (one at a time) │
//!   └──────────────────┘            └──────────────────┘
//!                                            │
//!                                            ▼
//!                                     Surface (screen)
//! ```

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

pub mod display;
pub mod session;
pub mod surface;
pub mod view;

#[cfg(test)]
mod testing;

// Re-export key types
pub use display::{Display, ScrollOptions, Showable, ShowOptions};
pub use session::{ScrollSession, ShowSession};
pub use surface::{Rgb, Surface, SurfaceError};
pub use view::DisplayView;

//! LED matrix model
//!
//! - [`font`] - Bitmap font with proportional widths
//! - [`image`] - Brightness images and literal parsing
//! - [`symbols`] - Built-in named images
//! - [`framebuffer`] - The display's brightness grid

pub mod font;
pub mod framebuffer;
pub mod image;
pub mod symbols;

pub use font::Font;
pub use framebuffer::Framebuffer;
pub use image::{Image, STD_IMAGE_HEIGHT, STD_IMAGE_WIDTH};
pub use symbols::{Symbol, ALL_ARROWS, ALL_CLOCKS};

/// Highest LED brightness
pub const MAX_BRIGHTNESS: u8 = 9;

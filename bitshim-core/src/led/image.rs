//! Images
//!
//! An image is a grid of brightness values 0-9. Images are independent of
//! the display: showing one copies its pixels into the framebuffer.

use alloc::vec;
use alloc::vec::Vec;
use core::str::FromStr;

use super::MAX_BRIGHTNESS;
use crate::error::{Error, Result};

/// Width of a standard image
pub const STD_IMAGE_WIDTH: usize = 5;
/// Height of a standard image
pub const STD_IMAGE_HEIGHT: usize = 5;

/// Grid of brightness values, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Default for Image {
    fn default() -> Self {
        Self::new()
    }
}

impl Image {
    /// Blank 5x5 image
    pub fn new() -> Self {
        Self::blank(STD_IMAGE_WIDTH, STD_IMAGE_HEIGHT)
    }

    /// Blank image of the given size
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    /// Image from row-major brightness values
    pub fn from_buffer(width: usize, height: usize, pixels: &[u8]) -> Result<Self> {
        if pixels.len() != width * height {
            return Err(Error::InvalidArgument("buffer size does not match image"));
        }
        if pixels.iter().any(|&v| v > MAX_BRIGHTNESS) {
            return Err(Error::InvalidArgument("brightness must be 0 to 9"));
        }
        Ok(Self {
            width,
            height,
            pixels: pixels.to_vec(),
        })
    }

    /// Parse an image literal such as `"09090:99999:09990"`
    ///
    /// Rows are separated by `:`; empty rows are ignored. The image is as
    /// wide as its longest row and short rows are padded with zeros on the
    /// right.
    pub fn parse(literal: &str) -> Result<Self> {
        let rows = || literal.split(':').filter(|r| !r.is_empty());
        let height = rows().count();
        let width = rows().map(|r| r.chars().count()).max().unwrap_or(0);
        if height == 0 {
            return Err(Error::InvalidArgument("image literal has no rows"));
        }

        let mut image = Self::blank(width, height);
        for (y, row) in rows().enumerate() {
            for (x, c) in row.chars().enumerate() {
                let value = c
                    .to_digit(10)
                    .ok_or(Error::InvalidArgument("image rows must be digits 0-9"))?;
                image.pixels[y * width + x] = value as u8;
            }
        }
        Ok(image)
    }

    /// 5x5 image from packed glyph rows, lit bits at full brightness
    ///
    /// Bit 4 of each row is the leftmost pixel.
    pub fn from_glyph(rows: &[u8; STD_IMAGE_HEIGHT]) -> Self {
        let mut image = Self::new();
        for (y, row) in rows.iter().enumerate() {
            for x in 0..STD_IMAGE_WIDTH {
                if row & (1 << (STD_IMAGE_WIDTH - 1 - x)) != 0 {
                    image.pixels[y * STD_IMAGE_WIDTH + x] = MAX_BRIGHTNESS;
                }
            }
        }
        image
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row-major brightness values
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Brightness at column `x`, row `y`
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<u8> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set the brightness at column `x`, row `y`
    pub fn set_pixel(&mut self, x: usize, y: usize, value: u8) -> Result<()> {
        if value > MAX_BRIGHTNESS {
            return Err(Error::InvalidArgument("brightness must be 0 to 9"));
        }
        let i = self.index(x, y)?;
        self.pixels[i] = value;
        Ok(())
    }

    fn index(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(Error::InvalidArgument("pixel outside image"));
        }
        Ok(y * self.width + x)
    }
}

impl FromStr for Image {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

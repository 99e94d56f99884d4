//! LED framebuffer
//!
//! The logical brightness grid behind the display. Views render it; only
//! the display mutates it.

use alloc::vec;
use alloc::vec::Vec;

use super::font::Font;
use super::image::Image;
use super::MAX_BRIGHTNESS;
use crate::error::{Error, Result};

/// Row-major grid of brightness values 0-9
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Framebuffer {
    /// Blank framebuffer of `rows` x `cols` LEDs
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidArgument("framebuffer must not be empty"));
        }
        Ok(Self {
            rows,
            cols,
            cells: vec![0; rows * cols],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major brightness values
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    fn index(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.cols || y >= self.rows {
            return Err(Error::InvalidArgument("pixel outside display"));
        }
        Ok(x + y * self.cols)
    }

    /// Brightness at column `x`, row `y`
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<u8> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Set the brightness at column `x`, row `y`
    ///
    /// Returns whether the cell changed.
    pub fn set_pixel(&mut self, x: usize, y: usize, value: u8) -> Result<bool> {
        if value > MAX_BRIGHTNESS {
            return Err(Error::InvalidArgument("value must be 0 to 9 inclusive"));
        }
        let i = self.index(x, y)?;
        let changed = self.cells[i] != value;
        self.cells[i] = value;
        Ok(changed)
    }

    /// Turn every LED off
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Copy the overlapping top-left region of an image
    ///
    /// Cells outside the image are left as they are.
    pub fn blit(&mut self, image: &Image) {
        let rows = self.rows.min(image.height());
        let cols = self.cols.min(image.width());
        for y in 0..rows {
            let src = &image.pixels()[y * image.width()..][..cols];
            self.cells[y * self.cols..][..cols].copy_from_slice(src);
        }
    }

    /// Fill the whole grid with a glyph, `fg` where lit and `bg` elsewhere
    pub fn draw_glyph(&mut self, font: &Font, c: char, fg: u8, bg: u8) {
        for y in 0..self.rows {
            for x in 0..self.cols {
                self.cells[x + y * self.cols] = if lit(font, c, x, y) { fg } else { bg };
            }
        }
    }

    /// One column of a glyph as brightness values, top to bottom
    pub fn glyph_column(&self, font: &Font, c: char, col: usize, fg: u8, bg: u8) -> Vec<u8> {
        (0..self.rows)
            .map(|y| if lit(font, c, col, y) { fg } else { bg })
            .collect()
    }

    /// Shift every row one LED left, feeding `column` in on the right
    ///
    /// Missing entries of `column` are treated as off.
    pub fn shift_left(&mut self, column: &[u8]) {
        for y in 0..self.rows {
            let row = &mut self.cells[y * self.cols..][..self.cols];
            row.copy_within(1.., 0);
            row[self.cols - 1] = column.get(y).copied().unwrap_or(0);
        }
    }
}

fn lit(font: &Font, c: char, x: usize, y: usize) -> bool {
    match (u8::try_from(x), u8::try_from(y)) {
        (Ok(x), Ok(y)) => font.is_lit(c, x, y),
        _ => false,
    }
}

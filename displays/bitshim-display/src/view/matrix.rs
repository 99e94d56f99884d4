//! LED matrix as a grid of squares
//!
//! Used by the basic view (as large as the screen allows) and, at a fixed
//! smaller scale, by the small and enhanced views.

use alloc::vec;
use alloc::vec::Vec;

use bitshim_core::{Framebuffer, MAX_BRIGHTNESS};

use crate::surface::{Rgb, Surface, SurfaceError};

/// Square size of one LED in the small and enhanced views
pub const SMALL_LED_SCALE: u16 = 24;

/// Screen colour of an LED at `brightness`
///
/// Shades of red, `brightness * 255 / 9` rounded; 0 is black.
pub fn led_color(brightness: u8) -> Rgb {
    let level = u32::from(brightness.min(MAX_BRIGHTNESS));
    let red = (level * 255 + 4) / u32::from(MAX_BRIGHTNESS);
    red << 16
}

/// Renders each LED as a filled square
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixView {
    origin_x: u16,
    scale: u16,
    rows: usize,
    cols: usize,
    /// Brightness last drawn per cell, `None` until first drawn
    drawn: Vec<Option<u8>>,
}

impl MatrixView {
    /// Matrix filling the screen's smaller dimension, at the left edge
    pub fn basic(screen: (u16, u16), rows: usize, cols: usize) -> Self {
        let side = usize::from(screen.0.min(screen.1));
        let scale = (side / cols.max(rows).max(1)).max(1);
        Self::new(0, u16::try_from(scale).unwrap_or(1), rows, cols)
    }

    /// Matrix of [`SMALL_LED_SCALE`] squares, centred horizontally
    pub fn small(screen: (u16, u16), rows: usize, cols: usize) -> Self {
        let side = screen.0.min(screen.1);
        let span = usize::from(SMALL_LED_SCALE) * cols;
        let origin_x = usize::from(side).saturating_sub(span) / 2;
        Self::new(
            u16::try_from(origin_x).unwrap_or(0),
            SMALL_LED_SCALE,
            rows,
            cols,
        )
    }

    fn new(origin_x: u16, scale: u16, rows: usize, cols: usize) -> Self {
        Self {
            origin_x,
            scale,
            rows,
            cols,
            drawn: vec![None; rows * cols],
        }
    }

    /// Side of one LED square, in pixels
    pub fn scale(&self) -> u16 {
        self.scale
    }

    /// Left edge of the matrix, in pixels
    pub fn origin_x(&self) -> u16 {
        self.origin_x
    }

    /// Height of the matrix, in pixels
    pub fn height(&self) -> u16 {
        self.scale.saturating_mul(self.rows as u16)
    }

    /// Brightness last drawn at column `x`, row `y`
    pub fn drawn(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.cols || y >= self.rows {
            return None;
        }
        self.drawn[x + y * self.cols]
    }

    /// Redraw the cells whose brightness differs from what is on screen
    ///
    /// `hint` names the single cell that changed; without it every cell is
    /// compared.
    pub fn update<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        framebuffer: &Framebuffer,
        hint: Option<(usize, usize)>,
    ) -> Result<(), SurfaceError> {
        match hint {
            Some((x, y)) if x < self.cols && y < self.rows => {
                self.update_cell(surface, framebuffer, x, y)
            }
            _ => {
                for y in 0..self.rows {
                    for x in 0..self.cols {
                        self.update_cell(surface, framebuffer, x, y)?;
                    }
                }
                Ok(())
            }
        }
    }

    fn update_cell<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        framebuffer: &Framebuffer,
        x: usize,
        y: usize,
    ) -> Result<(), SurfaceError> {
        let value = framebuffer.get_pixel(x, y).unwrap_or(0);
        let slot = &mut self.drawn[x + y * self.cols];
        if *slot == Some(value) {
            return Ok(());
        }
        surface.fill_rect(
            self.origin_x + self.scale * x as u16,
            self.scale * y as u16,
            self.scale,
            self.scale,
            led_color(value),
        )?;
        *slot = Some(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingSurface;
    use proptest::prelude::*;

    #[test]
    fn test_led_palette() {
        assert_eq!(led_color(0), 0x000000);
        assert_eq!(led_color(1), 28 << 16);
        assert_eq!(led_color(2), 57 << 16);
        assert_eq!(led_color(9), 0xff0000);
    }

    #[test]
    fn test_layouts() {
        let basic = MatrixView::basic((240, 240), 5, 5);
        assert_eq!((basic.origin_x(), basic.scale()), (0, 48));

        let small = MatrixView::small((240, 240), 5, 5);
        assert_eq!((small.origin_x(), small.scale()), (60, 24));
        assert_eq!(small.height(), 120);
    }

    #[test]
    fn test_only_changed_cells_are_drawn() {
        let mut surface = RecordingSurface::new(240, 240);
        let mut view = MatrixView::basic((240, 240), 5, 5);
        let mut fb = Framebuffer::new(5, 5).unwrap();

        view.update(&mut surface, &fb, None).unwrap();
        assert_eq!(surface.fills(), 25);

        surface.clear_ops();
        view.update(&mut surface, &fb, None).unwrap();
        assert_eq!(surface.fills(), 0);

        fb.set_pixel(3, 1, 9).unwrap();
        view.update(&mut surface, &fb, Some((3, 1))).unwrap();
        assert_eq!(surface.fills(), 1);
        assert_eq!(surface.pixel(3 * 48 + 10, 48 + 10), 0xff0000);
        assert_eq!(view.drawn(3, 1), Some(9));
    }

    proptest! {
        #[test]
        fn test_screen_matches_framebuffer(cells in proptest::collection::vec(0u8..=9, 25)) {
            let mut surface = RecordingSurface::new(240, 240);
            let mut view = MatrixView::small((240, 240), 5, 5);
            let mut fb = Framebuffer::new(5, 5).unwrap();
            view.update(&mut surface, &fb, None).unwrap();

            for (i, &v) in cells.iter().enumerate() {
                fb.set_pixel(i % 5, i / 5, v).unwrap();
            }
            view.update(&mut surface, &fb, None).unwrap();
            for y in 0..5u16 {
                for x in 0..5u16 {
                    let value = fb.get_pixel(x.into(), y.into()).unwrap();
                    prop_assert_eq!(view.drawn(x.into(), y.into()), Some(value));
                    prop_assert_eq!(surface.pixel(60 + 24 * x + 12, 24 * y + 12), led_color(value));
                }
            }
        }
    }
}

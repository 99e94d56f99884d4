//! LED matrix drawn with text characters
//!
//! Each LED is a pair of `I` glyphs coloured by brightness, which keeps the
//! view cheap on screens that can only draw text quickly.

use alloc::vec;
use alloc::vec::Vec;

use bitshim_core::Framebuffer;

use super::matrix::led_color;
use crate::surface::{Rgb, Surface, SurfaceError};

/// Text drawn for one LED
pub const LED_TEXT: &str = "II";

/// Text scale of the view
pub const TEXT_SCALE: u8 = 3;

/// Distance between LEDs before scaling
pub const TEXT_SPACING: u16 = 17;

/// Top margin before scaling
pub const TEXT_Y_OFFSET: u16 = 4;

/// Colour of an unlit LED, so the grid stays visible
pub const UNLIT_COLOR: Rgb = 0x080808;

fn cell_color(brightness: u8) -> Rgb {
    if brightness == 0 {
        UNLIT_COLOR
    } else {
        led_color(brightness)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextView {
    rows: usize,
    cols: usize,
    drawn: Vec<Option<Rgb>>,
}

impl TextView {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            drawn: vec![None; rows * cols],
        }
    }

    /// Top-left corner of the LED at column `x`, row `y`
    pub fn position(x: usize, y: usize) -> (u16, u16) {
        let scale = u16::from(TEXT_SCALE);
        (
            TEXT_SPACING * scale * x as u16,
            (TEXT_Y_OFFSET + TEXT_SPACING * y as u16) * scale,
        )
    }

    /// Recolour the LEDs whose colour changed
    pub fn update<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        framebuffer: &Framebuffer,
        hint: Option<(usize, usize)>,
    ) -> Result<(), SurfaceError> {
        if let Some((x, y)) = hint.filter(|&(x, y)| x < self.cols && y < self.rows) {
            return self.update_cell(surface, framebuffer, x, y);
        }
        for y in 0..self.rows {
            for x in 0..self.cols {
                self.update_cell(surface, framebuffer, x, y)?;
            }
        }
        Ok(())
    }

    fn update_cell<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        framebuffer: &Framebuffer,
        x: usize,
        y: usize,
    ) -> Result<(), SurfaceError> {
        let color = cell_color(framebuffer.get_pixel(x, y).unwrap_or(0));
        let slot = &mut self.drawn[x + y * self.cols];
        if *slot == Some(color) {
            return Ok(());
        }
        let (px, py) = Self::position(x, y);
        surface.draw_text(px, py, LED_TEXT, color, TEXT_SCALE)?;
        *slot = Some(color);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::testing::RecordingSurface;
    use std::string::ToString;

    #[test]
    fn test_cells_recoloured_on_change() {
        let mut surface = RecordingSurface::new(240, 240);
        let mut view = TextView::new(5, 5);
        let mut fb = Framebuffer::new(5, 5).unwrap();

        view.update(&mut surface, &fb, None).unwrap();
        let texts = surface.texts();
        assert_eq!(texts.len(), 25);
        assert!(texts.iter().all(|t| t.2 == LED_TEXT && t.3 == UNLIT_COLOR));

        surface.clear_ops();
        fb.set_pixel(1, 2, 9).unwrap();
        view.update(&mut surface, &fb, None).unwrap();
        assert_eq!(
            surface.texts(),
            [(51, 114, "II".to_string(), 0xff0000)]
        );
    }
}

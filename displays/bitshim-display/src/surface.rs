//! Drawing surface trait
//!
//! The pixel screen the LED matrix is emulated on. Boards implement this
//! for their TFT or OLED driver.

use bitshim_core::Error;
use bitshim_hal::HalError;

/// 24-bit colour, `0xRRGGBB`
pub type Rgb = u32;

/// Width of one text character at scale 1, in pixels
pub const CHAR_WIDTH: u16 = 6;

/// Height of one text character at scale 1, in pixels
pub const CHAR_HEIGHT: u16 = 12;

/// Screen background
pub const BLACK: Rgb = 0x000000;

/// Surface errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SurfaceError {
    /// Communication error with the screen
    Communication,
    /// Drawing outside the screen
    OutOfBounds,
}

impl From<SurfaceError> for Error {
    fn from(_: SurfaceError) -> Self {
        Error::Hal(HalError::Hardware)
    }
}

/// Pixel surface
///
/// Coordinates are in pixels from the top-left corner.
pub trait Surface {
    /// Screen size as `(width, height)` in pixels
    fn dimensions(&self) -> (u16, u16);

    /// Fill a rectangle with a solid colour
    fn fill_rect(&mut self, x: u16, y: u16, width: u16, height: u16, color: Rgb)
        -> Result<(), SurfaceError>;

    /// Draw text with its top-left corner at `(x, y)`
    ///
    /// Each character is [`CHAR_WIDTH`] x [`CHAR_HEIGHT`] pixels times
    /// `scale`. Only lit glyph pixels are painted.
    fn draw_text(&mut self, x: u16, y: u16, text: &str, color: Rgb, scale: u8)
        -> Result<(), SurfaceError>;

    /// Push buffered drawing to the screen
    ///
    /// For screens with internal buffers, this sends the buffer to the hardware.
    fn flush(&mut self) -> Result<(), SurfaceError>;

    /// Check if the screen refreshes on its own after every draw
    fn auto_refresh(&self) -> bool {
        false
    }

    /// Turn automatic refresh on or off
    fn set_auto_refresh(&mut self, _on: bool) {}
}

/// Run a batch of drawing with automatic refresh paused, then flush
pub fn batch<S, R>(
    surface: &mut S,
    draw: impl FnOnce(&mut S) -> Result<R, SurfaceError>,
) -> Result<R, SurfaceError>
where
    S: Surface + ?Sized,
{
    let auto = surface.auto_refresh();
    if auto {
        surface.set_auto_refresh(false);
    }
    let result = draw(surface);
    let flushed = surface.flush();
    if auto {
        surface.set_auto_refresh(true);
    }
    let value = result?;
    flushed?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DrawOp, RecordingSurface};

    #[test]
    fn test_batch_pauses_refresh_and_flushes() {
        let mut surface = RecordingSurface::new(240, 240);
        surface.set_auto_refresh(true);
        batch(&mut surface, |s| {
            assert!(!s.auto_refresh());
            s.fill_rect(0, 0, 2, 2, 0xff0000)
        })
        .unwrap();
        assert!(surface.auto_refresh());
        assert_eq!(surface.ops().last(), Some(&DrawOp::Flush));
    }

    #[test]
    fn test_batch_flushes_even_on_error() {
        let mut surface = RecordingSurface::new(10, 10);
        let result = batch(&mut surface, |s| s.fill_rect(8, 8, 4, 4, 0xff0000));
        assert_eq!(result, Err(SurfaceError::OutOfBounds));
        assert_eq!(surface.ops().last(), Some(&DrawOp::Flush));
    }

    #[test]
    fn test_surface_error_maps_to_hardware() {
        assert_eq!(
            Error::from(SurfaceError::Communication),
            Error::Hal(HalError::Hardware)
        );
    }
}

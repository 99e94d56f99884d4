//! Text pane of the enhanced view
//!
//! Shows the text being scrolled or shown, with the character currently on
//! the LEDs highlighted.

use heapless::String;

use crate::surface::{Rgb, Surface, SurfaceError, BLACK, CHAR_HEIGHT, CHAR_WIDTH};

/// Characters that fit in the pane
pub const PANE_CHARS: usize = 20;

/// Bytes kept of the text, enough for [`PANE_CHARS`] of any width
const PANE_BYTES: usize = PANE_CHARS * 4;

/// Top of the pane, in pixels
pub const PANE_TOP: u16 = 126;

/// Text scale of the pane
pub const PANE_SCALE: u8 = 2;

/// Colour of the text
pub const TEXT_COLOR: Rgb = 0xff0000;

/// Colour of the highlighted character
pub const HIGHLIGHT_COLOR: Rgb = 0xc0c0c0;

/// One line of text with an optional highlighted character
#[derive(Debug, Clone, Default)]
pub struct TextPane {
    text: String<PANE_BYTES>,
    /// Index of the highlighted character
    highlight: Option<usize>,
    /// Whether the pane needs to be redrawn
    dirty: bool,
}

impl TextPane {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Index of the highlighted character
    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    /// Replace the text; the highlight is dropped
    ///
    /// Text beyond [`PANE_CHARS`] is cut off.
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        for c in text.chars().take(PANE_CHARS) {
            if self.text.push(c).is_err() {
                break;
            }
        }
        self.highlight = None;
        self.dirty = true;
    }

    /// Move the highlight to character `index`
    pub fn set_position(&mut self, index: usize) {
        if self.highlight != Some(index) {
            self.highlight = Some(index);
            self.dirty = true;
        }
    }

    /// Check if the pane needs to be redrawn
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Redraw the pane if anything changed
    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<(), SurfaceError> {
        if !self.dirty {
            return Ok(());
        }
        let scale = u16::from(PANE_SCALE);
        let char_w = CHAR_WIDTH * scale;
        let width = surface.dimensions().0.min(char_w * PANE_CHARS as u16);
        surface.fill_rect(0, PANE_TOP, width, CHAR_HEIGHT * scale, BLACK)?;

        if !self.text.is_empty() {
            surface.draw_text(0, PANE_TOP, &self.text, TEXT_COLOR, PANE_SCALE)?;
        }
        // Characters past the pane are scrolled but not highlighted
        if let Some((index, c)) = self
            .highlight
            .and_then(|i| self.text.chars().nth(i).map(|c| (i, c)))
        {
            let mut buf = [0u8; 4];
            let glyph = c.encode_utf8(&mut buf);
            surface.draw_text(char_w * index as u16, PANE_TOP, glyph, HIGHLIGHT_COLOR, PANE_SCALE)?;
        }
        self.dirty = false;
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
    fn test_highlight_follows_position() {
        let mut surface = RecordingSurface::new(240, 240);
        let mut pane = TextPane::new();
        pane.set_text("HI ");
        pane.set_position(1);
        pane.render(&mut surface).unwrap();
        assert_eq!(
            surface.texts(),
            [
                (0, PANE_TOP, "HI ".to_string(), TEXT_COLOR),
                (12, PANE_TOP, "I".to_string(), HIGHLIGHT_COLOR),
            ]
        );

        // Same position: nothing to redraw
        surface.clear_ops();
        pane.set_position(1);
        pane.render(&mut surface).unwrap();
        assert!(surface.ops().is_empty());
    }

    #[test]
    fn test_empty_text_clears_pane() {
        let mut surface = RecordingSurface::new(240, 240);
        let mut pane = TextPane::new();
        pane.set_text("AB");
        pane.set_position(0);
        pane.render(&mut surface).unwrap();

        surface.clear_ops();
        pane.set_text("");
        assert_eq!(pane.highlight(), None);
        pane.render(&mut surface).unwrap();
        assert_eq!(surface.fills(), 1);
        assert!(surface.texts().is_empty());
    }

    #[test]
    fn test_long_text_is_cut() {
        let mut pane = TextPane::new();
        pane.set_text("abcdefghijklmnopqrstuvwxyz");
        assert_eq!(pane.text(), "abcdefghijklmnopqrst");

        let mut surface = RecordingSurface::new(240, 240);
        pane.set_position(24);
        pane.render(&mut surface).unwrap();
        assert_eq!(surface.texts().len(), 1);
    }
}

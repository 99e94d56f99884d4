//! 5x5 bitmap font
//!
//! Each glyph is stored as one byte per row, most significant used bit on
//! the left. Only the low `glyph_width` bits of a row are used. Alongside
//! the bitmaps every font carries a visible-width table, computed once, so
//! that text scrolls with proportional spacing.

use alloc::borrow::Cow;
use alloc::vec::Vec;

use crate::error::{Error, Result};

/// First character code of the Pendolino3 font
const PENDOLINO3_FIRST: u8 = b' ';
/// Last character code of the Pendolino3 font
const PENDOLINO3_LAST: u8 = b'~';
/// Glyphs in the Pendolino3 font
const PENDOLINO3_GLYPHS: usize = (PENDOLINO3_LAST - PENDOLINO3_FIRST) as usize + 1;

/// Pendolino3 glyph rows, codes 32 to 126, 5 bytes per glyph
#[rustfmt::skip]
static PENDOLINO3: [u8; PENDOLINO3_GLYPHS * 5] = [
    0x00, 0x00, 0x00, 0x00, 0x00, // space
    0x08, 0x08, 0x08, 0x00, 0x08, // !
    0x0a, 0x4a, 0x40, 0x00, 0x00, // "
    0x0a, 0x5f, 0xea, 0x5f, 0xea, // #
    0x0e, 0xd9, 0x2e, 0xd3, 0x6e, // $
    0x19, 0x32, 0x44, 0x89, 0x33, // %
    0x0c, 0x92, 0x4c, 0x92, 0x4d, // &
    0x08, 0x08, 0x00, 0x00, 0x00, // '
    0x04, 0x88, 0x08, 0x08, 0x04, // (
    0x08, 0x04, 0x84, 0x84, 0x88, // )
    0x00, 0x0a, 0x44, 0x8a, 0x40, // *
    0x00, 0x04, 0x8e, 0xc4, 0x80, // +
    0x00, 0x00, 0x00, 0x04, 0x88, // ,
    0x00, 0x00, 0x0e, 0xc0, 0x00, // -
    0x00, 0x00, 0x00, 0x08, 0x00, // .
    0x01, 0x22, 0x44, 0x88, 0x10, // /
    0x0c, 0x92, 0x52, 0x52, 0x4c, // 0
    0x04, 0x8c, 0x84, 0x84, 0x8e, // 1
    0x1c, 0x82, 0x4c, 0x90, 0x1e, // 2
    0x1e, 0xc2, 0x44, 0x92, 0x4c, // 3
    0x06, 0xca, 0x52, 0x5f, 0xe2, // 4
    0x1f, 0xf0, 0x1e, 0xc1, 0x3e, // 5
    0x02, 0x44, 0x8e, 0xd1, 0x2e, // 6
    0x1f, 0xe2, 0x44, 0x88, 0x10, // 7
    0x0e, 0xd1, 0x2e, 0xd1, 0x2e, // 8
    0x0e, 0xd1, 0x2e, 0xc4, 0x88, // 9
    0x00, 0x08, 0x00, 0x08, 0x00, // :
    0x00, 0x04, 0x80, 0x04, 0x88, // ;
    0x02, 0x44, 0x88, 0x04, 0x82, // <
    0x00, 0x0e, 0xc0, 0x0e, 0xc0, // =
    0x08, 0x04, 0x82, 0x44, 0x88, // >
    0x0e, 0xd1, 0x26, 0xc0, 0x04, // ?
    0x0e, 0xd1, 0x35, 0xb3, 0x6c, // @
    0x0c, 0x92, 0x5e, 0xd2, 0x52, // A
    0x1c, 0x92, 0x5c, 0x92, 0x5c, // B
    0x0e, 0xd0, 0x10, 0x10, 0x0e, // C
    0x1c, 0x92, 0x52, 0x52, 0x5c, // D
    0x1e, 0xd0, 0x1c, 0x90, 0x1e, // E
    0x1e, 0xd0, 0x1c, 0x90, 0x10, // F
    0x0e, 0xd0, 0x13, 0x71, 0x2e, // G
    0x12, 0x52, 0x5e, 0xd2, 0x52, // H
    0x1c, 0x88, 0x08, 0x08, 0x1c, // I
    0x1f, 0xe2, 0x42, 0x52, 0x4c, // J
    0x12, 0x54, 0x98, 0x14, 0x92, // K
    0x10, 0x10, 0x10, 0x10, 0x1e, // L
    0x11, 0x3b, 0x75, 0xb1, 0x31, // M
    0x11, 0x39, 0x35, 0xb3, 0x71, // N
    0x0c, 0x92, 0x52, 0x52, 0x4c, // O
    0x1c, 0x92, 0x5c, 0x90, 0x10, // P
    0x0c, 0x92, 0x52, 0x4c, 0x86, // Q
    0x1c, 0x92, 0x5c, 0x92, 0x51, // R
    0x0e, 0xd0, 0x0c, 0x82, 0x5c, // S
    0x1f, 0xe4, 0x84, 0x84, 0x84, // T
    0x12, 0x52, 0x52, 0x52, 0x4c, // U
    0x11, 0x31, 0x31, 0x2a, 0x44, // V
    0x11, 0x31, 0x35, 0xbb, 0x71, // W
    0x12, 0x52, 0x4c, 0x92, 0x52, // X
    0x11, 0x2a, 0x44, 0x84, 0x84, // Y
    0x1e, 0xc4, 0x88, 0x10, 0x1e, // Z
    0x0e, 0xc8, 0x08, 0x08, 0x0e, // [
    0x10, 0x08, 0x04, 0x82, 0x41, // \
    0x0e, 0xc2, 0x42, 0x42, 0x4e, // ]
    0x04, 0x8a, 0x40, 0x00, 0x00, // ^
    0x00, 0x00, 0x00, 0x00, 0x1f, // _
    0x08, 0x04, 0x80, 0x00, 0x00, // `
    0x00, 0x0e, 0xd2, 0x52, 0x4f, // a
    0x10, 0x10, 0x1c, 0x92, 0x5c, // b
    0x00, 0x0e, 0xd0, 0x10, 0x0e, // c
    0x02, 0x42, 0x4e, 0xd2, 0x4e, // d
    0x0c, 0x92, 0x5c, 0x90, 0x0e, // e
    0x06, 0xc8, 0x1c, 0x88, 0x08, // f
    0x0e, 0xd2, 0x4e, 0xc2, 0x4c, // g
    0x10, 0x10, 0x1c, 0x92, 0x52, // h
    0x08, 0x00, 0x08, 0x08, 0x08, // i
    0x02, 0x40, 0x02, 0x42, 0x4c, // j
    0x10, 0x14, 0x98, 0x14, 0x92, // k
    0x08, 0x08, 0x08, 0x08, 0x06, // l
    0x00, 0x1b, 0x75, 0xb1, 0x31, // m
    0x00, 0x1c, 0x92, 0x52, 0x52, // n
    0x00, 0x0c, 0x92, 0x52, 0x4c, // o
    0x00, 0x1c, 0x92, 0x5c, 0x90, // p
    0x00, 0x0e, 0xd2, 0x4e, 0xc2, // q
    0x00, 0x0e, 0xd0, 0x10, 0x10, // r
    0x00, 0x06, 0xc8, 0x04, 0x98, // s
    0x08, 0x08, 0x0e, 0xc8, 0x07, // t
    0x00, 0x12, 0x52, 0x52, 0x4f, // u
    0x00, 0x11, 0x31, 0x2a, 0x44, // v
    0x00, 0x11, 0x31, 0x35, 0xbb, // w
    0x00, 0x12, 0x4c, 0x8c, 0x92, // x
    0x00, 0x11, 0x2a, 0x44, 0x98, // y
    0x00, 0x1e, 0xc4, 0x88, 0x1e, // z
    0x06, 0xc4, 0x8c, 0x84, 0x86, // {
    0x08, 0x08, 0x08, 0x08, 0x08, // |
    0x18, 0x08, 0x0c, 0x88, 0x18, // }
    0x00, 0x00, 0x0c, 0x83, 0x60, // ~
];

static PENDOLINO3_WIDTHS: [u8; PENDOLINO3_GLYPHS] = pendolino3_widths();

const fn pendolino3_widths() -> [u8; PENDOLINO3_GLYPHS] {
    let mut widths = [0u8; PENDOLINO3_GLYPHS];
    let mut glyph = 0;
    while glyph < PENDOLINO3_GLYPHS {
        let mut rows = [0u8; 5];
        let mut row = 0;
        while row < 5 {
            rows[row] = PENDOLINO3[glyph * 5 + row];
            row += 1;
        }
        widths[glyph] = visible_width(&rows, 5);
        glyph += 1;
    }
    widths
}

/// Rightmost lit column + 1, or the full width for a blank glyph
///
/// The leftmost lit column is deliberately not trimmed: narrow glyphs such
/// as `!` sit in column 1 and keep their leading gap.
const fn visible_width(rows: &[u8], glyph_width: u8) -> u8 {
    let mut mash = 0u8;
    let mut i = 0;
    while i < rows.len() {
        mash |= rows[i];
        i += 1;
    }
    let mut width = glyph_width;
    let mut col = 0;
    while col < glyph_width {
        if mash & (1 << (glyph_width - 1 - col)) != 0 {
            width = col + 1;
        }
        col += 1;
    }
    width
}

/// Immutable bitmap font with per-glyph visible widths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    data: Cow<'static, [u8]>,
    widths: Cow<'static, [u8]>,
    first: u8,
    last: u8,
    glyph_width: u8,
    glyph_height: u8,
    fallback: u8,
}

impl Default for Font {
    fn default() -> Self {
        Self::pendolino3()
    }
}

impl Font {
    /// The micro:bit's 5x5 font, codes 32 to 126, `?` for anything else
    pub fn pendolino3() -> Self {
        Self {
            data: Cow::Borrowed(&PENDOLINO3),
            widths: Cow::Borrowed(&PENDOLINO3_WIDTHS),
            first: PENDOLINO3_FIRST,
            last: PENDOLINO3_LAST,
            glyph_width: 5,
            glyph_height: 5,
            fallback: b'?',
        }
    }

    /// Build a font from glyph rows covering codes `first..=last`
    ///
    /// Widths are computed here, once.
    pub fn new(
        data: Cow<'static, [u8]>,
        first: u8,
        last: u8,
        glyph_width: u8,
        glyph_height: u8,
        fallback: u8,
    ) -> Result<Self> {
        if !(1..=8).contains(&glyph_width) || glyph_height == 0 {
            return Err(Error::InvalidArgument("glyph size out of range"));
        }
        if last < first || !(first..=last).contains(&fallback) {
            return Err(Error::InvalidArgument("fallback outside font range"));
        }
        let glyphs = usize::from(last - first) + 1;
        if data.len() != glyphs * usize::from(glyph_height) {
            return Err(Error::InvalidArgument("font data length mismatch"));
        }
        let widths: Vec<u8> = data
            .chunks(usize::from(glyph_height))
            .map(|rows| visible_width(rows, glyph_width))
            .collect();
        Ok(Self {
            data,
            widths: Cow::Owned(widths),
            first,
            last,
            glyph_width,
            glyph_height,
            fallback,
        })
    }

    /// Width of the glyph cell
    pub fn glyph_width(&self) -> u8 {
        self.glyph_width
    }

    /// Height of the glyph cell
    pub fn glyph_height(&self) -> u8 {
        self.glyph_height
    }

    /// Index of the glyph drawn for `c`, substituting the fallback
    fn index(&self, c: char) -> usize {
        let code = match u8::try_from(u32::from(c)) {
            Ok(code) if (self.first..=self.last).contains(&code) => code,
            _ => self.fallback,
        };
        usize::from(code - self.first)
    }

    /// Rows of the glyph drawn for `c`
    pub fn glyph(&self, c: char) -> &[u8] {
        let h = usize::from(self.glyph_height);
        let start = self.index(c) * h;
        &self.data[start..start + h]
    }

    /// Visible width of `c` in columns
    pub fn width_of(&self, c: char) -> u8 {
        self.widths[self.index(c)]
    }

    /// Check if a pixel of the glyph for `c` is lit
    ///
    /// Positions outside the glyph cell are never lit.
    pub fn is_lit(&self, c: char, col: u8, row: u8) -> bool {
        if col >= self.glyph_width || row >= self.glyph_height {
            return false;
        }
        self.glyph(c)[usize::from(row)] & (1 << (self.glyph_width - 1 - col)) != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proportional_widths() {
        let font = Font::pendolino3();
        assert_eq!(font.width_of('I'), 3);
        assert_eq!(font.width_of('A'), 4);
        assert_eq!(font.width_of('!'), 2);
        assert_eq!(font.width_of('W'), 5);
    }

    #[test]
    fn test_blank_glyph_is_full_width() {
        assert_eq!(Font::pendolino3().width_of(' '), 5);
    }

    #[test]
    fn test_out_of_range_uses_fallback() {
        let font = Font::pendolino3();
        assert_eq!(font.glyph('\u{e9}'), font.glyph('?'));
        assert_eq!(font.glyph('\n'), font.glyph('?'));
        assert_eq!(font.width_of('\u{1F600}'), font.width_of('?'));
        assert_ne!(font.glyph('A'), font.glyph('?'));
    }

    #[test]
    fn test_pixels() {
        let font = Font::pendolino3();
        // '!' is a single column at x = 1 with a gap on row 3
        for row in 0..5 {
            assert_eq!(font.is_lit('!', 1, row), row != 3);
            assert!(!font.is_lit('!', 0, row));
        }
        assert!(!font.is_lit('!', 5, 0));
    }

    #[test]
    fn test_custom_font() {
        // Two 3x2 glyphs: "0" = full block, "1" = right column only
        let data: &'static [u8] = &[0b111, 0b111, 0b001, 0b001];
        let font = Font::new(Cow::Borrowed(data), b'0', b'1', 3, 2, b'0').unwrap();
        assert_eq!(font.width_of('0'), 3);
        assert_eq!(font.width_of('1'), 3);
        assert!(font.is_lit('1', 2, 1));
        assert!(!font.is_lit('1', 0, 1));
        assert_eq!(font.glyph('x'), font.glyph('0'));

        assert!(Font::new(Cow::Borrowed(data), b'0', b'2', 3, 2, b'0').is_err());
        assert!(Font::new(Cow::Borrowed(data), b'0', b'1', 3, 2, b'9').is_err());
        assert!(Font::new(Cow::Borrowed(data), b'0', b'1', 9, 2, b'0').is_err());
    }
}

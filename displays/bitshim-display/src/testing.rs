//! Test support: a surface that records what is drawn

extern crate std;

use std::string::{String, ToString};
use std::vec;
use std::vec::Vec;

use crate::surface::{Rgb, Surface, SurfaceError};

/// One call made on a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    Fill {
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        color: Rgb,
    },
    Text {
        x: u16,
        y: u16,
        text: String,
        color: Rgb,
        scale: u8,
    },
    Flush,
}

/// Surface keeping filled pixels and a log of every call
pub struct RecordingSurface {
    width: u16,
    height: u16,
    pixels: Vec<Rgb>,
    ops: Vec<DrawOp>,
    auto_refresh: bool,
}

impl RecordingSurface {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; usize::from(width) * usize::from(height)],
            ops: Vec::new(),
            auto_refresh: false,
        }
    }

    /// Colour of a pixel, as left by `fill_rect`
    pub fn pixel(&self, x: u16, y: u16) -> Rgb {
        self.pixels[usize::from(y) * usize::from(self.width) + usize::from(x)]
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// Text calls only, as `(x, y, text, color)`
    pub fn texts(&self) -> Vec<(u16, u16, String, Rgb)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text {
                    x, y, text, color, ..
                } => Some((*x, *y, text.clone(), *color)),
                _ => None,
            })
            .collect()
    }

    /// Number of fill calls
    pub fn fills(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Fill { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn dimensions(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: Rgb) -> Result<(), SurfaceError> {
        if u32::from(x) + u32::from(w) > u32::from(self.width)
            || u32::from(y) + u32::from(h) > u32::from(self.height)
        {
            return Err(SurfaceError::OutOfBounds);
        }
        for py in y..y + h {
            for px in x..x + w {
                self.pixels[usize::from(py) * usize::from(self.width) + usize::from(px)] = color;
            }
        }
        self.ops.push(DrawOp::Fill { x, y, w, h, color });
        Ok(())
    }

    fn draw_text(&mut self, x: u16, y: u16, text: &str, color: Rgb, scale: u8) -> Result<(), SurfaceError> {
        self.ops.push(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            color,
            scale,
        });
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SurfaceError> {
        self.ops.push(DrawOp::Flush);
        Ok(())
    }

    fn auto_refresh(&self) -> bool {
        self.auto_refresh
    }

    fn set_auto_refresh(&mut self, on: bool) {
        self.auto_refresh = on;
    }
}

//! Pin widget of the enhanced view
//!
//! A box naming a pin and its role, with the last value read or written.

use core::fmt::Write;

use bitshim_core::config::MAX_NAME_LEN;
use bitshim_core::pin::ANALOG_MAX;
use bitshim_core::{PinValue, Role};
use heapless::String;

use crate::surface::{Rgb, Surface, SurfaceError, BLACK, CHAR_HEIGHT};

/// Widget background
pub const WIDGET_BG: Rgb = 0x202020;

/// Colour of the pin name and role
pub const LABEL_COLOR: Rgb = 0xffffff;

/// Colour of the value
pub const VALUE_COLOR: Rgb = 0xffff00;

/// Colour of the analog bar
pub const BAR_COLOR: Rgb = 0xff0000;

const DESC_LEN: usize = 8;

/// Widget size class, chosen by how many pins are shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WidgetSize {
    /// One pin
    Large,
    /// Two pins
    Medium,
    /// Three or more pins
    Small,
}

impl WidgetSize {
    /// Size class for `count` pins on screen
    pub fn for_count(count: usize) -> Self {
        match count {
            0 | 1 => WidgetSize::Large,
            2 => WidgetSize::Medium,
            _ => WidgetSize::Small,
        }
    }

    /// `(width, height)` in pixels
    pub fn dimensions(self) -> (u16, u16) {
        match self {
            WidgetSize::Large => (230, 62),
            WidgetSize::Medium => (230, 36),
            WidgetSize::Small => (110, 24),
        }
    }

    fn value_scale(self) -> u8 {
        match self {
            WidgetSize::Large => 2,
            _ => 1,
        }
    }
}

/// Last value seen on a pin, owned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reading {
    Level(u8),
    Analog(u16),
    Touched(bool),
    Tone { hz: u32, desc: String<DESC_LEN> },
}

impl From<&PinValue<'_>> for Reading {
    fn from(value: &PinValue<'_>) -> Self {
        match *value {
            PinValue::Digital(level) => Reading::Level(level),
            PinValue::Analog(v) => Reading::Analog(v),
            PinValue::Touched(t) => Reading::Touched(t),
            PinValue::Frequency { hz, desc } => Reading::Tone {
                hz,
                desc: truncated(desc.unwrap_or("")),
            },
        }
    }
}

impl Reading {
    fn label(&self) -> String<32> {
        let mut out = String::new();
        // Labels are sized to fit
        let _ = match self {
            Reading::Level(level) => write!(out, "{}", level),
            Reading::Analog(v) => write!(out, "{}", v),
            Reading::Touched(true) => write!(out, "touched"),
            Reading::Touched(false) => write!(out, "-"),
            Reading::Tone { hz: 0, .. } => write!(out, "off"),
            Reading::Tone { hz, desc } if desc.is_empty() => write!(out, "{} Hz", hz),
            Reading::Tone { hz, desc } => write!(out, "{} Hz {}", hz, desc),
        };
        out
    }
}

/// Copy as many whole characters as fit
pub(crate) fn truncated<const N: usize>(s: &str) -> String<N> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

#[derive(Debug, Clone)]
pub struct PinWidget {
    name: String<MAX_NAME_LEN>,
    role: Role,
    size: WidgetSize,
    x: u16,
    y: u16,
    reading: Option<Reading>,
    /// Whether the widget is on screen at its current place
    drawn: bool,
    dirty: bool,
}

impl PinWidget {
    pub fn new(name: &str, role: Role, size: WidgetSize) -> Self {
        Self {
            name: truncated(name),
            role,
            size,
            x: 0,
            y: 0,
            reading: None,
            drawn: false,
            dirty: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn size(&self) -> WidgetSize {
        self.size
    }

    /// Top-left corner, in pixels
    pub fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    pub fn reading(&self) -> Option<&Reading> {
        self.reading.as_ref()
    }

    /// Start over for a new role, keeping size and place
    pub fn rebuild(&mut self, role: Role) {
        self.role = role;
        self.reading = None;
        self.dirty = true;
    }

    /// Move and resize, erasing the old box
    pub fn place<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        size: WidgetSize,
        x: u16,
        y: u16,
    ) -> Result<(), SurfaceError> {
        if (size, x, y) == (self.size, self.x, self.y) {
            return Ok(());
        }
        if self.drawn {
            let (w, h) = self.size.dimensions();
            surface.fill_rect(self.x, self.y, w, h, BLACK)?;
            self.drawn = false;
        }
        self.size = size;
        self.x = x;
        self.y = y;
        self.dirty = true;
        Ok(())
    }

    /// Record a value; returns whether it changed
    pub fn set_reading(&mut self, reading: Reading) -> bool {
        if self.reading.as_ref() == Some(&reading) {
            return false;
        }
        self.reading = Some(reading);
        self.dirty = true;
        true
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Redraw the widget if anything changed
    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<(), SurfaceError> {
        if !self.dirty {
            return Ok(());
        }
        let (w, h) = self.size.dimensions();
        surface.fill_rect(self.x, self.y, w, h, WIDGET_BG)?;

        let mut label: String<40> = String::new();
        let _ = write!(label, "{} {}", self.name, self.role.name());
        let inset = if self.size == WidgetSize::Small { 0 } else { 2 };
        surface.draw_text(self.x + 2, self.y + inset, &label, LABEL_COLOR, 1)?;

        if let Some(reading) = &self.reading {
            let value_y = self.y + inset + CHAR_HEIGHT + inset * 2;
            let scale = self.size.value_scale();
            surface.draw_text(self.x + 2, value_y, &reading.label(), VALUE_COLOR, scale)?;

            if let (WidgetSize::Large, Reading::Analog(v)) = (self.size, reading) {
                let full = u32::from(w - 4);
                let filled = full * u32::from((*v).min(ANALOG_MAX)) / u32::from(ANALOG_MAX);
                surface.fill_rect(self.x + 2, self.y + h - 6, filled as u16, 4, BAR_COLOR)?;
            }
        }
        self.drawn = true;
        self.dirty = false;
        Ok(())
    }
}

//! Configuration type definitions

use heapless::String;

use bitshim_hal::Capability;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum pin or button name length
pub const MAX_NAME_LEN: usize = 16;

/// Maximum pins per board
pub const MAX_PINS: usize = 24;

/// Maximum buttons per board
pub const MAX_BUTTONS: usize = 4;

/// How the LED matrix is rendered on the host screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ViewMode {
    /// Square raster LEDs filling the screen
    #[default]
    Basic,
    /// Smaller raster LEDs, centred
    Small,
    /// LEDs drawn as recoloured text glyphs
    Text,
    /// Small raster LEDs plus a text pane and live pin panel
    Enhanced,
    /// Real LED matrix hardware (not available on host boards)
    Standard,
}

impl ViewMode {
    /// Every mode, in the order the micro:bit API lists them
    pub const ALL: [ViewMode; 5] = [
        ViewMode::Basic,
        ViewMode::Small,
        ViewMode::Text,
        ViewMode::Enhanced,
        ViewMode::Standard,
    ];

    /// Mode name as used by `display.mode`
    pub fn name(self) -> &'static str {
        match self {
            ViewMode::Basic => "basic",
            ViewMode::Small => "small",
            ViewMode::Text => "text",
            ViewMode::Enhanced => "enhanced",
            ViewMode::Standard => "standard",
        }
    }

    /// Look up a mode by name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }
}

/// LED matrix configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// LED rows
    pub led_rows: u8,
    /// LED columns
    pub led_cols: u8,
    /// Initial view
    pub mode: ViewMode,
    /// Fail `on()`/`off()` with `Unsupported` instead of ignoring them
    pub strict_power: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            led_rows: 5,
            led_cols: 5,
            mode: ViewMode::Basic,
            strict_power: false,
        }
    }
}

/// One physical line of the board
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// Pin name (e.g. "pin0")
    pub name: String<MAX_NAME_LEN>,
    /// What the line is wired for
    pub capability: Capability,
}

impl PinConfig {
    /// Create a pin config; names longer than [`MAX_NAME_LEN`] are cut
    pub fn new(name: &str, capability: Capability) -> Self {
        let mut pin_name = String::new();
        for c in name.chars() {
            if pin_name.push(c).is_err() {
                break;
            }
        }
        Self {
            name: pin_name,
            capability,
        }
    }
}

/// A button wired to one of the pins
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ButtonConfig {
    /// Button name (e.g. "A")
    pub name: String<MAX_NAME_LEN>,
    /// Name of the pin it is wired to
    pub pin: String<MAX_NAME_LEN>,
}

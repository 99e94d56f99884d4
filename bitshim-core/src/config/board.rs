//! Whole-board configuration

use heapless::{String, Vec};

use bitshim_hal::{Capability, Pull};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::{
    ButtonConfig, DisplayConfig, PinConfig, ViewMode, MAX_BUTTONS, MAX_NAME_LEN, MAX_PINS,
};
use crate::error::{Error, Result};

/// Current configuration layout version
pub const CONFIG_VERSION: u16 = 1;

/// Complete board configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BoardConfig {
    /// Layout version
    pub version: u16,
    /// LED matrix
    pub display: DisplayConfig,
    /// Pull applied when a pin first becomes a digital input without an
    /// explicit pull
    ///
    /// Pull-down matches the emulated board; deployments whose lines float
    /// differently may override it.
    pub default_pull: Pull,
    /// Every line, in the order pins are created
    pub pins: Vec<PinConfig, MAX_PINS>,
    /// Buttons and the pins they sit on
    pub buttons: Vec<ButtonConfig, MAX_BUTTONS>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            display: DisplayConfig::default(),
            default_pull: Pull::PullDown,
            pins: Vec::new(),
            buttons: Vec::new(),
        }
    }
}

impl BoardConfig {
    /// Configuration of the emulated board
    ///
    /// Touch pins `pin0`-`pin2`, analog pins `pin3`, `pin4`, `pin10`, every
    /// other edge pin digital only. Buttons A and B sit on `pin5` and
    /// `pin11`.
    pub fn standard() -> Self {
        const LAYOUT: [(&str, Capability); 19] = [
            ("pin0", Capability::Touch),
            ("pin1", Capability::Touch),
            ("pin2", Capability::Touch),
            ("pin3", Capability::Analog),
            ("pin4", Capability::Analog),
            ("pin5", Capability::Digital),
            ("pin6", Capability::Digital),
            ("pin7", Capability::Digital),
            ("pin8", Capability::Digital),
            ("pin9", Capability::Digital),
            ("pin10", Capability::Analog),
            ("pin11", Capability::Digital),
            ("pin12", Capability::Digital),
            ("pin13", Capability::Digital),
            ("pin14", Capability::Digital),
            ("pin15", Capability::Digital),
            ("pin16", Capability::Digital),
            ("pin19", Capability::Digital),
            ("pin20", Capability::Digital),
        ];

        let mut config = Self {
            display: DisplayConfig {
                mode: ViewMode::Enhanced,
                ..DisplayConfig::default()
            },
            ..Self::default()
        };
        for (name, capability) in LAYOUT {
            // LAYOUT is shorter than MAX_PINS
            let _ = config.pins.push(PinConfig::new(name, capability));
        }
        for (name, pin) in [("A", "pin5"), ("B", "pin11")] {
            let _ = config.buttons.push(ButtonConfig {
                name: short_name(name),
                pin: short_name(pin),
            });
        }
        config
    }

    /// Parse a configuration from TOML and validate it
    #[cfg(feature = "toml")]
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|_| Error::InvalidArgument("malformed board config"))?;
        config.validate()?;
        info!(
            "board config: {} pins, {} buttons, {}x{} leds",
            config.pins.len(),
            config.buttons.len(),
            config.display.led_cols,
            config.display.led_rows
        );
        Ok(config)
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.display.led_rows == 0 || self.display.led_cols == 0 {
            return Err(Error::InvalidArgument("display must have rows and columns"));
        }
        for (i, pin) in self.pins.iter().enumerate() {
            if pin.name.is_empty() {
                return Err(Error::InvalidArgument("pin name is empty"));
            }
            if self.pins[..i].iter().any(|p| p.name == pin.name) {
                return Err(Error::InvalidArgument("duplicate pin name"));
            }
        }
        for button in &self.buttons {
            if self.pin(&button.pin).is_none() {
                return Err(Error::InvalidArgument("button wired to unknown pin"));
            }
        }
        Ok(())
    }

    /// Look up a pin by name
    pub fn pin(&self, name: &str) -> Option<&PinConfig> {
        self.pins.iter().find(|p| p.name.as_str() == name)
    }
}

fn short_name(name: &str) -> String<MAX_NAME_LEN> {
    PinConfig::new(name, Capability::Digital).name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_board() {
        let config = BoardConfig::standard();
        assert_eq!(config.version, CONFIG_VERSION);
        assert_eq!(config.pins.len(), 19);
        assert_eq!(config.display.mode, ViewMode::Enhanced);
        assert_eq!(config.default_pull, Pull::PullDown);
        assert_eq!(config.pin("pin0").unwrap().capability, Capability::Touch);
        assert_eq!(config.pin("pin10").unwrap().capability, Capability::Analog);
        assert_eq!(config.pin("pin20").unwrap().capability, Capability::Digital);
        assert!(config.pin("pin17").is_none());
        assert_eq!(config.buttons[1].pin.as_str(), "pin11");
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_boards() {
        let mut config = BoardConfig::standard();
        config.display.led_cols = 0;
        assert!(config.validate().is_err());

        let mut config = BoardConfig::standard();
        config
            .pins
            .push(PinConfig::new("pin3", Capability::Digital))
            .unwrap();
        assert_eq!(
            config.validate(),
            Err(Error::InvalidArgument("duplicate pin name"))
        );

        let mut config = BoardConfig::standard();
        config.buttons[0].pin = short_name("pin99");
        assert_eq!(
            config.validate(),
            Err(Error::InvalidArgument("button wired to unknown pin"))
        );
    }

    #[test]
    fn test_view_mode_names() {
        for mode in ViewMode::ALL {
            assert_eq!(ViewMode::from_name(mode.name()), Some(mode));
        }
        assert_eq!(ViewMode::from_name("fancy"), None);
    }

    #[test]
    fn test_long_names_are_cut() {
        let pin = PinConfig::new("a_very_long_pin_name_indeed", Capability::Digital);
        assert_eq!(pin.name.len(), 16);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml() {
        let config = BoardConfig::from_toml(
            r#"
            default_pull = "PullUp"

            [display]
            led_rows = 5
            led_cols = 5
            mode = "text"

            [[pins]]
            name = "pin0"
            capability = "Touch"

            [[pins]]
            name = "pin5"
            capability = "Digital"

            [[buttons]]
            name = "A"
            pin = "pin5"
            "#,
        )
        .unwrap();
        assert_eq!(config.default_pull, Pull::PullUp);
        assert_eq!(config.display.mode, ViewMode::Text);
        assert_eq!(config.pins.len(), 2);
        assert_eq!(config.buttons[0].name.as_str(), "A");

        assert!(BoardConfig::from_toml("[[buttons]]\nname = \"A\"\npin = \"nope\"").is_err());
    }
}

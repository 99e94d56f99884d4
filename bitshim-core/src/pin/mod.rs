//! Pins
//!
//! - [`role`] - Role enum and transition function
//! - [`driver`] - The self-configuring [`Pin`]
//! - [`hooks`] - Post-operation hook lists
//! - [`registry`] - Broadcast of hook registrations to every live pin

pub mod driver;
pub mod hooks;
pub mod registry;
pub mod role;

use alloc::vec::Vec;

use bitshim_hal::PinLine;

pub use driver::{Pin, ANALOG_MAX, DEFAULT_FREQUENCY_HZ, GROUND_TOUCH_RAW, MUSIC_DUTY};
pub use hooks::{hook, Hook, HookTable, PinEvent, PinOp, PinValue};
pub use registry::PinRegistry;
pub use role::{Role, Transition};

use crate::config::{BoardConfig, PinConfig};
use crate::error::{Error, Result};

/// Build every pin a board configuration names
///
/// `open_line` maps each configured pin to the board's line. Pins are
/// attached to `registry` in configuration order.
pub fn standard_pins<L, F>(
    config: &BoardConfig,
    registry: &PinRegistry,
    mut open_line: F,
) -> Result<Vec<Pin<L>>>
where
    L: PinLine,
    F: FnMut(&PinConfig) -> Result<L>,
{
    let mut pins = Vec::with_capacity(config.pins.len());
    for pin_config in &config.pins {
        let line = open_line(pin_config)?;
        if line.capability() < pin_config.capability {
            return Err(Error::MissingCapability("line weaker than configured"));
        }
        let pin = Pin::new(line, config.default_pull);
        registry.attach(&pin)?;
        pins.push(pin);
    }
    info!("{} pins ready", pins.len());
    Ok(pins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitshim_hal::{Capability, Pull};
    use bitshim_hal_sim::SimBoard;

    #[test]
    fn test_standard_pins_follow_config() {
        let board = SimBoard::new();
        let registry = PinRegistry::new();
        let config = BoardConfig::standard();

        let mut pins =
            standard_pins(&config, &registry, |pc| Ok(board.line(&pc.name, pc.capability)))
                .unwrap();
        assert_eq!(pins.len(), config.pins.len());
        assert_eq!(registry.len(), pins.len());
        assert_eq!(pins[0].name(), "pin0");

        // pin5 is digital only
        let pin5 = pins.iter_mut().find(|p| p.name() == "pin5").unwrap();
        assert!(matches!(pin5.read_analog(), Err(Error::MissingCapability(_))));
        assert_eq!(pin5.read_digital().unwrap(), 0);
        assert_eq!(pin5.get_pull(), Some(Pull::PullDown));
    }

    #[test]
    fn test_standard_pins_rejects_weak_line() {
        let board = SimBoard::new();
        let registry = PinRegistry::new();
        let config = BoardConfig::standard();
        let result = standard_pins(&config, &registry, |pc| {
            Ok(board.line(&pc.name, Capability::Digital))
        });
        assert!(matches!(result, Err(Error::MissingCapability(_))));
    }
}

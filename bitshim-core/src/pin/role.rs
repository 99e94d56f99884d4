//! Pin role state machine
//!
//! A pin holds exactly one role at a time. Moving between roles is
//! described by [`Transition`], computed from the current and requested
//! role by [`Role::transition`]. The pin driver executes the transition by
//! dropping the current peripheral driver before opening the next one.
//!
//! ```text
//!             ┌──────────────┐
//!   ┌────────►│    Unused    │◄────────┐
//!   │         └──────┬───────┘         │
//!   │ deinit()       │ any accessor    │ music_off()
//!   │                ▼                 │
//!   │   DigitalIn  DigitalOut  AnalogIn  AnalogOut  Touch  Music
//!   │        ▲         ▲          ▲          ▲        ▲      ▲
//!   └────────┴─────────┴──────────┴──────────┴────────┴──────┘
//!          any accessor of another role: Replace { from, to }
//! ```

use bitshim_hal::Capability;

/// Active hardware function of a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Role {
    /// No peripheral open
    #[default]
    Unused,
    /// Digital input with a pull mode
    DigitalIn,
    /// Push-pull digital output
    DigitalOut,
    /// ADC input
    AnalogIn,
    /// Fixed-frequency PWM output
    AnalogOut,
    /// Variable-frequency tone output
    Music,
    /// Capacitive touch input
    Touch,
}

impl Role {
    /// Mode name as reported by the micro:bit `get_mode()` call
    pub fn name(self) -> &'static str {
        match self {
            Role::Unused => "unused",
            Role::DigitalIn => "read_digital",
            Role::DigitalOut => "write_digital",
            Role::AnalogIn => "read_analog",
            Role::AnalogOut => "write_analog",
            Role::Music => "music",
            Role::Touch => "touch",
        }
    }

    /// Line wiring needed to enter this role
    pub fn required_capability(self) -> Capability {
        match self {
            Role::Unused | Role::DigitalIn | Role::DigitalOut => Capability::Digital,
            Role::AnalogIn | Role::AnalogOut | Role::Music => Capability::Analog,
            Role::Touch => Capability::Touch,
        }
    }

    /// Check if the role holds a peripheral driver
    pub fn is_active(self) -> bool {
        self != Role::Unused
    }

    /// Work needed to move from `self` to `requested`
    pub fn transition(self, requested: Role) -> Transition {
        match (self, requested) {
            (from, to) if from == to => Transition::Stay,
            (from, Role::Unused) => Transition::Release(from),
            (Role::Unused, to) => Transition::Acquire(to),
            (from, to) => Transition::Replace { from, to },
        }
    }
}

/// Steps required to change a pin's role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// Already in the requested role
    Stay,
    /// Open the driver for a role from Unused
    Acquire(Role),
    /// Drop the current driver, ending in Unused
    Release(Role),
    /// Drop the current driver, then open the next one
    Replace { from: Role, to: Role },
}

impl Transition {
    /// Role left behind, if any
    pub fn released(self) -> Option<Role> {
        match self {
            Transition::Release(from) | Transition::Replace { from, .. } => Some(from),
            _ => None,
        }
    }

    /// Role entered, if any
    pub fn acquired(self) -> Option<Role> {
        match self {
            Transition::Acquire(to) | Transition::Replace { to, .. } => Some(to),
            _ => None,
        }
    }
}

//! Post-operation hooks
//!
//! Every pin owns a [`HookTable`]: one ordered callback list per
//! [`PinOp`]. Callbacks run synchronously after the operation succeeded,
//! in registration order. The list is snapshotted before invocation, so a
//! callback may add or remove hooks (including itself) while running.

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;

use super::role::Role;
use crate::error::HookError;

/// Pin operations that fire hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinOp {
    ReadDigital,
    WriteDigital,
    ReadAnalog,
    WriteAnalog,
    Touch,
    MusicFrequency,
}

impl PinOp {
    /// Number of hookable operations
    pub const COUNT: usize = 6;

    /// Every hookable operation
    pub const ALL: [PinOp; Self::COUNT] = [
        PinOp::ReadDigital,
        PinOp::WriteDigital,
        PinOp::ReadAnalog,
        PinOp::WriteAnalog,
        PinOp::Touch,
        PinOp::MusicFrequency,
    ];

    /// Operation name as used by the micro:bit API
    pub fn name(self) -> &'static str {
        match self {
            PinOp::ReadDigital => "read_digital",
            PinOp::WriteDigital => "write_digital",
            PinOp::ReadAnalog => "read_analog",
            PinOp::WriteAnalog => "write_analog",
            PinOp::Touch => "touch",
            PinOp::MusicFrequency => "music_frequency",
        }
    }

    /// Role the pin is in after this operation
    pub fn role(self) -> Role {
        match self {
            PinOp::ReadDigital => Role::DigitalIn,
            PinOp::WriteDigital => Role::DigitalOut,
            PinOp::ReadAnalog => Role::AnalogIn,
            PinOp::WriteAnalog => Role::AnalogOut,
            PinOp::Touch => Role::Touch,
            PinOp::MusicFrequency => Role::Music,
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Value produced or consumed by a hooked operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinValue<'a> {
    /// Digital level, 0 or 1
    Digital(u8),
    /// Analog value, 0 to 1023
    Analog(u16),
    /// Touch state
    Touched(bool),
    /// Tone frequency (0 = muted) with an optional note description
    Frequency { hz: u32, desc: Option<&'a str> },
}

/// What a hook is told about a completed operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinEvent<'a> {
    /// Name of the pin
    pub pin: &'a str,
    /// Completed operation
    pub op: PinOp,
    /// Value read or written
    pub value: PinValue<'a>,
}

/// Callback invoked after a pin operation
///
/// Hooks are compared by identity (`Rc::ptr_eq`) on removal, so keep a
/// clone of the `Rc` to remove it later.
pub type Hook = Rc<dyn Fn(&PinEvent<'_>) -> Result<(), HookError>>;

/// Wrap a closure as a [`Hook`]
pub fn hook<F>(f: F) -> Hook
where
    F: Fn(&PinEvent<'_>) -> Result<(), HookError> + 'static,
{
    Rc::new(f)
}

type Slots = [Vec<Hook>; PinOp::COUNT];

/// Per-pin hook lists, one per operation
///
/// Cloning gives another handle onto the same lists; the pin registry keeps
/// such handles to broadcast registrations.
#[derive(Clone, Default)]
pub struct HookTable {
    slots: Rc<RefCell<Slots>>,
}

impl HookTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a hook for an operation
    pub fn add(&self, op: PinOp, hook: Hook) {
        self.slots.borrow_mut()[op.slot()].push(hook);
    }

    /// Remove every registration of `hook` for an operation
    ///
    /// Returns how many were removed.
    pub fn remove(&self, op: PinOp, hook: &Hook) -> usize {
        let mut slots = self.slots.borrow_mut();
        let list = &mut slots[op.slot()];
        let before = list.len();
        list.retain(|h| !Rc::ptr_eq(h, hook));
        before - list.len()
    }

    /// Number of hooks registered for an operation
    pub fn len(&self, op: PinOp) -> usize {
        self.slots.borrow()[op.slot()].len()
    }

    /// Check if no hook is registered for any operation
    pub fn is_empty(&self) -> bool {
        self.slots.borrow().iter().all(Vec::is_empty)
    }

    /// Invoke the hooks of `event.op` in registration order
    ///
    /// Returns one result per hook invoked. Failures do not stop the
    /// remaining hooks.
    pub fn run(&self, event: &PinEvent<'_>) -> Vec<Result<(), HookError>> {
        let snapshot: Vec<Hook> = self.slots.borrow()[event.op.slot()].clone();
        snapshot
            .iter()
            .map(|hook| {
                let result = hook(event);
                if let Err(err) = result {
                    warn!("hook {} on {} failed: {}", event.op, event.pin, err);
                }
                result
            })
            .collect()
    }

    pub(crate) fn downgrade(&self) -> WeakHookTable {
        WeakHookTable {
            slots: Rc::downgrade(&self.slots),
        }
    }
}

/// Non-owning handle onto a pin's hook table
#[derive(Clone)]
pub(crate) struct WeakHookTable {
    slots: Weak<RefCell<Slots>>,
}

impl WeakHookTable {
    pub(crate) fn upgrade(&self) -> Option<HookTable> {
        self.slots.upgrade().map(|slots| HookTable { slots })
    }
}

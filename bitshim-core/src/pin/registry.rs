//! Registry of live pins
//!
//! The registry does not own pins. It keeps a weak handle onto each pin's
//! hook table so that an observer (the Enhanced display view) can subscribe
//! to every pin at once. Entries whose pin has been dropped are skipped and
//! pruned on the next broadcast.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use bitshim_hal::PinLine;
use heapless::String;

use super::driver::Pin;
use super::hooks::{Hook, HookTable, PinOp, WeakHookTable};
use crate::config::MAX_NAME_LEN;
use crate::error::{Error, Result};

struct Entry {
    name: String<MAX_NAME_LEN>,
    hooks: WeakHookTable,
}

/// Shared list of every live pin's hook table
///
/// Cloning gives another handle onto the same list.
#[derive(Clone, Default)]
pub struct PinRegistry {
    entries: Rc<RefCell<Vec<Entry>>>,
}

impl PinRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a pin
    ///
    /// Registering the same pin name twice replaces the earlier entry.
    pub fn attach<L: PinLine>(&self, pin: &Pin<L>) -> Result<()> {
        let name: String<MAX_NAME_LEN> = String::try_from(pin.name())
            .map_err(|_| Error::InvalidArgument("pin name too long"))?;
        let mut entries = self.entries.borrow_mut();
        entries.retain(|e| e.name != name);
        entries.push(Entry {
            name,
            hooks: pin.hooks().downgrade(),
        });
        Ok(())
    }

    /// Number of live pins tracked
    pub fn len(&self) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.hooks.upgrade().is_some())
            .count()
    }

    /// Check if no live pin is tracked
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names of the live pins, in attach order
    pub fn names(&self) -> Vec<String<MAX_NAME_LEN>> {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.hooks.upgrade().is_some())
            .map(|e| e.name.clone())
            .collect()
    }

    /// Add a hook for an operation on every live pin
    ///
    /// Returns the number of pins the hook was added to.
    pub fn add_hook_all(&self, op: PinOp, hook: &Hook) -> usize {
        let mut count = 0;
        for table in self.live_tables() {
            table.add(op, hook.clone());
            count += 1;
        }
        count
    }

    /// Remove a hook for an operation from every live pin
    ///
    /// Returns the total number of registrations removed.
    pub fn remove_hook_all(&self, op: PinOp, hook: &Hook) -> usize {
        self.live_tables()
            .iter()
            .map(|table| table.remove(op, hook))
            .sum()
    }

    fn live_tables(&self) -> Vec<HookTable> {
        let mut entries = self.entries.borrow_mut();
        entries.retain(|e| e.hooks.upgrade().is_some());
        entries.iter().filter_map(|e| e.hooks.upgrade()).collect()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::pin::{hook, PinValue};
    use bitshim_hal::{Capability, Pull};
    use bitshim_hal_sim::SimBoard;
    use core::cell::Cell;

    #[test]
    fn test_broadcast_reaches_every_pin() {
        let board = SimBoard::new();
        let registry = PinRegistry::new();
        let mut p0 = Pin::new(board.line("pin0", Capability::Touch), Pull::PullDown);
        let mut p1 = Pin::new(board.line("pin1", Capability::Touch), Pull::PullDown);
        registry.attach(&p0).unwrap();
        registry.attach(&p1).unwrap();

        let seen = Rc::new(Cell::new(0));
        let s = seen.clone();
        let h = hook(move |event| {
            assert_eq!(event.value, PinValue::Digital(1));
            s.set(s.get() + 1);
            Ok(())
        });
        assert_eq!(registry.add_hook_all(PinOp::WriteDigital, &h), 2);

        p0.write_digital(1).unwrap();
        p1.write_digital(1).unwrap();
        assert_eq!(seen.get(), 2);

        assert_eq!(registry.remove_hook_all(PinOp::WriteDigital, &h), 2);
        p0.write_digital(1).unwrap();
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn test_dropped_pins_are_pruned() {
        let board = SimBoard::new();
        let registry = PinRegistry::new();
        let p0 = Pin::new(board.line("pin0", Capability::Digital), Pull::PullDown);
        {
            let p5 = Pin::new(board.line("pin5", Capability::Digital), Pull::PullDown);
            registry.attach(&p0).unwrap();
            registry.attach(&p5).unwrap();
            assert_eq!(registry.len(), 2);
        }
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.names()[0].as_str(), "pin0");

        let h = hook(|_| Ok(()));
        assert_eq!(registry.add_hook_all(PinOp::ReadDigital, &h), 1);
        drop(p0);
        assert!(registry.is_empty());
    }
}

//! Buttons
//!
//! A [`Button`] owns the pin it sits on. "Was pressed" history comes from a
//! shared [`ButtonMonitor`]: the board's press latch reports every button
//! at once, so whichever button is queried drains the latch for all of
//! them and the monitor keeps the presses meant for the others pending.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use bitshim_hal::{PinLine, PressLatch, Pull};
use heapless::String;

use crate::config::MAX_NAME_LEN;
use crate::error::{Error, Result};
use crate::pin::Pin;

/// Called by a polled button once for every pressed button
///
/// Arguments: name of the polled button, bit mask of the pressed button,
/// all presses being reported.
pub type ButtonCallback = Rc<dyn Fn(&str, u32, u32)>;

/// Most buttons one latch can report
pub const MAX_LATCH_BUTTONS: usize = 32;

struct Registered {
    name: String<MAX_NAME_LEN>,
    callback: Option<ButtonCallback>,
}

struct MonitorState<P> {
    latch: P,
    pending: u32,
    buttons: Vec<Registered>,
}

/// Press accumulator shared by every button on a latch
///
/// Cloning gives another handle onto the same accumulator.
pub struct ButtonMonitor<P: PressLatch> {
    state: Rc<RefCell<MonitorState<P>>>,
}

impl<P: PressLatch> Clone for ButtonMonitor<P> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<P: PressLatch> ButtonMonitor<P> {
    /// Create a monitor over a press latch
    pub fn new(latch: P) -> Self {
        Self {
            state: Rc::new(RefCell::new(MonitorState {
                latch,
                pending: 0,
                buttons: Vec::new(),
            })),
        }
    }

    /// Register a button; returns its bit index in the latch
    pub fn register(&self, name: &str, callback: Option<ButtonCallback>) -> Result<u8> {
        let name: String<MAX_NAME_LEN> = String::try_from(name)
            .map_err(|_| Error::InvalidArgument("button name too long"))?;
        let mut state = self.state.borrow_mut();
        if state.buttons.len() >= MAX_LATCH_BUTTONS {
            return Err(Error::InvalidArgument("too many buttons"));
        }
        state.buttons.push(Registered { name, callback });
        Ok((state.buttons.len() - 1) as u8)
    }

    /// Number of registered buttons
    pub fn len(&self) -> usize {
        self.state.borrow().buttons.len()
    }

    /// Check if no button is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if button `index` was pressed since it was last asked
    ///
    /// Drains the latch, runs button `index`'s callback once per pressed
    /// button, and keeps the presses of the other buttons for their next
    /// query. An index with no registered button is never pressed.
    pub fn was_pressed(&self, index: u8) -> bool {
        let (combined, masks, target) = {
            let mut state = self.state.borrow_mut();
            let Some(button) = state.buttons.get(usize::from(index)) else {
                return false;
            };
            let target = button.callback.clone().map(|cb| (button.name.clone(), cb));
            let count = state.buttons.len();

            let combined = state.latch.take_pressed() | state.pending;
            state.pending = combined & !(1u32 << index);

            let masks: Vec<u32> = (0..count)
                .map(|i| 1u32 << i)
                .filter(|mask| combined & mask != 0)
                .collect();
            (combined, masks, target)
        };

        // Callbacks may poll buttons themselves, so the state is released
        if let Some((name, callback)) = target {
            for mask in masks {
                callback(&name, mask, combined);
            }
        }
        combined & (1u32 << index) != 0
    }
}

/// A push button on a pin, active low
pub struct Button<L: PinLine, P: PressLatch> {
    pin: Pin<L>,
    index: u8,
    monitor: ButtonMonitor<P>,
}

impl<L: PinLine, P: PressLatch> Button<L, P> {
    /// Take over a pin as a button
    ///
    /// The pin is read once, then forced to pull-up. `name` defaults to
    /// the pin's name.
    pub fn new(
        mut pin: Pin<L>,
        name: Option<&str>,
        monitor: &ButtonMonitor<P>,
        callback: Option<ButtonCallback>,
    ) -> Result<Self> {
        pin.read_digital()?;
        pin.set_pull(Pull::PullUp)?;
        let index = monitor.register(name.unwrap_or(pin.name()), callback)?;
        debug!("button on {} has index {}", pin.name(), index);
        Ok(Self {
            pin,
            index,
            monitor: monitor.clone(),
        })
    }

    /// Bit index in the press latch
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Pin the button sits on
    pub fn pin(&mut self) -> &mut Pin<L> {
        &mut self.pin
    }

    /// Check if the button is held down now
    pub fn is_pressed(&mut self) -> Result<bool> {
        Ok(self.pin.read_digital()? == 0)
    }

    /// Check if the button was pressed since the last call
    pub fn was_pressed(&self) -> bool {
        self.monitor.was_pressed(self.index)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use bitshim_hal::Capability;
    use bitshim_hal_sim::{SimBoard, SimLine, SimPressLatch};
    use std::string::ToString;
    use std::vec;

    fn button(
        board: &SimBoard,
        pin: &str,
        name: &str,
        monitor: &ButtonMonitor<SimPressLatch>,
    ) -> Button<SimLine, SimPressLatch> {
        let pin = Pin::new(board.line(pin, Capability::Digital), Pull::PullDown);
        Button::new(pin, Some(name), monitor, None).unwrap()
    }

    #[test]
    fn test_button_forces_pull_up() {
        let board = SimBoard::new();
        let monitor = ButtonMonitor::new(SimPressLatch::new());
        let mut a = button(&board, "pin5", "A", &monitor);
        assert_eq!(a.pin().get_pull(), Some(Pull::PullUp));
        assert_eq!(board.pull("pin5"), Some(Pull::PullUp));

        // Released: pulled high
        assert!(!a.is_pressed().unwrap());
        board.set_input("pin5", Some(false));
        assert!(a.is_pressed().unwrap());
    }

    #[test]
    fn test_presses_for_other_buttons_stay_pending() {
        let board = SimBoard::new();
        let latch = SimPressLatch::new();
        let monitor = ButtonMonitor::new(latch.clone());
        let a = button(&board, "pin5", "A", &monitor);
        let b = button(&board, "pin11", "B", &monitor);
        assert_eq!((a.index(), b.index()), (0, 1));

        latch.press(1);
        latch.press(0);
        assert!(a.was_pressed());
        assert!(!a.was_pressed());
        // Drained by A's query but kept for B
        assert!(b.was_pressed());
        assert!(!b.was_pressed());
    }

    #[test]
    fn test_polled_callback_fires_for_each_pressed_button() {
        let board = SimBoard::new();
        let latch = SimPressLatch::new();
        let monitor = ButtonMonitor::new(latch.clone());
        let log = Rc::new(RefCell::new(vec![]));

        let mut buttons = vec![];
        for (pin, name) in [("pin5", "A"), ("pin11", "B")] {
            let log = log.clone();
            let callback: ButtonCallback = Rc::new(move |name: &str, mask: u32, all: u32| {
                log.borrow_mut().push((name.to_string(), mask, all));
            });
            let pin = Pin::new(board.line(pin, Capability::Digital), Pull::PullDown);
            buttons.push(Button::new(pin, Some(name), &monitor, Some(callback)).unwrap());
        }

        latch.press(0);
        latch.press(1);
        assert!(buttons[1].was_pressed());
        assert_eq!(
            *log.borrow(),
            vec![("B".to_string(), 1, 0b11), ("B".to_string(), 2, 0b11)]
        );

        log.borrow_mut().clear();
        assert!(buttons[0].was_pressed());
        assert_eq!(*log.borrow(), vec![("A".to_string(), 1, 0b01)]);
    }

    #[test]
    fn test_unregistered_index_is_never_pressed() {
        let latch = SimPressLatch::new();
        let monitor = ButtonMonitor::new(latch.clone());
        latch.press(0);
        assert!(!monitor.was_pressed(0));
        assert!(!monitor.was_pressed(31));
        assert!(!monitor.was_pressed(32));
        assert!(!monitor.was_pressed(u8::MAX));
    }

    #[test]
    fn test_default_name_is_pin_name() {
        let board = SimBoard::new();
        let monitor = ButtonMonitor::new(SimPressLatch::new());
        let pin = Pin::new(board.line("pin11", Capability::Digital), Pull::PullDown);
        let b = Button::new(pin, None, &monitor, None).unwrap();
        assert_eq!(b.index(), 0);
        assert_eq!(monitor.len(), 1);
    }
}

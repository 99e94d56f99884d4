//! Simulated timing, buttons, light sensor and speaker

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use bitshim_hal::{HalError, LightSensor, PressLatch, ToneOutput};
use embedded_hal::delay::DelayNs;

/// Delay that records requested sleeps instead of sleeping
///
/// Clones share the same log.
#[derive(Clone, Default)]
pub struct SimDelay {
    sleeps_ms: Rc<RefCell<Vec<u32>>>,
    total_ns: Rc<Cell<u64>>,
}

impl SimDelay {
    /// Create a delay with an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Every millisecond sleep requested, in order
    pub fn sleeps_ms(&self) -> Vec<u32> {
        self.sleeps_ms.borrow().clone()
    }

    /// Total simulated time slept, in nanoseconds
    pub fn total_ns(&self) -> u64 {
        self.total_ns.get()
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns.set(self.total_ns.get() + u64::from(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.sleeps_ms.borrow_mut().push(ms);
        self.total_ns
            .set(self.total_ns.get() + u64::from(ms) * 1_000_000);
    }
}

/// Press latch whose presses are injected by the test
#[derive(Clone, Default)]
pub struct SimPressLatch {
    latched: Rc<Cell<u32>>,
}

impl SimPressLatch {
    /// Create a latch with nothing pressed
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch a press of the button with the given bit index
    pub fn press(&self, index: u8) {
        self.latched.set(self.latched.get() | (1 << index));
    }
}

impl PressLatch for SimPressLatch {
    fn take_pressed(&mut self) -> u32 {
        self.latched.replace(0)
    }
}

/// Light sensor with a fixed clear-channel reading
pub struct SimLightSensor {
    clear: u16,
}

impl SimLightSensor {
    /// Create a sensor that always reads `clear`
    pub fn new(clear: u16) -> Self {
        Self { clear }
    }
}

impl LightSensor for SimLightSensor {
    fn read_clear(&mut self) -> Result<u16, HalError> {
        Ok(self.clear)
    }
}

/// Speaker that records the tones it was asked to play
#[derive(Clone, Default)]
pub struct SimTone {
    playing: Rc<Cell<Option<u32>>>,
    played: Rc<RefCell<Vec<u32>>>,
}

impl SimTone {
    /// Create a silent speaker
    pub fn new() -> Self {
        Self::default()
    }

    /// Frequency currently playing
    pub fn playing(&self) -> Option<u32> {
        self.playing.get()
    }

    /// Every frequency started, in order
    pub fn played(&self) -> Vec<u32> {
        self.played.borrow().clone()
    }
}

impl ToneOutput for SimTone {
    fn play(&mut self, hz: u32) -> Result<(), HalError> {
        self.playing.set(Some(hz));
        self.played.borrow_mut().push(hz);
        Ok(())
    }

    fn stop(&mut self) {
        self.playing.set(None);
    }

    fn is_playing(&self) -> bool {
        self.playing.get().is_some()
    }
}

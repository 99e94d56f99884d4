//! Button press latching

/// Source of latched button presses
///
/// Mirrors a gamepad style scanner: each bit is one registered button and
/// is set if that button went down at any point since the previous call.
pub trait PressLatch {
    /// Take the buttons pressed since the last call, clearing the latch
    fn take_pressed(&mut self) -> u32;
}

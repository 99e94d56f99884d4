//! Capacitive touch abstractions

/// Capacitive touch channel for a single line
pub trait TouchInput {
    /// Check if the board's own threshold reports a touch
    fn is_touched(&mut self) -> bool;

    /// Raw coupling measurement
    ///
    /// Lower values mean less charge time. A line tied to ground reads
    /// close to zero.
    fn raw_value(&mut self) -> u16;
}

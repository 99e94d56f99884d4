//! Error taxonomy shared by pins, images and the display

use core::fmt;

use bitshim_hal::HalError;

/// Errors raised by the emulated API
///
/// Every variant is raised synchronously by the call that caused it and
/// leaves prior state unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A value is out of range (pixel, brightness, pin level, period)
    InvalidArgument(&'static str),
    /// The pin or display is not in the role or mode the call requires
    InvalidState(&'static str),
    /// The request cannot be honoured on this runtime (e.g. non-blocking show)
    Unsupported(&'static str),
    /// An optional peripheral is absent, or the line is not wired for the role
    MissingCapability(&'static str),
    /// The board failed to open or drive a peripheral
    Hal(HalError),
}

impl From<HalError> for Error {
    fn from(err: HalError) -> Self {
        Error::Hal(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(what) => write!(f, "invalid argument: {what}"),
            Error::InvalidState(what) => write!(f, "invalid state: {what}"),
            Error::Unsupported(what) => write!(f, "unsupported: {what}"),
            Error::MissingCapability(what) => write!(f, "missing capability: {what}"),
            Error::Hal(HalError::PinInUse) => f.write_str("hardware: pin in use"),
            Error::Hal(HalError::NotSupported) => f.write_str("hardware: not supported"),
            Error::Hal(HalError::Hardware) => f.write_str("hardware fault"),
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = core::result::Result<T, Error>;

/// Failure reported by a hook callback
///
/// Hook failures are isolated: they are logged and collected, never
/// propagated to the caller of the pin operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HookError {
    /// The observer refused the event
    Rejected,
    /// The observer was already in use (re-entrant call)
    Busy,
    /// The observer no longer exists
    Detached,
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn test_hal_error_converts() {
        let err: Error = HalError::PinInUse.into();
        assert_eq!(err, Error::Hal(HalError::PinInUse));
    }

    #[test]
    fn test_display_mentions_detail() {
        let text = Error::InvalidArgument("brightness out of range").to_string();
        assert_eq!(text, "invalid argument: brightness out of range");
    }
}

//! Error types for message keying
//!
//! Tuning never fails, so the only fallible surface is sending a message.
//! Every variant is a silent stop from the radio's point of view; callers
//! that only want fire-and-forget behavior can drop the result.

use core::fmt;

/// Why a message was not (fully) sent
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendError {
    /// CW speed of 0 WPM
    InvalidSpeed,
    /// Split / alternate-VFO transmit is active
    SplitActive,
    /// The IF calibration editor is open
    IfEditMode,
    /// Carrier frequency is outside the band limits
    OutOfBand,
    /// The manual key was already closed
    KeyClosed,
    /// The unit is shorter than the tick period driving the beacon
    TickTooCoarse,
    /// The manual key closed mid-message; transmit is still engaged
    Aborted,
}

impl SendError {
    /// True when nothing was keyed and no state changed
    #[must_use]
    pub const fn is_refusal(self) -> bool {
        !matches!(self, Self::Aborted)
    }
}

impl fmt::Display for SendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSpeed => write!(f, "speed must be at least 1 WPM"),
            Self::SplitActive => write!(f, "split operation active"),
            Self::IfEditMode => write!(f, "IF edit mode active"),
            Self::OutOfBand => write!(f, "frequency outside band limits"),
            Self::KeyClosed => write!(f, "manual key closed"),
            Self::TickTooCoarse => write!(f, "unit shorter than tick period"),
            Self::Aborted => write!(f, "aborted by manual key"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for SendError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::InvalidSpeed => defmt::write!(f, "InvalidSpeed"),
            Self::SplitActive => defmt::write!(f, "SplitActive"),
            Self::IfEditMode => defmt::write!(f, "IfEditMode"),
            Self::OutOfBand => defmt::write!(f, "OutOfBand"),
            Self::KeyClosed => defmt::write!(f, "KeyClosed"),
            Self::TickTooCoarse => defmt::write!(f, "TickTooCoarse"),
            Self::Aborted => defmt::write!(f, "Aborted"),
        }
    }
}

#[cfg(all(feature = "std", not(feature = "embedded")))]
impl std::error::Error for SendError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refusal_classification() {
        assert!(SendError::SplitActive.is_refusal());
        assert!(SendError::KeyClosed.is_refusal());
        assert!(SendError::TickTooCoarse.is_refusal());
        assert!(!SendError::Aborted.is_refusal());
    }
}

//! Shared types used across the firmware
//!
//! Domain types for the keying and tuning subsystems. Timing values are
//! plain milliseconds on the single monotonic clock.

use core::fmt::{self, Write};

use heapless::String;

use crate::config::MAX_FREQUENCY_HZ;

/// Frequency in Hertz
///
/// Bounded by what the synthesizer can produce. Band plans are checked
/// elsewhere; this only guards the hardware range.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(u32);

impl Frequency {
    /// Highest synthesizer frequency
    pub const MAX_HZ: u32 = MAX_FREQUENCY_HZ;

    /// Create a new Frequency from Hz, returns None if out of range
    #[must_use]
    pub const fn from_hz(hz: u32) -> Option<Self> {
        if hz <= Self::MAX_HZ {
            Some(Self(hz))
        } else {
            None
        }
    }

    /// Create a new Frequency from kHz
    #[must_use]
    pub const fn from_khz(khz: u32) -> Option<Self> {
        Self::from_hz(khz.saturating_mul(1000))
    }

    /// Get the frequency in Hz
    #[must_use]
    pub const fn as_hz(self) -> u32 {
        self.0
    }

    /// Get the frequency in kHz (truncated)
    #[must_use]
    pub const fn as_khz(self) -> u32 {
        self.0 / 1000
    }

    /// Offset by a signed number of Hz, clamped to the hardware range
    #[must_use]
    pub const fn offset(self, delta_hz: i32) -> Self {
        let hz = self.0.saturating_add_signed(delta_hz);
        if hz > Self::MAX_HZ {
            Self(Self::MAX_HZ)
        } else {
            Self(hz)
        }
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({} Hz)", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Frequency {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} Hz", self.0);
    }
}

/// How a message is put on the air
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum KeyingMode {
    /// On/off keyed carrier with sidetone
    #[default]
    Cw,
    /// Slow frequency-shift keyed Morse
    Qrss,
}

impl KeyingMode {
    /// Two-letter tag shown on the status line
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Cw => "CW",
            Self::Qrss => "QR",
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for KeyingMode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Cw => defmt::write!(f, "CW"),
            Self::Qrss => defmt::write!(f, "QRSS"),
        }
    }
}

/// Length of one Morse unit (a dit) in milliseconds
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnitDuration(u32);

impl UnitDuration {
    /// Standard timing: 1 WPM = 1200ms per unit
    pub const MS_PER_UNIT_AT_1WPM: u32 = 1200;

    /// Unit duration for a CW speed, `None` for 0 WPM
    #[must_use]
    pub const fn from_wpm(wpm: u8) -> Option<Self> {
        if wpm == 0 {
            None
        } else {
            Some(Self(Self::MS_PER_UNIT_AT_1WPM / wpm as u32))
        }
    }

    /// Unit duration from a QRSS length: negative means milliseconds,
    /// otherwise whole seconds
    #[must_use]
    pub const fn from_qrss_length(length: i32) -> Self {
        if length < 0 {
            Self(length.unsigned_abs())
        } else {
            Self((length as u32).saturating_mul(1000))
        }
    }

    /// Create directly from milliseconds
    #[must_use]
    pub const fn from_ms(ms: u32) -> Self {
        Self(ms)
    }

    /// Get the duration in milliseconds
    #[must_use]
    pub const fn as_ms(self) -> u32 {
        self.0
    }

    /// Duration of `n` units in milliseconds
    #[must_use]
    pub const fn times(self, n: u32) -> u32 {
        self.0.saturating_mul(n)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for UnitDuration {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}ms/unit", self.0);
    }
}

/// Status-line tag such as `CW13`, `Q.50` or `QR03`
pub type SpeedTag = String<16>;

/// One message to key, built per call and dropped when done
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransmissionRequest<'a> {
    /// CW or QRSS
    pub mode: KeyingMode,
    /// Unit (dit) length
    pub unit: UnitDuration,
    /// QRSS mark shift in Hz (0 for CW)
    pub shift_hz: i32,
    /// Text to send
    pub text: &'a str,
    /// Speed shown on the status line (WPM for CW, seconds for QRSS)
    pub speed: u32,
}

impl<'a> TransmissionRequest<'a> {
    /// CW request at `wpm`, `None` for 0 WPM
    #[must_use]
    pub const fn cw(wpm: u8, text: &'a str) -> Option<Self> {
        match UnitDuration::from_wpm(wpm) {
            Some(unit) => Some(Self {
                mode: KeyingMode::Cw,
                unit,
                shift_hz: 0,
                text,
                speed: wpm as u32,
            }),
            None => None,
        }
    }

    /// QRSS request; see [`UnitDuration::from_qrss_length`] for `length`
    #[must_use]
    pub const fn qrss(length: i32, shift_hz: i32, text: &'a str) -> Self {
        let unit = UnitDuration::from_qrss_length(length);
        Self {
            mode: KeyingMode::Qrss,
            unit,
            shift_hz,
            text,
            speed: unit.as_ms() / 1000,
        }
    }

    /// Render the status tag: WPM for CW, hundredths of a second for fast
    /// QRSS, whole seconds otherwise
    #[must_use]
    pub fn speed_tag(&self) -> SpeedTag {
        let mut s = SpeedTag::new();
        match self.mode {
            KeyingMode::Qrss if self.unit.as_ms() < 1000 => {
                let hundredths = self.unit.as_ms() / 10;
                write!(s, "Q.{hundredths:02}").ok();
            }
            mode => {
                write!(s, "{}{:02}", mode.tag(), self.speed).ok();
            }
        }
        s
    }
}

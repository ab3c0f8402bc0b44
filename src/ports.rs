//! Port traits: the boundary between radio logic and the hardware.
//!
//! ```text
//!   HAL adapter ──▶ port trait ──▶ MorseEngine / TuningProcessor
//! ```
//!
//! The radio logic is generic over these traits and never touches a
//! peripheral directly. Blocking sleeps use
//! [`embedded_hal::delay::DelayNs`] rather than a trait of our own.

use embedded_hal::digital::InputPin;

use crate::types::Frequency;

/// Monotonic millisecond clock
pub trait Clock {
    /// Milliseconds since boot; wraps after ~49 days
    fn now_ms(&self) -> u32;
}

/// Manual key (straight key / paddle) sensor
pub trait KeySense {
    /// Poll the key; must not block
    fn is_key_closed(&mut self) -> bool;
}

/// Tuning potentiometer sample source
pub trait AnalogSource {
    /// Read one sample on the 0..=1023 scale
    fn read_sample(&mut self) -> u16;
}

/// Radio-side controls used while keying a message
pub trait Transceiver {
    /// Switch the T/R relay to transmit
    fn enter_transmit(&mut self);

    /// Switch the T/R relay back to receive
    fn enter_receive(&mut self);

    /// Start the sidetone (and keyed carrier)
    fn sidetone_on(&mut self);

    /// Stop the sidetone (and keyed carrier)
    fn sidetone_off(&mut self);

    /// Dial frequency of the active VFO
    fn frequency(&self) -> Frequency;

    /// Program the synthesizer
    fn set_frequency(&mut self, freq: Frequency);

    /// Whether `freq` is inside the configured band limits
    fn in_band_limits(&self, freq: Frequency) -> bool;

    /// Split / alternate-VFO transmit is active
    fn split_active(&self) -> bool;

    /// The IF calibration editor is open
    fn if_edit_active(&self) -> bool;
}

/// Character LCD status lines
pub trait StatusDisplay {
    /// Write `text` at a fixed position on the status line
    fn write_status(&mut self, col: u8, row: u8, text: &str);

    /// Replace the whole message line (padded/clipped by the display)
    fn write_message_line(&mut self, text: &str);
}

/// Key wired to ground with a pull-up: low means closed
#[derive(Debug)]
pub struct ActiveLowKey<P> {
    pin: P,
}

impl<P: InputPin> ActiveLowKey<P> {
    /// Wrap an input pin
    #[must_use]
    pub const fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Give the pin back
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: InputPin> KeySense for ActiveLowKey<P> {
    fn is_key_closed(&mut self) -> bool {
        // Unreadable reads as open
        self.pin.is_low().unwrap_or(false)
    }
}

/// Check a deadline on the wrapping millisecond clock
///
/// Compares with wrapping arithmetic: a deadline armed just before the
/// counter wraps still expires. Deadlines more than ~24 days out are not
/// supported.
#[must_use]
pub const fn deadline_reached(now_ms: u32, deadline_ms: u32) -> bool {
    (now_ms.wrapping_sub(deadline_ms) as i32) >= 0
}

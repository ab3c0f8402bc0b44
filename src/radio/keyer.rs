//! Message Keyer
//!
//! Sends stored messages (CQ calls, beacon text) as CW or QRSS.
//!
//! # Timing
//!
//! All timing derives from one unit, the length of a dit:
//!
//! ```text
//! dit = 1   dah = 3   element gap = 1   char gap = 3   word gap = 7
//! ```
//!
//! The trailing element gap already counts towards the character gap, so
//! only 2 more units are waited after a character, and 4 more after a word
//! space. CW keys the sidetone/carrier on and off; QRSS leaves the carrier
//! on and shifts it up by the mark offset.
//!
//! # Aborting
//!
//! [`MorseEngine`] blocks until the message ends. It polls the manual key
//! every [`KEY_POLL_INTERVAL_MS`] while waiting and stops as soon as the
//! key closes. Transmit stays engaged after an abort or a complete
//! message; the control loop switches back to receive once
//! [`MorseEngine::hold_expired`] says so.

use embedded_hal::delay::DelayNs;

use crate::config::{KEY_POLL_INTERVAL_MS, STATUS_COLUMN, STATUS_ROW, TX_HOLD_UNITS};
use crate::error::SendError;
use crate::fmt::{debug, info};
use crate::ports::{deadline_reached, Clock, KeySense, StatusDisplay, Transceiver};
use crate::radio::morse::{Element, KeyingPlan, KeyingStep};
use crate::types::{Frequency, KeyingMode, TransmissionRequest};

/// Refuse to key when the radio is not in a state where a stored message
/// may go out. Nothing is touched on refusal.
pub(crate) fn check_preconditions<T, K>(rig: &T, key: &mut K) -> Result<(), SendError>
where
    T: Transceiver,
    K: KeySense,
{
    let refusal = if rig.split_active() {
        Some(SendError::SplitActive)
    } else if rig.if_edit_active() {
        Some(SendError::IfEditMode)
    } else if !rig.in_band_limits(rig.frequency()) {
        Some(SendError::OutOfBand)
    } else if key.is_key_closed() {
        Some(SendError::KeyClosed)
    } else {
        None
    };

    match refusal {
        Some(reason) => {
            debug!("message refused: {:?}", reason);
            Err(reason)
        }
        None => Ok(()),
    }
}

/// Put the rig on the air and draw the status line. Returns the carrier
/// frequency marks are shifted from.
pub(crate) fn begin_transmission<T, S>(
    rig: &mut T,
    display: &mut S,
    request: &TransmissionRequest<'_>,
) -> Frequency
where
    T: Transceiver,
    S: StatusDisplay,
{
    let base = rig.frequency();
    info!(
        "keying {:?} message, {} ms/unit",
        request.mode,
        request.unit.as_ms()
    );

    rig.enter_transmit();

    display.write_message_line("");
    display.write_status(STATUS_COLUMN, STATUS_ROW, &request.speed_tag());

    if request.mode == KeyingMode::Qrss {
        rig.sidetone_on();
    }
    display.write_message_line(request.text);

    base
}

/// Start a mark
pub(crate) fn assert_mark<T: Transceiver>(
    rig: &mut T,
    request: &TransmissionRequest<'_>,
    base: Frequency,
) {
    match request.mode {
        KeyingMode::Cw => rig.sidetone_on(),
        KeyingMode::Qrss => rig.set_frequency(base.offset(request.shift_hz)),
    }
}

/// End a mark
pub(crate) fn release_mark<T: Transceiver>(
    rig: &mut T,
    request: &TransmissionRequest<'_>,
    base: Frequency,
) {
    match request.mode {
        KeyingMode::Cw => rig.sidetone_off(),
        KeyingMode::Qrss => rig.set_frequency(base),
    }
}

/// Blocking CW/QRSS message sender
pub struct MorseEngine<T, S, K, C> {
    /// Radio controls
    rig: T,
    /// LCD status lines
    display: S,
    /// Manual key, polled for aborts
    key: K,
    /// Time source and blocking delay
    clock: C,
    /// Longest sleep between key polls
    poll_interval_ms: u32,
    /// Transmit hold deadline, refreshed after every character
    hold_until: Option<u32>,
}

impl<T, S, K, C> MorseEngine<T, S, K, C>
where
    T: Transceiver,
    S: StatusDisplay,
    K: KeySense,
    C: Clock + DelayNs,
{
    /// Create a new keyer
    pub fn new(rig: T, display: S, key: K, clock: C) -> Self {
        Self {
            rig,
            display,
            key,
            clock,
            poll_interval_ms: KEY_POLL_INTERVAL_MS,
            hold_until: None,
        }
    }

    /// Change the key polling interval (at least 1 ms)
    #[must_use]
    pub fn with_poll_interval(mut self, ms: u32) -> Self {
        self.poll_interval_ms = ms.max(1);
        self
    }

    /// Send `text` as CW at `wpm`
    pub fn send_morse_message(&mut self, wpm: u8, text: &str) -> Result<(), SendError> {
        let request = TransmissionRequest::cw(wpm, text).ok_or(SendError::InvalidSpeed)?;
        self.send(&request)
    }

    /// Send `text` as QRSS. A negative `length` is the unit in
    /// milliseconds, otherwise it is the unit in seconds.
    pub fn send_qrss_message(
        &mut self,
        length: i32,
        shift_hz: i32,
        text: &str,
    ) -> Result<(), SendError> {
        self.send(&TransmissionRequest::qrss(length, shift_hz, text))
    }

    /// Run a transmission to completion or abort
    pub fn send(&mut self, request: &TransmissionRequest<'_>) -> Result<(), SendError> {
        check_preconditions(&self.rig, &mut self.key)?;
        let base = begin_transmission(&mut self.rig, &mut self.display, request);

        for step in KeyingPlan::new(request.text) {
            match step {
                KeyingStep::Key(element) if element.is_tone() => {
                    self.mark(request, base, element)?;
                }
                KeyingStep::Key(element) => {
                    self.wait(request.unit.times(element.units()))?;
                }
                KeyingStep::Advance(rest) => self.display.write_message_line(rest),
                KeyingStep::CharDone => {
                    let hold = request.unit.times(TX_HOLD_UNITS);
                    self.hold_until = Some(self.clock.now_ms().wrapping_add(hold));
                }
            }
        }

        debug!("message complete");
        Ok(())
    }

    /// Key one dit or dah. The mark is released even when the wait aborts.
    fn mark(
        &mut self,
        request: &TransmissionRequest<'_>,
        base: Frequency,
        element: Element,
    ) -> Result<(), SendError> {
        if self.key.is_key_closed() {
            info!("message aborted by key");
            return Err(SendError::Aborted);
        }

        assert_mark(&mut self.rig, request, base);
        let waited = self.wait(request.unit.times(element.units()));
        release_mark(&mut self.rig, request, base);
        waited
    }

    /// Sleep for `ms` in poll-sized slices, checking the key before each
    fn wait(&mut self, ms: u32) -> Result<(), SendError> {
        let deadline = self.clock.now_ms().wrapping_add(ms);
        loop {
            if self.key.is_key_closed() {
                info!("message aborted by key");
                return Err(SendError::Aborted);
            }
            let now = self.clock.now_ms();
            if deadline_reached(now, deadline) {
                return Ok(());
            }
            let remaining = deadline.wrapping_sub(now);
            self.clock.delay_ms(remaining.min(self.poll_interval_ms));
        }
    }

    /// Transmit hold deadline set after the last keyed character
    #[must_use]
    pub const fn hold_until(&self) -> Option<u32> {
        self.hold_until
    }

    /// Whether the hold after the last character has run out
    #[must_use]
    pub fn hold_expired(&self, now_ms: u32) -> bool {
        self.hold_until
            .map_or(true, |deadline| deadline_reached(now_ms, deadline))
    }

    /// Get the radio controls
    #[must_use]
    pub const fn transceiver(&self) -> &T {
        &self.rig
    }

    /// Get the radio controls mutably (e.g. to switch back to receive)
    pub fn transceiver_mut(&mut self) -> &mut T {
        &mut self.rig
    }

    /// Get the display
    #[must_use]
    pub const fn display(&self) -> &S {
        &self.display
    }

    /// Take the ports back
    pub fn into_parts(self) -> (T, S, K, C) {
        (self.rig, self.display, self.key, self.clock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[derive(Default)]
    struct Rig {
        split: bool,
        if_edit: bool,
        out_of_band: bool,
        transmitting: bool,
        sidetone: bool,
        marks: u32,
        synth: Option<Frequency>,
    }

    impl Transceiver for Rig {
        fn enter_transmit(&mut self) {
            self.transmitting = true;
        }
        fn enter_receive(&mut self) {
            self.transmitting = false;
        }
        fn sidetone_on(&mut self) {
            self.sidetone = true;
            self.marks += 1;
        }
        fn sidetone_off(&mut self) {
            self.sidetone = false;
        }
        fn frequency(&self) -> Frequency {
            Frequency::from_hz(7_000_800).unwrap()
        }
        fn set_frequency(&mut self, freq: Frequency) {
            self.synth = Some(freq);
        }
        fn in_band_limits(&self, _freq: Frequency) -> bool {
            !self.out_of_band
        }
        fn split_active(&self) -> bool {
            self.split
        }
        fn if_edit_active(&self) -> bool {
            self.if_edit
        }
    }

    #[derive(Default)]
    struct Lcd {
        writes: u32,
    }

    impl StatusDisplay for Lcd {
        fn write_status(&mut self, _col: u8, _row: u8, _text: &str) {
            self.writes += 1;
        }
        fn write_message_line(&mut self, _text: &str) {
            self.writes += 1;
        }
    }

    struct Key(bool);

    impl KeySense for Key {
        fn is_key_closed(&mut self) -> bool {
            self.0
        }
    }

    #[derive(Default)]
    struct SimClock(Cell<u32>);

    impl Clock for SimClock {
        fn now_ms(&self) -> u32 {
            self.0.get()
        }
    }

    impl DelayNs for SimClock {
        fn delay_ns(&mut self, ns: u32) {
            self.0.set(self.0.get() + ns / 1_000_000);
        }

        fn delay_ms(&mut self, ms: u32) {
            self.0.set(self.0.get() + ms);
        }
    }

    fn engine(rig: Rig, key_closed: bool) -> MorseEngine<Rig, Lcd, Key, SimClock> {
        MorseEngine::new(rig, Lcd::default(), Key(key_closed), SimClock::default())
    }

    #[test]
    fn keyer_sends_e() {
        let mut keyer = engine(Rig::default(), false);
        assert_eq!(keyer.send_morse_message(20, "E"), Ok(()));
        let (rig, _, _, clock) = keyer.into_parts();
        assert!(rig.transmitting);
        assert!(!rig.sidetone);
        assert_eq!(rig.marks, 1);
        // lead-in 60 + dit 60 + gap 60 + char gap 120
        assert_eq!(clock.now_ms(), 300);
    }

    #[test]
    fn keyer_zero_wpm_refused() {
        let mut keyer = engine(Rig::default(), false);
        assert_eq!(keyer.send_morse_message(0, "E"), Err(SendError::InvalidSpeed));
        assert!(!keyer.transceiver().transmitting);
    }

    #[test]
    fn keyer_refuses_in_split() {
        let rig = Rig {
            split: true,
            ..Rig::default()
        };
        let mut keyer = engine(rig, false);
        assert_eq!(keyer.send_morse_message(20, "E"), Err(SendError::SplitActive));
        assert!(!keyer.transceiver().transmitting);
        assert_eq!(keyer.display().writes, 0);
    }

    #[test]
    fn keyer_refuses_with_key_closed() {
        let mut keyer = engine(Rig::default(), true);
        assert_eq!(keyer.send_morse_message(20, "E"), Err(SendError::KeyClosed));
        assert!(!keyer.transceiver().transmitting);
    }

    #[test]
    fn keyer_hold_marker() {
        let mut keyer = engine(Rig::default(), false);
        assert!(keyer.hold_expired(0));
        keyer.send_morse_message(20, "E").unwrap();
        // char done at 300 ms, hold is 10 units
        assert_eq!(keyer.hold_until(), Some(900));
        assert!(!keyer.hold_expired(899));
        assert!(keyer.hold_expired(900));
    }

    #[test]
    fn qrss_restores_base_frequency() {
        let mut keyer = engine(Rig::default(), false);
        keyer.send_qrss_message(-100, 5, "T").unwrap();
        let rig = keyer.transceiver();
        assert!(rig.sidetone);
        assert_eq!(rig.synth.map(Frequency::as_hz), Some(7_000_800));
    }
}

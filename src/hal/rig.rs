//! Board Transceiver
//!
//! The T/R relay and keyed-carrier line as a [`Transceiver`]. The dial is
//! owned by the control loop and handed in with [`BoardRig::set_dial`];
//! `set_frequency` only moves the synthesizer, so a QRSS shift never
//! changes what the operator tuned.

use embassy_stm32::gpio::Output;

use crate::config::in_band;
use crate::fmt::debug;
use crate::hal::gpio::TrRelay;
use crate::ports::Transceiver;
use crate::types::Frequency;

/// Relay, key line and synthesizer setting of the Minima board
pub struct BoardRig<'d> {
    relay: TrRelay<'d>,
    key_line: Output<'d>,
    dial: Frequency,
    synth: Frequency,
}

impl<'d> BoardRig<'d> {
    /// Create the rig in receive with the carrier keyed off
    #[must_use]
    pub fn new(relay: TrRelay<'d>, mut key_line: Output<'d>, dial: Frequency) -> Self {
        key_line.set_low();
        Self {
            relay,
            key_line,
            dial,
            synth: dial,
        }
    }

    /// Retune the dial; ignored while transmitting
    pub fn set_dial(&mut self, dial: Frequency) {
        if self.relay.is_tx() {
            return;
        }
        self.dial = dial;
        self.synth = dial;
    }

    /// Frequency the synthesizer was last set to
    #[must_use]
    pub const fn synth(&self) -> Frequency {
        self.synth
    }
}

impl Transceiver for BoardRig<'_> {
    fn enter_transmit(&mut self) {
        self.relay.set_tx();
    }

    fn enter_receive(&mut self) {
        self.key_line.set_low();
        self.relay.set_rx();
    }

    fn sidetone_on(&mut self) {
        self.key_line.set_high();
    }

    fn sidetone_off(&mut self) {
        self.key_line.set_low();
    }

    fn frequency(&self) -> Frequency {
        self.dial
    }

    fn set_frequency(&mut self, freq: Frequency) {
        debug!("synth {}", freq);
        self.synth = freq;
    }

    fn in_band_limits(&self, freq: Frequency) -> bool {
        in_band(freq)
    }

    fn split_active(&self) -> bool {
        false
    }

    fn if_edit_active(&self) -> bool {
        false
    }
}

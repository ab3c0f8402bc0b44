//! GPIO Abstractions
//!
//! Type-safe wrappers for the Minima's digital lines.

use embassy_stm32::gpio::{Input, Output};

use crate::ports::ActiveLowKey;

/// Status LED state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LedState {
    /// LED is off
    #[default]
    Off,
    /// LED is on
    On,
}

impl defmt::Format for LedState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Off => defmt::write!(f, "OFF"),
            Self::On => defmt::write!(f, "ON"),
        }
    }
}

/// Status LED driver
pub struct StatusLed<'d> {
    pin: Output<'d>,
    state: LedState,
}

impl<'d> StatusLed<'d> {
    /// Create a new status LED (initially off)
    #[must_use]
    pub fn new(mut pin: Output<'d>) -> Self {
        pin.set_low();
        Self {
            pin,
            state: LedState::Off,
        }
    }

    /// Turn LED on
    pub fn on(&mut self) {
        self.pin.set_high();
        self.state = LedState::On;
    }

    /// Turn LED off
    pub fn off(&mut self) {
        self.pin.set_low();
        self.state = LedState::Off;
    }

    /// Get current state
    #[must_use]
    pub const fn state(&self) -> LedState {
        self.state
    }
}

/// Morse key input (active low with internal pull-up)
pub type KeyInput<'d> = ActiveLowKey<Input<'d>>;

/// T/R relay control
pub struct TrRelay<'d> {
    pin: Output<'d>,
    is_tx: bool,
}

impl<'d> TrRelay<'d> {
    /// Create T/R relay control (starts in RX mode)
    #[must_use]
    pub fn new(mut pin: Output<'d>) -> Self {
        pin.set_low();
        Self { pin, is_tx: false }
    }

    /// Switch to transmit mode
    pub fn set_tx(&mut self) {
        self.pin.set_high();
        self.is_tx = true;
    }

    /// Switch to receive mode
    pub fn set_rx(&mut self) {
        self.pin.set_low();
        self.is_tx = false;
    }

    /// Check if in transmit mode
    #[must_use]
    pub const fn is_tx(&self) -> bool {
        self.is_tx
    }
}

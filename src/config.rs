//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the transceiver's tuning
//! and keying subsystems. Pin mappings, timing hold-offs and the tuning
//! sensitivity table are centralized here.

use crate::radio::tuning::DeltaStep;
use crate::types::Frequency;

/// Largest value of the tuning pot reading (10-bit scale)
pub const ADC_MAX: u16 = 1023;

/// Electrical center of the tuning pot on the 10-bit scale
pub const TUNING_CENTER: i32 = 512;

/// Half-width of the center band that releases a tuning lock
pub const TUNING_CENTER_BAND: i32 = 50;

/// Hold-off between two alternate-mode direction reports
pub const ALTERNATE_HOLDOFF_MS: u32 = 200;

/// How often the message keyer polls the manual key while waiting
pub const KEY_POLL_INTERVAL_MS: u32 = 20;

/// Control loop period on the target
pub const CONTROL_CYCLE_MS: u32 = 10;

/// Default keyer speed for stored messages
pub const DEFAULT_WPM: u8 = 13;

/// Transmit hold after the last keyed character, in unit durations
pub const TX_HOLD_UNITS: u32 = 10;

/// Status line column where the mode/speed tag is drawn
pub const STATUS_COLUMN: u8 = 12;

/// Status line row
pub const STATUS_ROW: u8 = 0;

/// Character columns on the LCD
pub const LCD_COLUMNS: usize = 16;

/// Maximum frequency the synthesizer accepts
pub const MAX_FREQUENCY_HZ: u32 = 30_000_000;

/// Default startup frequency (40m QRSS window)
pub const DEFAULT_FREQUENCY_HZ: u32 = 7_000_800;

/// Lower edge of the transmit band (40m)
pub const BAND_LOW_HZ: u32 = 7_000_000;

/// Upper edge of the transmit band (40m)
pub const BAND_HIGH_HZ: u32 = 7_300_000;

/// Stored beacon message
pub const BEACON_TEXT: &str = "VVV DE MINIMA";

/// Beacon QRSS length: positive is seconds per unit, negative milliseconds
pub const BEACON_QRSS_LENGTH: i32 = 3;

/// Carrier shift for beacon marks
pub const BEACON_SHIFT_HZ: i32 = 5;

/// Pause between beacon transmissions
pub const BEACON_INTERVAL_S: u64 = 600;

/// Tuning sensitivity table: `{ pot deviation, frequency delta, hold-off }`.
///
/// Near the center the pot does nothing, further out it steps harder, and
/// at the rail the hold-off grows so a pinned pot cannot run away.
pub const FREQUENCY_STEPS: &[DeltaStep] = &[
    DeltaStep::new(100, 0, 50),
    DeltaStep::new(150, 10, 50),
    DeltaStep::new(200, 30, 50),
    DeltaStep::new(250, 100, 50),
    DeltaStep::new(300, 300, 50),
    DeltaStep::new(350, 1_000, 50),
    DeltaStep::new(400, 3_000, 50),
    DeltaStep::new(450, 100_000, 50),
    DeltaStep::new(490, 1_000_000, 300),
];

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the schematic

    /// Status LED (directly on MCU)
    pub const LED_STATUS: &str = "PA5";

    /// Tuning potentiometer wiper (ADC1_IN1)
    pub const TUNING_POT: &str = "PA0";

    /// Manual key input (active low)
    pub const KEY_IN: &str = "PA3";

    /// T/R relay control
    pub const TR_RELAY: &str = "PB0";

    /// Keyed carrier / sidetone enable
    pub const KEY_OUT: &str = "PB1";
}

/// Build the default startup frequency
#[must_use]
pub const fn default_frequency() -> Option<Frequency> {
    Frequency::from_hz(DEFAULT_FREQUENCY_HZ)
}

/// Check a frequency against the transmit band edges (inclusive)
#[must_use]
pub const fn in_band(freq: Frequency) -> bool {
    freq.as_hz() >= BAND_LOW_HZ && freq.as_hz() <= BAND_HIGH_HZ
}

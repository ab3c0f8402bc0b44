//! Configuration and Constants Tests
//!
//! Tests to verify configuration values are valid and consistent.
//! Run with: cargo test --test config_tests

use minima_firmware::config::*;
use minima_firmware::radio::tuning::FrequencyDeltaTable;
use minima_firmware::types::{Frequency, TransmissionRequest, UnitDuration};

// =============================================================================
// Tuning Pot
// =============================================================================

#[test]
fn tuning_center_is_mid_scale() {
    assert_eq!(TUNING_CENTER, (i32::from(ADC_MAX) + 1) / 2);
}

#[test]
fn center_band_inside_dead_zone() {
    // A pot recentered to release the lock must not tune on the way
    let first = FREQUENCY_STEPS[0];
    assert_eq!(first.delta_hz, 0);
    assert!(TUNING_CENTER_BAND < i32::from(first.threshold));
}

#[test]
fn delta_table_sorted_ascending() {
    assert!(FrequencyDeltaTable::new(FREQUENCY_STEPS).is_some());
    for pair in FREQUENCY_STEPS.windows(2) {
        assert!(pair[0].threshold < pair[1].threshold);
    }
}

#[test]
fn delta_table_deltas_non_decreasing() {
    for pair in FREQUENCY_STEPS.windows(2) {
        assert!(pair[0].delta_hz <= pair[1].delta_hz);
    }
}

#[test]
fn delta_table_reachable() {
    // Every row must be reachable from one side of the pot
    let last = FREQUENCY_STEPS[FREQUENCY_STEPS.len() - 1];
    assert!(i32::from(last.threshold) < i32::from(ADC_MAX) - TUNING_CENTER);
}

#[test]
fn rail_delay_is_longest() {
    let last = FREQUENCY_STEPS[FREQUENCY_STEPS.len() - 1];
    assert!(FREQUENCY_STEPS.iter().all(|step| step.delay_ms <= last.delay_ms));
}

// =============================================================================
// Keying
// =============================================================================

#[test]
fn default_speed_valid() {
    let unit = UnitDuration::from_wpm(DEFAULT_WPM).unwrap();
    assert_eq!(unit.as_ms(), 1200 / u32::from(DEFAULT_WPM));
}

#[test]
fn abort_poll_shorter_than_fast_dit() {
    // 40 WPM is a 30 ms dit
    assert!(KEY_POLL_INTERVAL_MS < UnitDuration::from_wpm(40).unwrap().as_ms());
}

#[test]
fn tx_hold_longer_than_word_gap() {
    assert!(TX_HOLD_UNITS > 7);
}

// =============================================================================
// Display and Frequency
// =============================================================================

#[test]
fn status_tag_fits_on_line() {
    assert!(usize::from(STATUS_COLUMN) + 4 <= LCD_COLUMNS);
}

#[test]
fn default_frequency_in_range() {
    let freq = default_frequency().unwrap();
    assert_eq!(freq.as_hz(), DEFAULT_FREQUENCY_HZ);
    assert!(freq.as_hz() <= Frequency::MAX_HZ);
}

#[test]
fn control_cycle_faster_than_shortest_delay() {
    let shortest = FREQUENCY_STEPS.iter().map(|s| s.delay_ms).min().unwrap();
    assert!(CONTROL_CYCLE_MS < shortest);
}

#[test]
fn pin_names_distinct() {
    let pins = [
        pins::LED_STATUS,
        pins::TUNING_POT,
        pins::KEY_IN,
        pins::TR_RELAY,
        pins::KEY_OUT,
    ];
    for (i, a) in pins.iter().enumerate() {
        for b in &pins[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

// =============================================================================
// Beacon
// =============================================================================

#[test]
fn default_frequency_in_band() {
    assert!(in_band(default_frequency().unwrap()));
}

#[test]
fn band_edges_inclusive() {
    assert!(in_band(Frequency::from_hz(BAND_LOW_HZ).unwrap()));
    assert!(in_band(Frequency::from_hz(BAND_HIGH_HZ).unwrap()));
    assert!(!in_band(Frequency::from_hz(BAND_LOW_HZ - 1).unwrap()));
    assert!(!in_band(Frequency::from_hz(BAND_HIGH_HZ + 1).unwrap()));
}

#[test]
fn beacon_unit_spans_a_control_cycle() {
    let request = TransmissionRequest::qrss(BEACON_QRSS_LENGTH, BEACON_SHIFT_HZ, BEACON_TEXT);
    assert!(request.unit.as_ms() >= CONTROL_CYCLE_MS);
}

#[test]
fn beacon_shift_stays_in_band() {
    let top = Frequency::from_hz(BAND_HIGH_HZ - 1_000).unwrap();
    assert!(in_band(top.offset(BEACON_SHIFT_HZ)));
}

//! Simulated hardware shared by the integration tests
//!
//! Every port reads the same simulated millisecond clock, so events can be
//! asserted with the time they happened.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use minima_firmware::ports::{AnalogSource, Clock, KeySense, StatusDisplay, Transceiver};
use minima_firmware::types::Frequency;

/// Dial frequency every simulated rig starts on
pub const DIAL_HZ: u32 = 7_000_800;

/// Shared simulated clock; sleeping advances it
#[derive(Clone, Default)]
pub struct SimClock {
    now: Rc<Cell<u32>>,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(ms: u32) -> Self {
        let clock = Self::default();
        clock.set(ms);
        clock
    }

    pub fn set(&self, ms: u32) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl Clock for SimClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

impl DelayNs for SimClock {
    fn delay_ns(&mut self, ns: u32) {
        self.advance(ns / 1_000_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.advance(ms);
    }
}

/// Something the rig was told to do
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RigEvent {
    EnterTransmit,
    EnterReceive,
    SidetoneOn,
    SidetoneOff,
    SetFrequency(u32),
}

/// Transceiver that records every call with its timestamp
pub struct RecordingRig {
    clock: SimClock,
    pub events: Vec<(u32, RigEvent)>,
    pub dial: Frequency,
    pub split: bool,
    pub if_edit: bool,
    pub in_band: bool,
}

impl RecordingRig {
    pub fn new(clock: &SimClock) -> Self {
        Self {
            clock: clock.clone(),
            events: Vec::new(),
            dial: Frequency::from_hz(DIAL_HZ).unwrap(),
            split: false,
            if_edit: false,
            in_band: true,
        }
    }

    /// Events without timestamps
    pub fn kinds(&self) -> Vec<RigEvent> {
        self.events.iter().map(|&(_, event)| event).collect()
    }

    /// Timestamps of one kind of event
    pub fn times_of(&self, kind: RigEvent) -> Vec<u32> {
        self.events
            .iter()
            .filter(|&&(_, event)| event == kind)
            .map(|&(at, _)| at)
            .collect()
    }

    pub fn count(&self, kind: RigEvent) -> usize {
        self.times_of(kind).len()
    }

    pub fn is_transmitting(&self) -> bool {
        self.events.iter().rev().find_map(|&(_, event)| match event {
            RigEvent::EnterTransmit => Some(true),
            RigEvent::EnterReceive => Some(false),
            _ => None,
        }) == Some(true)
    }

    pub fn sidetone_on(&self) -> bool {
        self.events.iter().rev().find_map(|&(_, event)| match event {
            RigEvent::SidetoneOn => Some(true),
            RigEvent::SidetoneOff => Some(false),
            _ => None,
        }) == Some(true)
    }

    /// Last frequency programmed into the synthesizer
    pub fn synth_hz(&self) -> Option<u32> {
        self.events.iter().rev().find_map(|&(_, event)| match event {
            RigEvent::SetFrequency(hz) => Some(hz),
            _ => None,
        })
    }

    fn record(&mut self, event: RigEvent) {
        self.events.push((self.clock.now_ms(), event));
    }
}

impl Transceiver for RecordingRig {
    fn enter_transmit(&mut self) {
        self.record(RigEvent::EnterTransmit);
    }

    fn enter_receive(&mut self) {
        self.record(RigEvent::EnterReceive);
    }

    fn sidetone_on(&mut self) {
        self.record(RigEvent::SidetoneOn);
    }

    fn sidetone_off(&mut self) {
        self.record(RigEvent::SidetoneOff);
    }

    fn frequency(&self) -> Frequency {
        self.dial
    }

    fn set_frequency(&mut self, freq: Frequency) {
        self.record(RigEvent::SetFrequency(freq.as_hz()));
    }

    fn in_band_limits(&self, _freq: Frequency) -> bool {
        self.in_band
    }

    fn split_active(&self) -> bool {
        self.split
    }

    fn if_edit_active(&self) -> bool {
        self.if_edit
    }
}

/// LCD that keeps everything written to it
#[derive(Default)]
pub struct RecordingDisplay {
    pub status: Vec<(u8, u8, String)>,
    pub lines: Vec<String>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_untouched(&self) -> bool {
        self.status.is_empty() && self.lines.is_empty()
    }
}

impl StatusDisplay for RecordingDisplay {
    fn write_status(&mut self, col: u8, row: u8, text: &str) {
        self.status.push((col, row, text.to_owned()));
    }

    fn write_message_line(&mut self, text: &str) {
        self.lines.push(text.to_owned());
    }
}

/// Key that closes at a fixed time and stays closed
pub struct ScriptedKey {
    clock: SimClock,
    closes_at: Option<u32>,
    pub polls: u32,
}

impl ScriptedKey {
    pub fn open(clock: &SimClock) -> Self {
        Self {
            clock: clock.clone(),
            closes_at: None,
            polls: 0,
        }
    }

    pub fn closing_at(clock: &SimClock, at_ms: u32) -> Self {
        Self {
            clock: clock.clone(),
            closes_at: Some(at_ms),
            polls: 0,
        }
    }
}

impl KeySense for ScriptedKey {
    fn is_key_closed(&mut self) -> bool {
        self.polls += 1;
        self.closes_at.is_some_and(|at| self.clock.now_ms() >= at)
    }
}

/// Pot that replays a list of readings, holding the last one
pub struct ScriptedPot {
    readings: Vec<u16>,
    next: usize,
}

impl ScriptedPot {
    pub fn new(readings: &[u16]) -> Self {
        Self {
            readings: readings.to_vec(),
            next: 0,
        }
    }

    pub fn fixed(reading: u16) -> Self {
        Self::new(&[reading])
    }
}

impl AnalogSource for ScriptedPot {
    fn read_sample(&mut self) -> u16 {
        let index = self.next.min(self.readings.len().saturating_sub(1));
        self.next += 1;
        self.readings.get(index).copied().unwrap_or(512)
    }
}

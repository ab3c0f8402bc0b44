//! Tick-Driven Beacon Sequencer
//!
//! Same transmission as [`MorseEngine`](super::keyer::MorseEngine), but
//! advanced from a periodic task instead of blocking. Each call to
//! [`BeaconSequencer::tick`] polls the key, finishes the current element
//! once its deadline has passed and starts the next one.
//!
//! # Tick resolution
//!
//! Element deadlines chain from the schedule, never from the tick time.
//! While ticks arrive every `tick_ms`, each edge lands on the first tick at
//! or after its scheduled time and the message ends less than one tick
//! after its scheduled end. That needs every element to span at least one
//! tick, so [`BeaconSequencer::start`] refuses a unit shorter than the tick
//! period.

use crate::config::TX_HOLD_UNITS;
use crate::error::SendError;
use crate::fmt::{debug, info};
use crate::ports::{deadline_reached, KeySense, StatusDisplay, Transceiver};
use crate::radio::keyer::{assert_mark, begin_transmission, check_preconditions, release_mark};
use crate::radio::morse::{KeyingPlan, KeyingStep};
use crate::types::{Frequency, TransmissionRequest};

/// Sequencer progress
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BeaconStatus {
    /// Message still being keyed
    Running,
    /// Message keyed to the end
    Done,
    /// Manual key closed mid-message
    Aborted,
}

#[cfg(feature = "embedded")]
impl defmt::Format for BeaconStatus {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Running => defmt::write!(f, "Running"),
            Self::Done => defmt::write!(f, "Done"),
            Self::Aborted => defmt::write!(f, "Aborted"),
        }
    }
}

/// Non-blocking message sender
#[derive(Clone, Debug)]
pub struct BeaconSequencer<'a> {
    request: TransmissionRequest<'a>,
    plan: KeyingPlan<'a>,
    /// Carrier that QRSS marks shift from
    base: Frequency,
    /// End of the element currently on the air
    deadline: Option<u32>,
    /// Time the next element starts
    cursor: u32,
    /// A mark is asserted
    marking: bool,
    status: BeaconStatus,
    hold_until: Option<u32>,
}

impl<'a> BeaconSequencer<'a> {
    /// Check preconditions and put the rig on the air. `tick_ms` is the
    /// period [`tick`](Self::tick) will be called at; a unit shorter than
    /// that cannot be keyed on schedule and is refused. Nothing is touched
    /// when the request is refused.
    pub fn start<T, S, K>(
        request: TransmissionRequest<'a>,
        now_ms: u32,
        tick_ms: u32,
        rig: &mut T,
        display: &mut S,
        key: &mut K,
    ) -> Result<Self, SendError>
    where
        T: Transceiver,
        S: StatusDisplay,
        K: KeySense,
    {
        if request.unit.as_ms() < tick_ms {
            debug!(
                "beacon refused: {} ms unit, {} ms tick",
                request.unit.as_ms(),
                tick_ms
            );
            return Err(SendError::TickTooCoarse);
        }
        check_preconditions(rig, key)?;
        let base = begin_transmission(rig, display, &request);

        Ok(Self {
            request,
            plan: KeyingPlan::new(request.text),
            base,
            deadline: None,
            cursor: now_ms,
            marking: false,
            status: BeaconStatus::Running,
            hold_until: None,
        })
    }

    /// Advance the transmission to `now_ms`
    pub fn tick<T, S, K>(
        &mut self,
        now_ms: u32,
        rig: &mut T,
        display: &mut S,
        key: &mut K,
    ) -> BeaconStatus
    where
        T: Transceiver,
        S: StatusDisplay,
        K: KeySense,
    {
        if self.status != BeaconStatus::Running {
            return self.status;
        }

        if key.is_key_closed() {
            if self.marking {
                release_mark(rig, &self.request, self.base);
                self.marking = false;
            }
            info!("beacon aborted by key");
            self.status = BeaconStatus::Aborted;
            return self.status;
        }

        if let Some(deadline) = self.deadline {
            if !deadline_reached(now_ms, deadline) {
                return self.status;
            }
            if self.marking {
                release_mark(rig, &self.request, self.base);
                self.marking = false;
            }
            self.cursor = deadline;
            self.deadline = None;
        }

        loop {
            match self.plan.next() {
                Some(KeyingStep::Key(element)) => {
                    if element.is_tone() {
                        assert_mark(rig, &self.request, self.base);
                        self.marking = true;
                    }
                    let length = self.request.unit.times(element.units());
                    self.deadline = Some(self.cursor.wrapping_add(length));
                    return self.status;
                }
                Some(KeyingStep::Advance(rest)) => display.write_message_line(rest),
                Some(KeyingStep::CharDone) => {
                    let hold = self.request.unit.times(TX_HOLD_UNITS);
                    self.hold_until = Some(self.cursor.wrapping_add(hold));
                }
                None => {
                    debug!("beacon complete");
                    self.status = BeaconStatus::Done;
                    return self.status;
                }
            }
        }
    }

    /// Current progress
    #[must_use]
    pub const fn status(&self) -> BeaconStatus {
        self.status
    }

    /// Whether the sequencer has stopped (done or aborted)
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status != BeaconStatus::Running
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

    /// End of the element on the air, if any
    #[must_use]
    pub const fn next_deadline(&self) -> Option<u32> {
        self.deadline
    }
}

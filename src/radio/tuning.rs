//! Tuning Potentiometer Processor
//!
//! The main tuning control is a center-detented potentiometer rather than
//! an encoder. Its deviation from center is quantized through a
//! [`FrequencyDeltaTable`] into a frequency step: nothing near the middle,
//! fine steps a little way out, band-sized jumps at the rail. Each step
//! arms a hold-off so a pot held off-center keeps tuning at a bounded
//! rate.
//!
//! # Locking
//!
//! ```text
//!            lock()
//!   Unlocked ───────▶ Locked
//!      ▲                 │
//!      └─────────────────┘
//!   unlock(), or sample_once() seeing the pot back in the center band
//! ```
//!
//! While locked, no deltas or directions are reported. This lets the
//! control loop jump to a new frequency without the pot immediately
//! dragging it away again.

use crate::config::{
    ADC_MAX, ALTERNATE_HOLDOFF_MS, FREQUENCY_STEPS, TUNING_CENTER, TUNING_CENTER_BAND,
};
use crate::fmt::{debug, trace};
use crate::ports::{deadline_reached, AnalogSource};

/// One row of the sensitivity table
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeltaStep {
    /// Deviation from center the pot must exceed
    pub threshold: u16,
    /// Frequency change per report in Hz
    pub delta_hz: i32,
    /// Hold-off before the next report
    pub delay_ms: u32,
}

impl DeltaStep {
    /// Create a table row
    #[must_use]
    pub const fn new(threshold: u16, delta_hz: i32, delay_ms: u32) -> Self {
        Self {
            threshold,
            delta_hz,
            delay_ms,
        }
    }
}

/// Step table sorted by ascending threshold
#[derive(Clone, Copy, Debug)]
pub struct FrequencyDeltaTable<'t> {
    steps: &'t [DeltaStep],
}

impl<'t> FrequencyDeltaTable<'t> {
    /// Wrap a table, `None` unless thresholds strictly ascend
    #[must_use]
    pub const fn new(steps: &'t [DeltaStep]) -> Option<Self> {
        let mut i = 1;
        while i < steps.len() {
            if steps[i].threshold <= steps[i - 1].threshold {
                return None;
            }
            i += 1;
        }
        Some(Self { steps })
    }

    /// Get the rows
    #[must_use]
    pub const fn steps(&self) -> &'t [DeltaStep] {
        self.steps
    }

    /// Delta and hold-off for a deviation magnitude.
    ///
    /// The last row whose threshold is strictly below `magnitude` wins; a
    /// magnitude equal to a threshold still gets the row before it.
    #[must_use]
    pub fn lookup(&self, magnitude: u16) -> (i32, u32) {
        self.steps
            .iter()
            .take_while(|step| magnitude > step.threshold)
            .last()
            .map_or((0, 0), |step| (step.delta_hz, step.delay_ms))
    }
}

impl FrequencyDeltaTable<'static> {
    /// The stock Minima table from [`FREQUENCY_STEPS`]
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            steps: FREQUENCY_STEPS,
        }
    }
}

impl Default for FrequencyDeltaTable<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

/// Hold-off timer: reports are suppressed until the deadline passes
#[derive(Clone, Copy, Debug, Default)]
pub struct RateLimiter {
    deadline: Option<u32>,
}

impl RateLimiter {
    /// Create an idle limiter
    #[must_use]
    pub const fn new() -> Self {
        Self { deadline: None }
    }

    /// Check if a report may be made at `now_ms`
    #[must_use]
    pub fn is_ready(&self, now_ms: u32) -> bool {
        self.deadline
            .map_or(true, |deadline| deadline_reached(now_ms, deadline))
    }

    /// Block reports for `hold_ms` from `now_ms`
    pub fn arm(&mut self, now_ms: u32, hold_ms: u32) {
        self.deadline = Some(now_ms.wrapping_add(hold_ms));
    }
}

/// Tuning lock state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LockState {
    /// Pot movements tune the radio
    #[default]
    Unlocked,
    /// Pot ignored until unlocked or recentered
    Locked,
}

#[cfg(feature = "embedded")]
impl defmt::Format for LockState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Unlocked => defmt::write!(f, "Unlocked"),
            Self::Locked => defmt::write!(f, "Locked"),
        }
    }
}

/// Tuning pot processor
///
/// [`sample_once`](Self::sample_once) must run exactly once per control
/// cycle; direction reports compare against the previous cycle's sample.
#[derive(Debug)]
pub struct TuningProcessor<'t, A> {
    /// Pot sample source
    source: A,
    /// This cycle's reading
    current: u16,
    /// Last cycle's reading
    previous: u16,
    lock: LockState,
    table: FrequencyDeltaTable<'t>,
    delta_limit: RateLimiter,
    direction_limit: RateLimiter,
}

impl<A: AnalogSource> TuningProcessor<'static, A> {
    /// Seed both samples from a first reading, using the stock table
    pub fn setup(source: A) -> Self {
        Self::with_table(source, FrequencyDeltaTable::standard())
    }
}

impl<'t, A: AnalogSource> TuningProcessor<'t, A> {
    /// Seed both samples from a first reading, using a custom table
    pub fn with_table(mut source: A, table: FrequencyDeltaTable<'t>) -> Self {
        let first = source.read_sample().min(ADC_MAX);
        Self {
            source,
            current: first,
            previous: first,
            lock: LockState::Unlocked,
            table,
            delta_limit: RateLimiter::new(),
            direction_limit: RateLimiter::new(),
        }
    }

    /// Take this cycle's reading; releases the lock if the pot is back in
    /// the center band
    pub fn sample_once(&mut self) {
        self.previous = self.current;
        self.current = self.source.read_sample().min(ADC_MAX);

        if self.lock == LockState::Locked {
            let position = self.position();
            if position > -TUNING_CENTER_BAND && position < TUNING_CENTER_BAND {
                debug!("tuning unlocked: pot back at center ({})", position);
                self.lock = LockState::Unlocked;
            }
        }
    }

    /// Lock tuning
    pub fn lock(&mut self) {
        self.lock = LockState::Locked;
    }

    /// Unlock tuning without a jump from where the pot is now
    pub fn unlock(&mut self) {
        self.lock = LockState::Unlocked;
        self.previous = self.current;
        debug!("tuning unlocked");
    }

    /// Current lock state
    #[must_use]
    pub const fn lock_state(&self) -> LockState {
        self.lock
    }

    /// Check if tuning is locked
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        matches!(self.lock, LockState::Locked)
    }

    /// Signed deviation of this cycle's reading from center
    #[must_use]
    pub const fn position(&self) -> i32 {
        self.current as i32 - TUNING_CENTER
    }

    /// This cycle's raw reading
    #[must_use]
    pub const fn current(&self) -> u16 {
        self.current
    }

    /// Last cycle's raw reading
    #[must_use]
    pub const fn previous(&self) -> u16 {
        self.previous
    }

    /// Frequency change requested by the pot, 0 while held off or locked
    pub fn frequency_delta(&mut self, now_ms: u32) -> i32 {
        if !self.delta_limit.is_ready(now_ms) || self.is_locked() {
            return 0;
        }

        let position = self.position();
        let magnitude = u16::try_from(position.unsigned_abs()).unwrap_or(u16::MAX);
        let (delta, delay) = self.table.lookup(magnitude);
        let delta = if position < 0 { -delta } else { delta };

        trace!("position={} delta={} delay={}", position, delta, delay);

        self.delta_limit.arm(now_ms, delay);
        delta
    }

    /// Direction the pot moved since last cycle (-1, 0, 1), at most once per
    /// [`ALTERNATE_HOLDOFF_MS`]; 0 while held off or locked
    pub fn alternate_direction(&mut self, now_ms: u32) -> i8 {
        if !self.direction_limit.is_ready(now_ms) || self.is_locked() {
            return 0;
        }

        self.direction_limit.arm(now_ms, ALTERNATE_HOLDOFF_MS);

        match self.current.cmp(&self.previous) {
            core::cmp::Ordering::Less => -1,
            core::cmp::Ordering::Equal => 0,
            core::cmp::Ordering::Greater => 1,
        }
    }

    /// Give the sample source back
    pub fn into_source(self) -> A {
        self.source
    }
}

//! Timer Abstractions
//!
//! The embassy time driver as a [`Clock`] and blocking delay.

use embassy_time::{block_for, Duration, Instant};
use embedded_hal::delay::DelayNs;

use crate::ports::Clock;

/// Millisecond clock and busy-wait delay backed by `embassy-time`
#[derive(Clone, Copy, Debug, Default)]
pub struct EmbassyClock;

impl EmbassyClock {
    /// Create the clock
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for EmbassyClock {
    #[allow(clippy::cast_possible_truncation)]
    fn now_ms(&self) -> u32 {
        // Wraps with the rest of the millisecond arithmetic
        Instant::now().as_millis() as u32
    }
}

impl DelayNs for EmbassyClock {
    fn delay_ns(&mut self, ns: u32) {
        block_for(Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(u64::from(ms)));
    }
}

impl defmt::Format for EmbassyClock {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "EmbassyClock({}ms)", self.now_ms());
    }
}

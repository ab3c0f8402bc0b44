//! Log Display
//!
//! The board has no LCD fitted; status and message lines go to the defmt
//! log instead.

use crate::fmt::info;
use crate::ports::StatusDisplay;

/// [`StatusDisplay`] that logs every write
#[derive(Clone, Copy, Debug, Default)]
pub struct LogDisplay;

impl LogDisplay {
    /// Create the display
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl StatusDisplay for LogDisplay {
    fn write_status(&mut self, col: u8, row: u8, text: &str) {
        info!("lcd {},{}: {}", col, row, text);
    }

    fn write_message_line(&mut self, text: &str) {
        info!("lcd: {}", text);
    }
}

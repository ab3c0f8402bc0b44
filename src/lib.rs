//! Minima Transceiver Firmware Library
//!
//! Tuning and automatic-message logic for a Minima-class single-board HF
//! transceiver: a tuning potentiometer processor with tapered sensitivity
//! and lock hysteresis, and a Morse/QRSS message engine that keys the rig
//! until the message ends or the operator closes the key.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    CONTROL LOOP (external)                   │
//! │        band limits  │  VFO caches  │  TX cleanup             │
//! ├─────────────────────────────────────────────────────────────┤
//! │                       RADIO LOGIC                            │
//! │  TuningProcessor  │  MorseEngine  │  BeaconSequencer         │
//! ├─────────────────────────────────────────────────────────────┤
//! │                          PORTS                               │
//! │  Clock │ DelayNs │ KeySense │ AnalogSource │ Transceiver │   │
//! │  StatusDisplay                                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │                 HAL (embassy-stm32, embedded only)           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Owned state**: every component keeps its state in its own struct;
//!   there are no globals
//! - **Hardware behind traits**: the radio logic only sees [`ports`], so the
//!   whole core runs on the host under test
//! - **No unsafe in application code**
//! - **Explicit outcomes**: refusals and aborts come back as [`SendError`]

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_sync;
#[cfg(feature = "embedded")]
pub use embassy_time;

mod fmt;

/// Hardware Abstraction Layer
///
/// embassy-stm32 adapters implementing the [`ports`] traits.
#[cfg(feature = "embedded")]
pub mod hal;

/// Radio Control Logic
///
/// Message keying and tuning input processing.
pub mod radio;

/// Hardware-facing traits consumed by the radio logic
pub mod ports;

/// Error types
pub mod error;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

pub use error::SendError;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::error::SendError;
    pub use crate::ports::{AnalogSource, Clock, KeySense, StatusDisplay, Transceiver};
    pub use crate::radio::beacon::{BeaconSequencer, BeaconStatus};
    pub use crate::radio::keyer::MorseEngine;
    pub use crate::radio::tuning::{FrequencyDeltaTable, LockState, TuningProcessor};
    pub use crate::types::*;

    pub use embedded_hal::delay::DelayNs;

    // Embassy
    #[cfg(feature = "embedded")]
    pub use embassy_time::{Duration, Instant, Timer};

    // Logging
    #[cfg(feature = "embedded")]
    pub use defmt::{debug, error, info, trace, warn};
}

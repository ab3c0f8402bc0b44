//! Hardware Abstraction Layer
//!
//! Adapters from STM32G474 peripherals to the [`crate::ports`] traits.
//! Only built with the `embedded` feature; host builds plug in simulated
//! ports instead.

pub mod adc;
pub mod display;
pub mod gpio;
pub mod rig;
pub mod timer;

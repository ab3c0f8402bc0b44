//! Radio Control Logic
//!
//! Message keying and tuning input processing. Everything here talks to
//! hardware only through [`crate::ports`].

pub mod morse;
pub mod keyer;
pub mod beacon;
pub mod tuning;

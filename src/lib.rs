//! I2C transport for the NXP PN532 NFC controller.
//!
//! Moves already framed PN532 commands and responses over an embedded-hal I2C
//! bus: marker-prefixed chunked writes, marker-requested reads, status polling
//! until the chip is ready, and the wake-up sequence. Building and parsing the
//! command frames is left to the caller, which talks to the [`Transport`] or
//! [`AsyncTransport`] traits.
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![forbid(missing_docs)]

macro_rules! debug_if {
    ($enabled:expr, $($arg:tt)+) => {
        if $enabled {
            log::debug!($($arg)+);
        }
    };
}

/// Blocking transport over `embedded-hal` traits.
pub mod blocking;
/// Async transport over `embedded-hal-async` traits.
pub mod asynch;

pub mod clock;
pub mod config;
/// Protocol constants and timings.
pub mod consts;
pub mod error;
pub mod frame;
pub mod lock;
pub mod ready;
pub mod transport;

pub use clock::Clock;
pub use config::Config;
pub use error::Error;
pub use lock::{BusGuard, BusLock, BusLocked};
pub use transport::{AsyncTransport, Transport};

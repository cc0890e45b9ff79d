//! Transport configuration.

use crate::consts::DEFAULT_ADDRESS;

/// Construction-time settings of a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// 7-bit bus address of the device.
    pub address: u8,
    /// Trace every byte sent and received, and every swallowed bus error.
    ///
    /// Has no effect on behavior.
    pub debug: bool,
}

impl Config {
    /// Default address, tracing off.
    pub const fn new() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            debug: false,
        }
    }

    /// Sets the device address.
    pub const fn with_address(self, address: u8) -> Self {
        Self { address, ..self }
    }

    /// Turns tracing on or off.
    pub const fn with_debug(self, debug: bool) -> Self {
        Self { debug, ..self }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_pn532_address() {
        let config = Config::default();
        assert_eq!(config.address, 0x24);
        assert!(!config.debug);
    }

    #[test]
    fn builder_overrides() {
        let config = Config::new().with_address(0x48).with_debug(true);
        assert_eq!(
            config,
            Config {
                address: 0x48,
                debug: true
            }
        );
    }
}

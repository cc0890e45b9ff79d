//! Transport errors.

use core::fmt::Debug;

use crate::lock::BusLocked;

/// Errors surfaced by the transport.
///
/// Readiness timeouts are not errors: `wait_ready` reports them as `false`.
/// Bus errors raised while polling for readiness or while waking the device
/// are swallowed and never show up here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error<E: Debug> {
    /// The bus guard could not be taken within the wait window.
    #[error("i2c bus seems locked")]
    BusLocked,
    /// The underlying bus write or read failed.
    #[error("i2c bus error: {0:?}")]
    Bus(E),
    /// A read of zero bytes was requested.
    #[error("read requested with an empty buffer")]
    EmptyRead,
    /// The device address does not fit in 7 bits.
    #[error("address {0:#04x} is out of the 7-bit range")]
    AddressOutOfRange(u8),
    /// The device address is one of the reserved I2C addresses.
    #[error("address {0:#04x} is reserved")]
    AddressReserved(u8),
}

impl<E: Debug> From<BusLocked> for Error<E> {
    fn from(_: BusLocked) -> Self {
        Error::BusLocked
    }
}

/// Checks that `address` can be used as a 7-bit target address.
pub(crate) fn validate_address<E: Debug>(address: u8) -> Result<u8, Error<E>> {
    if address >= 0x80 {
        Err(Error::AddressOutOfRange(address))
    } else if (address & 0x78) == 0 || (address & 0x78) == 0x78 {
        Err(Error::AddressReserved(address))
    } else {
        Ok(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type E = Error<()>;

    #[test]
    fn accepts_default_address() {
        assert_eq!(validate_address::<()>(0x24), Ok(0x24));
    }

    #[test]
    fn rejects_out_of_range_address() {
        assert_eq!(validate_address::<()>(0x80), Err(E::AddressOutOfRange(0x80)));
        assert_eq!(validate_address::<()>(0xff), Err(E::AddressOutOfRange(0xff)));
    }

    #[test]
    fn rejects_reserved_addresses() {
        for address in (0x00..=0x07).chain(0x78..=0x7f) {
            assert_eq!(validate_address::<()>(address), Err(E::AddressReserved(address)));
        }
    }

    #[test]
    fn bus_locked_converts() {
        assert_eq!(E::from(BusLocked), E::BusLocked);
    }

    #[test]
    fn display() {
        assert_eq!(E::BusLocked.to_string(), "i2c bus seems locked");
        assert_eq!(Error::Bus(7u8).to_string(), "i2c bus error: 7");
        assert_eq!(E::AddressReserved(0x7a).to_string(), "address 0x7a is reserved");
    }
}

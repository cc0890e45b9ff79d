//! Capability traits the command layer talks to.
//!
//! A PN532 driver only needs to push a frame, pull a response and know when the
//! chip is ready. Depending on these traits instead of a concrete transport
//! keeps it independent of the bus in use.

use fugit::MillisDurationU32;

use crate::consts::DEFAULT_READY_TIMEOUT;

/// Blocking frame transport.
pub trait Transport {
    /// Error of a failed `write` or `read`.
    type Error;

    /// Sends a complete frame.
    fn write(&mut self, frame: &[u8]) -> Result<(), Self::Error>;

    /// Fills `buf` with the next `buf.len()` bytes from the device.
    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Waits until the device has a response ready.
    ///
    /// Returns `false` if `timeout` elapses first.
    fn wait_ready(&mut self, timeout: MillisDurationU32) -> bool;

    /// [`Transport::wait_ready`] with [`DEFAULT_READY_TIMEOUT`].
    fn wait_ready_default(&mut self) -> bool {
        self.wait_ready(DEFAULT_READY_TIMEOUT)
    }

    /// Brings the device out of its low-power states.
    fn wake(&mut self);
}

/// Async counterpart of [`Transport`].
#[allow(async_fn_in_trait)]
pub trait AsyncTransport {
    /// Error of a failed `write` or `read`.
    type Error;

    /// Sends a complete frame.
    async fn write(&mut self, frame: &[u8]) -> Result<(), Self::Error>;

    /// Fills `buf` with the next `buf.len()` bytes from the device.
    async fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Waits until the device has a response ready.
    ///
    /// Returns `false` if `timeout` elapses first.
    async fn wait_ready(&mut self, timeout: MillisDurationU32) -> bool;

    /// [`AsyncTransport::wait_ready`] with [`DEFAULT_READY_TIMEOUT`].
    async fn wait_ready_default(&mut self) -> bool {
        self.wait_ready(DEFAULT_READY_TIMEOUT).await
    }

    /// Brings the device out of its low-power states.
    async fn wake(&mut self);
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn write(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        T::write(self, frame)
    }

    fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        T::read(self, buf)
    }

    fn wait_ready(&mut self, timeout: MillisDurationU32) -> bool {
        T::wait_ready(self, timeout)
    }

    fn wake(&mut self) {
        T::wake(self)
    }
}

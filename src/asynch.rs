use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;
use fugit::MillisDurationU32;

use crate::clock::Clock;
use crate::config::Config;
use crate::consts::{
    CHUNK_PAUSE, READY_PROBE_PAUSE, READY_SETTLE, READ_MARKER, WAKE_PATTERN, WAKE_PATTERN_PAUSE,
    WAKE_PROBE_PAUSE, WAKE_STABILIZE,
};
use crate::error::{validate_address, Error};
use crate::frame::chunks;
use crate::lock::{BusLock, LockRef};
use crate::ready::{Probe, ReadyWait, Readiness};
use crate::transport::AsyncTransport;

/// PN532 transport on an async I2C bus.
///
/// `write` and `read` run under the bus lock; `wait_ready` and `wake` do not.
/// Dropping a `write` or `read` future part way releases the lock.
pub struct I2cTransport<'l, I2C, D, C> {
    i2c: I2C,
    delay: D,
    clock: C,
    address: u8,
    debug: bool,
    lock: LockRef<'l>,
}

impl<'l, I2C, D, C> I2cTransport<'l, I2C, D, C>
where
    I2C: I2c,
    D: DelayNs,
    C: Clock,
{
    /// Creates a transport with a lock of its own.
    pub fn new(i2c: I2C, delay: D, clock: C, config: Config) -> Result<Self, Error<I2C::Error>> {
        Self::build(i2c, delay, clock, config, LockRef::Owned(BusLock::new()))
    }

    /// Creates a transport serializing its exchanges on `lock`.
    ///
    /// Use this when other code (another transport, an interrupt handler) must
    /// not interleave with this transport's exchanges.
    pub fn with_lock(
        i2c: I2C,
        delay: D,
        clock: C,
        config: Config,
        lock: &'l BusLock,
    ) -> Result<Self, Error<I2C::Error>> {
        Self::build(i2c, delay, clock, config, LockRef::Shared(lock))
    }

    fn build(
        i2c: I2C,
        delay: D,
        clock: C,
        config: Config,
        lock: LockRef<'l>,
    ) -> Result<Self, Error<I2C::Error>> {
        let address = validate_address::<I2C::Error>(config.address)?;
        Ok(Self {
            i2c,
            delay,
            clock,
            address,
            debug: config.debug,
            lock,
        })
    }

    /// Bus address of the device.
    #[inline]
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Lock guarding this transport's exchanges.
    #[inline]
    pub fn lock(&self) -> &BusLock {
        &self.lock
    }

    /// Gives back the bus, the delay and the clock.
    pub fn free(self) -> (I2C, D, C) {
        (self.i2c, self.delay, self.clock)
    }

    /// Sends `frame`, prefixed with the write marker, in chunks of at most
    /// [`CHUNK_SIZE`](crate::consts::CHUNK_SIZE) bytes.
    ///
    /// A bus error aborts the remaining chunks.
    pub async fn write(&mut self, frame: &[u8]) -> Result<(), Error<I2C::Error>> {
        debug_if!(self.debug, "Writing: {:02x?}", frame);
        if self.lock.is_locked() {
            debug_if!(self.debug, "I2C bus locked, waiting...");
        }
        let _guard = self.lock.acquire_async(&mut self.delay).await?;

        for chunk in chunks(frame) {
            self.i2c
                .write(self.address, &chunk)
                .await
                .map_err(Error::Bus)?;
            self.delay.delay_ms(CHUNK_PAUSE.to_millis()).await;
        }
        Ok(())
    }

    /// Fills `buf` with `buf.len()` bytes from the device.
    ///
    /// The read request marker and the read itself form one bus transaction.
    pub async fn read(&mut self, buf: &mut [u8]) -> Result<(), Error<I2C::Error>> {
        if buf.is_empty() {
            return Err(Error::EmptyRead);
        }
        debug_if!(self.debug, "Reading {} bytes from I2C", buf.len());
        if self.lock.is_locked() {
            debug_if!(self.debug, "I2C bus locked, waiting...");
        }
        let _guard = self.lock.acquire_async(&mut self.delay).await?;

        self.i2c
            .write_read(self.address, &[READ_MARKER], buf)
            .await
            .map_err(Error::Bus)?;
        debug_if!(self.debug, "Read: {:02x?}", buf);
        Ok(())
    }

    /// Polls the status byte until the device reports ready.
    ///
    /// Returns `false` once `timeout` has elapsed. Bus errors count as "not
    /// ready yet".
    pub async fn wait_ready(&mut self, timeout: MillisDurationU32) -> bool {
        let mut wait = ReadyWait::new(self.clock.now(), timeout);
        self.delay.delay_ms(READY_SETTLE.to_millis()).await;

        while wait.keep_probing(self.clock.now()) {
            let probe = Probe::classify(self.probe_status().await);
            match &probe {
                Probe::Unexpected(status) => {
                    debug_if!(self.debug, "Unexpected status: {:#04x}", status)
                }
                Probe::BusError(e) => debug_if!(self.debug, "I2C error: {:?}", e),
                Probe::Ready | Probe::NotReady => {}
            }
            if let Some(pause) = wait.observe(&probe) {
                self.delay.delay_ms(pause.to_millis()).await;
            }
        }

        if wait.state() == Readiness::TimedOut {
            debug_if!(
                self.debug,
                "Wait ready timed out after {} ms",
                timeout.to_millis()
            );
        }
        wait.state() == Readiness::Ready
    }

    async fn probe_status(&mut self) -> Result<u8, I2C::Error> {
        self.i2c.write(self.address, &[READ_MARKER]).await?;
        self.delay.delay_ms(READY_PROBE_PAUSE.to_millis()).await;
        let mut status = [0];
        self.i2c.read(self.address, &mut status).await?;
        Ok(status[0])
    }

    /// Wakes the device from power-down or standby.
    ///
    /// Clears the bus lock first. Bus errors are expected while the chip
    /// comes up and are ignored.
    pub async fn wake(&mut self) {
        debug_if!(self.debug, "Waking up PN532");
        self.lock.release();

        if let Err(e) = self.i2c.write(self.address, &[]).await {
            debug_if!(self.debug, "Wake probe failed: {:?}", e);
        }
        self.delay.delay_ms(WAKE_PROBE_PAUSE.to_millis()).await;

        if let Err(e) = self.i2c.write(self.address, &WAKE_PATTERN).await {
            debug_if!(self.debug, "Wake pattern failed: {:?}", e);
        }
        self.delay.delay_ms(WAKE_PATTERN_PAUSE.to_millis()).await;

        self.delay.delay_ms(WAKE_STABILIZE.to_millis()).await;
    }
}

impl<I2C, D, C> AsyncTransport for I2cTransport<'_, I2C, D, C>
where
    I2C: I2c,
    D: DelayNs,
    C: Clock,
{
    type Error = Error<I2C::Error>;

    async fn write(&mut self, frame: &[u8]) -> Result<(), Self::Error> {
        I2cTransport::write(self, frame).await
    }

    async fn read(&mut self, buf: &mut [u8]) -> Result<(), Self::Error> {
        I2cTransport::read(self, buf).await
    }

    async fn wait_ready(&mut self, timeout: MillisDurationU32) -> bool {
        I2cTransport::wait_ready(self, timeout).await
    }

    async fn wake(&mut self) {
        I2cTransport::wake(self).await
    }
}

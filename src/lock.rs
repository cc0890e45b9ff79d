//! Exclusive access to the bus for one full exchange.
//!
//! A [`BusLock`] is a flag with scoped ownership: taking it yields a
//! [`BusGuard`] and dropping the guard clears the flag again, whatever path the
//! guarded code leaves through. A contended lock is polled every
//! [`LOCK_POLL_INTERVAL`] for at most [`LOCK_POLL_ATTEMPTS`] attempts before
//! giving up with [`BusLocked`].
//!
//! The flag is atomic, so one lock may be shared (for instance from a `static`)
//! between an interrupt handler and the main loop, or between threads.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::consts::{LOCK_POLL_ATTEMPTS, LOCK_POLL_INTERVAL};

/// The bus stayed locked for the whole wait window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("i2c bus seems locked")]
pub struct BusLocked;

/// Single-owner flag guarding the bus.
#[derive(Debug, Default)]
pub struct BusLock {
    locked: AtomicBool,
}

/// Proof of ownership of a [`BusLock`]. Clears the lock when dropped.
#[derive(Debug)]
#[must_use = "the bus is released as soon as the guard is dropped"]
pub struct BusGuard<'a> {
    lock: &'a BusLock,
}

impl BusLock {
    /// Creates an unlocked lock.
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
        }
    }

    /// Whether an exchange currently holds the lock.
    #[inline]
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }

    /// Takes the lock if it is free, without waiting.
    pub fn try_acquire(&self) -> Option<BusGuard<'_>> {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| BusGuard { lock: self })
    }

    /// Takes the lock, polling for up to ~2 s while someone else holds it.
    pub fn acquire<D>(&self, delay: &mut D) -> Result<BusGuard<'_>, BusLocked>
    where
        D: embedded_hal::delay::DelayNs,
    {
        if let Some(guard) = self.try_acquire() {
            return Ok(guard);
        }
        for _ in 0..LOCK_POLL_ATTEMPTS {
            delay.delay_ms(LOCK_POLL_INTERVAL.to_millis());
            if let Some(guard) = self.try_acquire() {
                return Ok(guard);
            }
        }
        Err(BusLocked)
    }

    /// Same policy as [`BusLock::acquire`], yielding to the executor while waiting.
    pub async fn acquire_async<D>(&self, delay: &mut D) -> Result<BusGuard<'_>, BusLocked>
    where
        D: embedded_hal_async::delay::DelayNs,
    {
        if let Some(guard) = self.try_acquire() {
            return Ok(guard);
        }
        for _ in 0..LOCK_POLL_ATTEMPTS {
            delay.delay_ms(LOCK_POLL_INTERVAL.to_millis()).await;
            if let Some(guard) = self.try_acquire() {
                return Ok(guard);
            }
        }
        Err(BusLocked)
    }

    /// Clears the lock regardless of who holds it.
    ///
    /// Only meant for recovery, when the device has been power cycled and any
    /// exchange that was in flight is gone anyway.
    pub fn release(&self) {
        self.locked.store(false, Ordering::Release);
    }
}

impl Drop for BusGuard<'_> {
    fn drop(&mut self) {
        self.lock.release();
    }
}

/// Lock owned by a transport, or shared with other users of the same bus.
#[derive(Debug)]
pub(crate) enum LockRef<'l> {
    Owned(BusLock),
    Shared(&'l BusLock),
}

impl core::ops::Deref for LockRef<'_> {
    type Target = BusLock;

    fn deref(&self) -> &BusLock {
        match self {
            LockRef::Owned(lock) => lock,
            LockRef::Shared(lock) => lock,
        }
    }
}

//! Readiness state machine shared by the blocking and async transports.
//!
//! After a command the device needs time before it can answer. Readiness is
//! found by asking for the status byte ([`READ_MARKER`](crate::consts::READ_MARKER)
//! then a one byte read) until its low bit is set or the timeout elapses. The
//! transports own the I/O; this module decides what each probe means and what
//! to do next.

use fugit::MillisDurationU32;

use crate::clock::{elapsed, Duration, Instant};
use crate::consts::READY_RETRY;

/// Where a readiness wait currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// Still probing.
    Waiting,
    /// A status byte with its low bit set was read.
    Ready,
    /// The timeout elapsed first.
    TimedOut,
}

/// Outcome of a single status probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe<E> {
    /// Low bit of the status byte is set.
    Ready,
    /// Status byte is zero.
    NotReady,
    /// Non-zero status with the low bit clear.
    Unexpected(u8),
    /// The status request or read failed on the bus.
    BusError(E),
}

impl<E> Probe<E> {
    /// Interprets the result of a status request.
    pub fn classify(status: Result<u8, E>) -> Self {
        match status {
            Ok(status) if status & 0x01 != 0 => Probe::Ready,
            Ok(0x00) => Probe::NotReady,
            Ok(status) => Probe::Unexpected(status),
            Err(e) => Probe::BusError(e),
        }
    }

    /// Pause to take before probing again, if any.
    pub fn backoff(&self) -> Option<MillisDurationU32> {
        match self {
            Probe::NotReady | Probe::BusError(_) => Some(READY_RETRY),
            Probe::Ready | Probe::Unexpected(_) => None,
        }
    }
}

/// Bookkeeping of one readiness wait.
#[derive(Debug, Clone, Copy)]
pub struct ReadyWait {
    start: Instant,
    timeout: Duration,
    state: Readiness,
}

impl ReadyWait {
    /// Starts waiting at `start`, giving up once `timeout` has elapsed.
    pub fn new(start: Instant, timeout: MillisDurationU32) -> Self {
        Self {
            start,
            timeout: Duration::millis(u64::from(timeout.to_millis())),
            state: Readiness::Waiting,
        }
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> Readiness {
        self.state
    }

    /// Whether another probe may be issued at `now`.
    ///
    /// Moves to [`Readiness::TimedOut`] once the timeout has elapsed.
    pub fn keep_probing(&mut self, now: Instant) -> bool {
        if self.state != Readiness::Waiting {
            return false;
        }
        if elapsed(self.start, now) >= self.timeout {
            self.state = Readiness::TimedOut;
            return false;
        }
        true
    }

    /// Records a probe outcome and returns the pause to take before the next one.
    pub fn observe<E>(&mut self, probe: &Probe<E>) -> Option<MillisDurationU32> {
        if matches!(probe, Probe::Ready) {
            self.state = Readiness::Ready;
        }
        probe.backoff()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: u64) -> Instant {
        Instant::from_ticks(ms * 1_000)
    }

    #[test]
    fn classification_follows_low_bit() {
        assert_eq!(Probe::<()>::classify(Ok(0x01)), Probe::Ready);
        assert_eq!(Probe::<()>::classify(Ok(0xff)), Probe::Ready);
        assert_eq!(Probe::<()>::classify(Ok(0x00)), Probe::NotReady);
        assert_eq!(Probe::<()>::classify(Ok(0x80)), Probe::Unexpected(0x80));
        assert_eq!(Probe::classify(Err("nack")), Probe::BusError("nack"));
    }

    #[test]
    fn only_not_ready_and_errors_back_off() {
        assert_eq!(Probe::<()>::NotReady.backoff(), Some(READY_RETRY));
        assert_eq!(Probe::BusError(()).backoff(), Some(READY_RETRY));
        assert_eq!(Probe::<()>::Unexpected(0x02).backoff(), None);
        assert_eq!(Probe::<()>::Ready.backoff(), None);
    }

    #[test]
    fn ready_probe_ends_the_wait() {
        let mut wait = ReadyWait::new(at(0), MillisDurationU32::millis(1_000));
        assert!(wait.keep_probing(at(51)));
        assert_eq!(wait.observe(&Probe::<()>::NotReady), Some(READY_RETRY));
        assert_eq!(wait.state(), Readiness::Waiting);
        assert_eq!(wait.observe(&Probe::<()>::Ready), None);
        assert_eq!(wait.state(), Readiness::Ready);
        assert!(!wait.keep_probing(at(200)));
        assert_eq!(wait.state(), Readiness::Ready);
    }

    #[test]
    fn times_out_once_timeout_elapsed() {
        let mut wait = ReadyWait::new(at(10), MillisDurationU32::millis(100));
        assert!(wait.keep_probing(at(10)));
        assert!(wait.keep_probing(at(109)));
        assert!(!wait.keep_probing(at(110)));
        assert_eq!(wait.state(), Readiness::TimedOut);
        // no further probes once timed out
        assert!(!wait.keep_probing(at(50)));
    }

    #[test]
    fn zero_timeout_never_probes() {
        let mut wait = ReadyWait::new(at(0), MillisDurationU32::millis(0));
        assert!(!wait.keep_probing(at(0)));
        assert_eq!(wait.state(), Readiness::TimedOut);
    }
}

//! Monotonic time used to bound readiness polling.

/// Microsecond instant.
pub type Instant = fugit::TimerInstantU64<1_000_000>;
/// Microsecond duration.
pub type Duration = fugit::TimerDurationU64<1_000_000>;

/// Source of monotonic time.
pub trait Clock {
    /// Current instant. Must never go backwards.
    fn now(&mut self) -> Instant;
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn now(&mut self) -> Instant {
        C::now(self)
    }
}

/// Time from `start` to `now`, saturating at zero if the clock went backwards.
pub(crate) fn elapsed(start: Instant, now: Instant) -> Duration {
    now.checked_duration_since(start)
        .unwrap_or(Duration::from_ticks(0))
}

#[cfg(any(test, feature = "std"))]
pub use self::host::{StdClock, StdDelay};

#[cfg(any(test, feature = "std"))]
mod host {
    use super::{Clock, Instant};

    /// [`Clock`] backed by [`std::time::Instant`].
    #[derive(Debug, Clone, Copy)]
    pub struct StdClock {
        origin: std::time::Instant,
    }

    impl StdClock {
        /// Creates a clock counting from now.
        pub fn new() -> Self {
            Self {
                origin: std::time::Instant::now(),
            }
        }
    }

    impl Default for StdClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Clock for StdClock {
        fn now(&mut self) -> Instant {
            let micros = u64::try_from(self.origin.elapsed().as_micros()).unwrap_or(u64::MAX);
            Instant::from_ticks(micros)
        }
    }

    /// Blocking delay that puts the current thread to sleep.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct StdDelay;

    impl embedded_hal::delay::DelayNs for StdDelay {
        fn delay_ns(&mut self, ns: u32) {
            std::thread::sleep(std::time::Duration::from_nanos(ns.into()));
        }

        fn delay_ms(&mut self, ms: u32) {
            std::thread::sleep(std::time::Duration::from_millis(ms.into()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(u64);

    impl Clock for Fixed {
        fn now(&mut self) -> Instant {
            Instant::from_ticks(self.0)
        }
    }

    #[test]
    fn elapsed_is_measured_from_start() {
        assert_eq!(
            elapsed(Instant::from_ticks(500), Fixed(1_500).now()),
            Duration::from_ticks(1_000)
        );
    }

    #[test]
    fn elapsed_saturates_when_clock_goes_back() {
        assert_eq!(
            elapsed(Instant::from_ticks(500), Fixed(100).now()),
            Duration::from_ticks(0)
        );
    }

    #[test]
    fn std_clock_advances_with_std_delay() {
        use embedded_hal::delay::DelayNs;

        let mut clock = StdClock::new();
        let start = clock.now();
        StdDelay.delay_ms(5);
        assert!(elapsed(start, clock.now()) >= Duration::millis(5));
    }
}

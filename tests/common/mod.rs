//! Simulated time shared by the transport tests.
//!
//! Delays do not sleep: they move a virtual clock forward and are recorded so
//! tests can check the exact pacing of an exchange.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pn532_i2c::clock::{Clock, Instant};
use pn532_i2c::BusGuard;

pub const ADDR: u8 = 0x24;

/// Virtual microsecond counter.
#[derive(Clone, Default)]
pub struct SimTime {
    now_us: Rc<Cell<u64>>,
    delays_ms: Rc<RefCell<Vec<u32>>>,
}

impl SimTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_us.get() / 1_000
    }

    /// Every `delay_ms` call made so far, in order.
    pub fn delays(&self) -> Vec<u32> {
        self.delays_ms.borrow().clone()
    }

    pub fn clock(&self) -> SimClock {
        SimClock(self.clone())
    }

    pub fn delay<'a>(&self) -> SimDelay<'a> {
        SimDelay {
            time: self.clone(),
            held: None,
        }
    }

    fn advance_us(&self, us: u64) {
        self.now_us.set(self.now_us.get() + us);
    }
}

pub struct SimClock(SimTime);

impl Clock for SimClock {
    fn now(&mut self) -> Instant {
        Instant::from_ticks(self.0.now_us.get())
    }
}

/// Delay advancing [`SimTime`]; can hold a bus guard on behalf of "another
/// caller" and drop it once virtual time reaches a given point.
pub struct SimDelay<'a> {
    time: SimTime,
    held: Option<(u64, BusGuard<'a>)>,
}

impl<'a> SimDelay<'a> {
    pub fn release_at(mut self, at_ms: u64, guard: BusGuard<'a>) -> Self {
        self.held = Some((at_ms, guard));
        self
    }

    fn elapse_ms(&mut self, ms: u32) {
        self.time.delays_ms.borrow_mut().push(ms);
        self.time.advance_us(u64::from(ms) * 1_000);
        self.check_release();
    }

    fn check_release(&mut self) {
        let now = self.time.now_ms();
        if matches!(self.held, Some((at, _)) if now >= at) {
            self.held = None;
        }
    }
}

impl embedded_hal::delay::DelayNs for SimDelay<'_> {
    fn delay_ns(&mut self, ns: u32) {
        self.time.advance_us(u64::from(ns) / 1_000);
        self.check_release();
    }

    fn delay_ms(&mut self, ms: u32) {
        self.elapse_ms(ms);
    }
}

impl embedded_hal_async::delay::DelayNs for SimDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        embedded_hal::delay::DelayNs::delay_ns(self, ns);
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.elapse_ms(ms);
    }
}

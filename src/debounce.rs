//! Trailing-edge debouncing
//!
//! A [`Debouncer`] holds at most one pending value and a deadline. Every call
//! replaces the value and pushes the deadline to `now + delay`; polling after
//! the deadline yields the latest value exactly once. Nothing fires on the
//! leading edge. A pending value can be dropped with `cancel`.
//!
//! Time is read from a [`Clock`] so hosts can drive debouncers from their own
//! event loop and tests can step time by hand.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Source of monotonic time
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-stepped clock; clones share the same time
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    elapsed_ms: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed_ms: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn advance(&self, by: Duration) {
        let ms = u64::try_from(by.as_millis()).unwrap_or(u64::MAX);
        self.elapsed_ms.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + Duration::from_millis(self.elapsed_ms.load(Ordering::SeqCst))
    }
}

/// Pending-value debouncer
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(Instant, T)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Schedule `value`, replacing any pending one and restarting the window
    pub fn call(&mut self, now: Instant, value: T) {
        self.pending = Some((now + self.delay, value));
    }

    /// Take the pending value if its quiet period has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((deadline, _)) if now >= *deadline => self.pending.take().map(|(_, value)| value),
            _ => None,
        }
    }

    /// Take the pending value now, ignoring the deadline (host shutdown)
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(_, value)| value)
    }

    /// Drop the pending value; returns whether one was pending
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(deadline, _)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// A debounced action: `call` schedules, `tick` runs the action when due
pub struct DebouncedFn<T, F, C> {
    debouncer: Debouncer<T>,
    action: F,
    clock: C,
}

impl<T, F, C> DebouncedFn<T, F, C>
where
    F: FnMut(T),
    C: Clock,
{
    pub fn new(action: F, delay: Duration, clock: C) -> Self {
        Self {
            debouncer: Debouncer::new(delay),
            action,
            clock,
        }
    }

    pub fn call(&mut self, value: T) {
        self.debouncer.call(self.clock.now(), value);
    }

    /// Run the action if the window has elapsed; returns whether it ran
    pub fn tick(&mut self) -> bool {
        match self.debouncer.poll(self.clock.now()) {
            Some(value) => {
                (self.action)(value);
                true
            }
            None => false,
        }
    }

    pub fn cancel(&mut self) -> bool {
        self.debouncer.cancel()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}

/// Wrap `action` so calls are coalesced over `delay` of quiet time
pub fn debounce<T, F, C>(action: F, delay: Duration, clock: C) -> DebouncedFn<T, F, C>
where
    F: FnMut(T),
    C: Clock,
{
    DebouncedFn::new(action, delay, clock)
}

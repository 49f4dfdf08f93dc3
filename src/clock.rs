use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Time source for expiration-based ordering. Injected so tests can drive a
/// deterministic clock.
pub trait Clock {
    /// Milliseconds since the clock's epoch. Must be monotonic.
    fn now_ms(&self) -> u64;
}

/// Monotonic clock anchored to an `Instant` taken at construction.
#[derive(Debug)]
pub struct SystemClock {
    epoch: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock for tests and deterministic embeddings.
///
/// Clones share the same underlying time, so a test can keep one handle and
/// give another to the scheduler.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

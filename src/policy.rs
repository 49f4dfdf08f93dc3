use std::fmt;
use std::rc::Rc;

use crate::clock::Clock;
use crate::task::{Priority, SortKey};

/// Pure mapping from priority to a queue timeout in milliseconds.
///
/// Injected configuration rather than a hard-coded constant so expiration
/// ordering can be tested against a deterministic clock. The mapping must be
/// total over the priority range.
#[derive(Clone)]
pub struct TimeoutMap(Rc<dyn Fn(Priority) -> u64>);

impl TimeoutMap {
    pub fn new(f: impl Fn(Priority) -> u64 + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn timeout_ms(&self, priority: Priority) -> u64 {
        (self.0)(priority)
    }
}

impl Default for TimeoutMap {
    /// Two buckets: urgent work expires immediately, everything else within
    /// 100ms. Callers wanting finer granularity supply their own mapping.
    fn default() -> Self {
        Self::new(|priority| if priority == Priority::HIGH { 0 } else { 100 })
    }
}

impl fmt::Debug for TimeoutMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TimeoutMap(..)")
    }
}

/// How a task's sort key is derived from its priority at creation time.
#[derive(Debug, Clone)]
pub enum SortPolicy {
    /// Sort key is the raw priority. Strict priority order; a continuous
    /// stream of urgent tasks can starve less-urgent ones indefinitely.
    Static,
    /// Sort key is `now + timeout(priority)`, an expiration timestamp.
    /// Bounds any task's wait to its timeout: relative urgency decays as a
    /// task ages, so older low-priority work eventually outranks newer
    /// urgent arrivals.
    Expiration(TimeoutMap),
}

impl Default for SortPolicy {
    fn default() -> Self {
        SortPolicy::Expiration(TimeoutMap::default())
    }
}

impl SortPolicy {
    pub(crate) fn sort_key(&self, clock: &dyn Clock, priority: Priority) -> SortKey {
        match self {
            SortPolicy::Static => u64::from(priority.0),
            SortPolicy::Expiration(timeouts) => {
                clock.now_ms().saturating_add(timeouts.timeout_ms(priority))
            }
        }
    }
}

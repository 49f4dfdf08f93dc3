use std::fmt;
use std::rc::Rc;

use crate::host::Defer;
use crate::policy::SortPolicy;

/// When the work loop runs relative to `schedule()`.
#[derive(Clone)]
pub enum DrainMode {
    /// `schedule()` drains the queue inline and returns only once it is
    /// empty. Blocks the caller for every queued task, including tasks
    /// inserted while draining.
    Synchronous,
    /// `schedule()` returns immediately; the drain runs on the host's next
    /// turn via the injected [`Defer`] primitive.
    Deferred(Rc<dyn Defer>),
}

impl fmt::Debug for DrainMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrainMode::Synchronous => f.write_str("Synchronous"),
            DrainMode::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    pub policy: SortPolicy,
    pub drain: DrainMode,
}

impl SchedulerConfig {
    /// Inline drain with the default expiration policy.
    pub fn synchronous() -> Self {
        Self {
            policy: SortPolicy::default(),
            drain: DrainMode::Synchronous,
        }
    }

    /// Deferred drain through `defer`, with the default expiration policy.
    pub fn deferred(defer: impl Defer + 'static) -> Self {
        Self {
            policy: SortPolicy::default(),
            drain: DrainMode::Deferred(Rc::new(defer)),
        }
    }

    pub fn with_policy(mut self, policy: SortPolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::synchronous()
    }
}

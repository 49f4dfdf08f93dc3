use std::fmt;

/// Monotonically increasing identifier assigned at task creation.
///
/// Never reused and never decreases within one scheduler instance; its only
/// job is to break ties between tasks with equal sort keys, which keeps
/// equal-urgency tasks in FIFO order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub u64);

/// Caller-supplied urgency level. Lower value = more urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Priority(pub u8);

impl Priority {
    /// Most urgent level; maps to a zero queue timeout by default.
    pub const HIGH: Priority = Priority(0);
    /// Less urgent work that may wait behind urgent tasks, bounded by its
    /// queue timeout under expiration ordering.
    pub const LOW: Priority = Priority(1);
}

/// Derived ordering key: the raw priority under static ordering, or an
/// expiration timestamp in clock milliseconds under expiration ordering.
/// Computed once at creation, never after.
pub type SortKey = u64;

/// A unit of deferred work.
///
/// The callback is owned exclusively by the task until [`run`](Task::run)
/// consumes it; a task executes at most once.
pub struct Task {
    id: TaskId,
    callback: Box<dyn FnOnce()>,
    priority: Priority,
    sort_key: SortKey,
}

impl Task {
    /// The scheduler assigns ids and derives sort keys; direct queue users
    /// carry the same obligations (unique, increasing ids).
    pub fn new(
        id: TaskId,
        callback: Box<dyn FnOnce()>,
        priority: Priority,
        sort_key: SortKey,
    ) -> Self {
        Self {
            id,
            callback,
            priority,
            sort_key,
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// Composite ordering key. Total: ids are unique.
    pub(crate) fn key(&self) -> (SortKey, TaskId) {
        (self.sort_key, self.id)
    }

    /// Consume the task and execute its callback.
    pub fn run(self) {
        (self.callback)()
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id)
            .field("priority", &self.priority)
            .field("sort_key", &self.sort_key)
            .finish_non_exhaustive()
    }
}

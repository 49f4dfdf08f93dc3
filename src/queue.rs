use smallvec::SmallVec;

use crate::error::SchedulerError;
use crate::task::Task;

/// Pending tasks, fully ordered by ascending `(sort_key, id)` at every
/// observation point between operations.
///
/// Single-threaded; the [`Scheduler`](crate::Scheduler) wraps it in a
/// `RefCell`. The backing vector is kept sorted *descending* so the
/// next-to-run task sits at the back and extraction is a pop.
#[derive(Debug, Default)]
pub struct TaskQueue {
    tasks: SmallVec<[Task; 8]>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self {
            tasks: SmallVec::new(),
        }
    }

    /// Add a task and restore sorted order.
    ///
    /// Binary-search insertion rather than the full re-sort a naive version
    /// would do on every push; observable order is identical. Composite keys
    /// are unique (ids never repeat), so a later task with an equal sort key
    /// lands behind earlier ones.
    pub fn insert(&mut self, task: Task) {
        let at = self.tasks.partition_point(|queued| queued.key() > task.key());
        self.tasks.insert(at, task);
    }

    /// Remove and return the task with the smallest `(sort_key, id)`.
    pub fn extract_next(&mut self) -> Result<Task, SchedulerError> {
        self.tasks.pop().ok_or(SchedulerError::EmptyQueue)
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}

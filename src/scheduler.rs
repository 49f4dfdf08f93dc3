use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, trace};

use crate::clock::{Clock, SystemClock};
use crate::config::{DrainMode, SchedulerConfig};
use crate::queue::TaskQueue;
use crate::task::{Priority, Task, TaskId};

/// Cooperative scheduler: one task queue, one work loop, at most one loop
/// activation at a time.
///
/// Single-threaded by design. The handle is a cheap `Rc` clone, so callbacks
/// that need to schedule more work capture their own handle; a re-entrant
/// `schedule()` call inserts into the queue the active loop is draining and
/// never starts a nested loop. Independent schedulers own independent queues,
/// id counters and guards.
#[derive(Clone)]
pub struct Scheduler {
    inner: Rc<Inner>,
}

struct Inner {
    queue: RefCell<TaskQueue>,
    loop_active: Cell<bool>,
    next_id: Cell<u64>,
    clock: Rc<dyn Clock>,
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self::with_clock(config, Rc::new(SystemClock::new()))
    }

    /// Construct with an injected clock; expiration sort keys are computed
    /// against it.
    pub fn with_clock(config: SchedulerConfig, clock: Rc<dyn Clock>) -> Self {
        Self {
            inner: Rc::new(Inner {
                queue: RefCell::new(TaskQueue::new()),
                loop_active: Cell::new(false),
                next_id: Cell::new(0),
                clock,
                config,
            }),
        }
    }

    /// Accept a unit of work. Fire-and-forget: the callback runs at most
    /// once, eventually, never before any queued task with a smaller
    /// `(sort_key, id)`.
    pub fn schedule(&self, callback: impl FnOnce() + 'static, priority: Priority) {
        self.schedule_boxed(Box::new(callback), priority);
    }

    pub fn schedule_boxed(&self, callback: Box<dyn FnOnce()>, priority: Priority) {
        let inner = &self.inner;

        let id = TaskId(inner.next_id.get());
        inner.next_id.set(id.0 + 1);
        let sort_key = inner.config.policy.sort_key(&*inner.clock, priority);
        let task = Task::new(id, callback, priority, sort_key);
        trace!(id = id.0, priority = priority.0, sort_key, "schedule task");
        inner.queue.borrow_mut().insert(task);

        match &inner.config.drain {
            DrainMode::Synchronous => {
                // Re-entrant call from inside a running callback: the active
                // loop will reach the new task, do not start a nested one.
                if !inner.loop_active.get() {
                    inner.work_loop();
                }
            }
            DrainMode::Deferred(defer) => {
                if !inner.loop_active.get() {
                    // Flip the flag here, before the host turn, so another
                    // schedule() arriving first cannot enqueue a second loop.
                    inner.loop_active.set(true);
                    let inner = Rc::clone(inner);
                    defer.defer(Box::new(move || inner.work_loop()));
                }
            }
        }
    }

    /// No loop running and nothing queued.
    pub fn is_idle(&self) -> bool {
        !self.inner.loop_active.get() && self.inner.queue.borrow().is_empty()
    }

    /// Number of tasks waiting to run.
    pub fn pending(&self) -> usize {
        self.inner.queue.borrow().len()
    }

    pub fn loop_active(&self) -> bool {
        self.inner.loop_active.get()
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

impl Inner {
    /// Drain the queue to empty, executing tasks in `(sort_key, id)` order.
    ///
    /// The queue borrow is released before each callback runs, so callbacks
    /// may schedule; the loop re-checks emptiness each iteration and picks
    /// such tasks up within the same activation. Callback panics are not
    /// caught, but the guard resets `loop_active` on unwind so a failed
    /// drain can never deadlock future activations; surviving tasks stay
    /// queued for the next one.
    fn work_loop(&self) {
        let _guard = LoopGuard::enter(&self.loop_active);
        debug!("work loop start");
        let mut drained = 0usize;
        loop {
            // A `while let` would hold the RefMut across the callback;
            // the let-else drops it at the end of the statement.
            let Ok(task) = self.queue.borrow_mut().extract_next() else {
                break;
            };
            trace!(id = task.id().0, sort_key = task.sort_key(), "perform task");
            task.run();
            drained += 1;
        }
        debug!(drained, "work loop drained queue");
    }
}

/// Scoped re-entrancy guard: `loop_active` is true from loop start until it
/// returns or unwinds.
struct LoopGuard<'a> {
    flag: &'a Cell<bool>,
}

impl<'a> LoopGuard<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for LoopGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

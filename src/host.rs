use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Host "run on next turn" primitive used by deferred draining.
///
/// The scheduler never depends on a concrete event loop; a real host backs
/// this with a zero-delay timer or macrotask enqueue, and tests pump a
/// [`ManualDefer`] by hand.
pub trait Defer {
    fn defer(&self, f: Box<dyn FnOnce()>);
}

/// Collects deferred callbacks for the embedder to pump explicitly.
///
/// Clones share one pending queue, so a test can hand one handle to the
/// scheduler and keep another to drive it.
#[derive(Clone, Default)]
pub struct ManualDefer {
    pending: Rc<RefCell<VecDeque<Box<dyn FnOnce()>>>>,
}

impl ManualDefer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of deferred callbacks not yet run.
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Run the oldest deferred callback, if any. Returns whether one ran.
    pub fn run_next(&self) -> bool {
        // Take the callback out before invoking it: it may defer again.
        let next = self.pending.borrow_mut().pop_front();
        match next {
            Some(f) => {
                f();
                true
            }
            None => false,
        }
    }

    /// Run deferred callbacks until none remain, including ones deferred
    /// while running.
    pub fn run_all(&self) {
        while self.run_next() {}
    }
}

impl Defer for ManualDefer {
    fn defer(&self, f: Box<dyn FnOnce()>) {
        self.pending.borrow_mut().push_back(f);
    }
}

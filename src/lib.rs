//! Cooperative, priority-aware task scheduling.
//!
//! Callers hand the [`Scheduler`] zero-argument units of work tagged with a
//! [`Priority`]; a single work loop drains them in `(sort key, id)` order,
//! either inline with `schedule()` or on the host's next turn, and never
//! overlaps with itself.
//!
//! ```
//! use taskloop::{Priority, Scheduler, SchedulerConfig};
//!
//! let scheduler = Scheduler::new(SchedulerConfig::synchronous());
//! scheduler.schedule(|| println!("ran"), Priority::HIGH);
//! assert!(scheduler.is_idle());
//! ```

pub mod clock;
pub mod config;
pub mod error;
pub mod host;
pub mod policy;
pub mod queue;
pub mod scheduler;
pub mod task;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{DrainMode, SchedulerConfig};
pub use error::SchedulerError;
pub use host::{Defer, ManualDefer};
pub use policy::{SortPolicy, TimeoutMap};
pub use queue::TaskQueue;
pub use scheduler::Scheduler;
pub use task::{Priority, SortKey, Task, TaskId};
